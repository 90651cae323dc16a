//! Direct chat message between two named parties.

use serde::{Deserialize, Serialize};

pub type MessageId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub recipient: String,
    pub content: String,
    /// RFC 3339 when written by this crate; older values are kept verbatim.
    pub timestamp: String,
}

impl Message {
    /// Whether this message belongs to the conversation between `a` and `b`.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }
}
