//! Appointment record and its status policy.
//!
//! # Invariants
//! - `date` is an ISO `YYYY-MM-DD` string and `time` an `HH:MM` string, so
//!   lexicographic order equals chronological order.
//! - Status only advances `waiting -> approved -> completed`, or moves to
//!   `cancelled` from any non-cancelled status.

use super::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type AppointmentId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    /// Urgent; management is notified when one is scheduled.
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Waiting,
    Approved,
    Completed,
    Cancelled,
}

/// One scheduled visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: String,
    pub time: String,
    pub person_name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Builds a waiting appointment with normal priority and no notes.
    pub fn new(
        id: impl Into<AppointmentId>,
        date: impl Into<String>,
        time: impl Into<String>,
        person_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            time: time.into(),
            person_name: person_name.into(),
            notes: String::new(),
            priority: Priority::default(),
            status: AppointmentStatus::default(),
        }
    }

    /// Combined `date`+`time` key, orderable as a plain string.
    pub fn schedule_key(&self) -> String {
        format!("{}T{}", self.date, self.time)
    }

    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::High
    }

    /// Completed and cancelled appointments no longer accept field edits.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self.status,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }
}

/// Statuses `role` may move an appointment to from `current`.
///
/// Only management approves and completes; any role may cancel while the
/// appointment is not already cancelled.
pub fn allowed_transitions(role: Role, current: AppointmentStatus) -> Vec<AppointmentStatus> {
    let mut allowed = Vec::with_capacity(2);
    if role == Role::Management {
        match current {
            AppointmentStatus::Waiting => allowed.push(AppointmentStatus::Approved),
            AppointmentStatus::Approved => allowed.push(AppointmentStatus::Completed),
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => {}
        }
    }
    if current != AppointmentStatus::Cancelled {
        allowed.push(AppointmentStatus::Cancelled);
    }
    allowed
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority `{other}`; expected low|normal|high")),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "waiting" => Ok(Self::Waiting),
            "approved" => Ok(Self::Approved),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!(
                "unknown status `{other}`; expected waiting|approved|completed|cancelled"
            )),
        }
    }
}
