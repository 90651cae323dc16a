use officedesk_core::{ChatService, MemoryKeyValueStore, Message, MessageLog};

fn message(id: &str, sender: &str, recipient: &str, timestamp: &str) -> Message {
    Message {
        id: id.to_string(),
        sender: sender.to_string(),
        recipient: recipient.to_string(),
        content: format!("body {id}"),
        timestamp: timestamp.to_string(),
    }
}

#[test]
fn conversation_contains_both_directions_in_time_order() {
    let store = MemoryKeyValueStore::new();
    let log = MessageLog::new(&store);

    log.append(message("m1", "secretary", "management", "T1")).unwrap();
    log.append(message("m2", "management", "secretary", "T2")).unwrap();

    let ids: Vec<_> = log
        .conversation("secretary", "management")
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec!["m1", "m2"]);
}

#[test]
fn conversation_is_symmetric_and_excludes_third_parties() {
    let store = MemoryKeyValueStore::new();
    let log = MessageLog::new(&store);

    log.append(message("m1", "a", "b", "2024-01-10T09:00:00.000Z")).unwrap();
    log.append(message("m2", "a", "c", "2024-01-10T09:01:00.000Z")).unwrap();
    log.append(message("m3", "b", "a", "2024-01-10T09:02:00.000Z")).unwrap();

    let forward = log.conversation("a", "b").unwrap();
    let backward = log.conversation("b", "a").unwrap();
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 2);
    assert!(forward.iter().all(|m| m.is_between("a", "b")));
}

#[test]
fn conversation_reorders_out_of_order_appends_by_instant() {
    let store = MemoryKeyValueStore::new();
    let log = MessageLog::new(&store);

    log.append(message("late", "a", "b", "2024-01-10T10:00:00Z")).unwrap();
    log.append(message("early", "b", "a", "2024-01-10T10:30:00+02:00")).unwrap();

    let ids: Vec<_> = log
        .conversation("a", "b")
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids, vec!["early", "late"]);
}

#[test]
fn chat_service_skips_blank_content() {
    let store = MemoryKeyValueStore::new();
    let chat = ChatService::new(&store);

    assert!(chat.send("secretary", "management", "   ").unwrap().is_none());
    assert!(chat.conversation("secretary", "management").unwrap().is_empty());
}

#[test]
fn chat_service_stamps_and_appends() {
    let store = MemoryKeyValueStore::new();
    let chat = ChatService::new(&store);

    let sent = chat
        .send("secretary", "management", "Is Ana confirmed?")
        .unwrap()
        .unwrap();
    assert!(!sent.id.is_empty());
    assert!(!sent.timestamp.is_empty());

    let reply = chat.send("management", "secretary", "Yes").unwrap().unwrap();
    let conversation = chat.conversation("management", "secretary").unwrap();
    assert_eq!(conversation.len(), 2);
    assert_eq!(conversation[0].id, sent.id);
    assert_eq!(conversation[1].id, reply.id);
}
