use officedesk_core::{MemoryKeyValueStore, RepoError, User, UserDirectory, UserRole};

fn user(id: &str, username: &str) -> User {
    User::new(id, format!("User {id}"), username, "secret", UserRole::Assistant)
}

#[test]
fn create_then_find_by_id_and_username() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);

    directory.create(user("u1", "ana")).unwrap();

    let by_id = directory.find_by_id("u1").unwrap().unwrap();
    assert_eq!(by_id.username, "ana");
    let by_name = directory.find_by_username("ana").unwrap().unwrap();
    assert_eq!(by_name.id, "u1");
    assert!(directory.find_by_id("missing").unwrap().is_none());
}

#[test]
fn duplicate_username_on_create_is_rejected_and_length_stays_one() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);

    directory.create(user("u1", "bob")).unwrap();
    let err = directory.create(user("u2", "bob")).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateUsername(name) if name == "bob"));
    assert_eq!(directory.list().unwrap().len(), 1);
}

#[test]
fn update_replaces_record_in_place() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);
    directory.create(user("u1", "ana")).unwrap();
    directory.create(user("u2", "bob")).unwrap();

    let mut renamed = user("u1", "ana.m");
    renamed.role = UserRole::Management;
    directory.update(renamed.clone()).unwrap();

    let users = directory.list().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0], renamed);
    assert_eq!(users[1].id, "u2");
}

#[test]
fn update_keeping_own_username_is_allowed() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);
    directory.create(user("u1", "ana")).unwrap();

    let mut changed = user("u1", "ana");
    changed.password = "rotated".to_string();
    directory.update(changed).unwrap();

    let stored = directory.find_by_id("u1").unwrap().unwrap();
    assert_eq!(stored.password, "rotated");
}

#[test]
fn update_to_another_users_username_is_rejected() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);
    directory.create(user("u1", "ana")).unwrap();
    directory.create(user("u2", "bob")).unwrap();

    let err = directory.update(user("u2", "ana")).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateUsername(_)));
    assert_eq!(directory.find_by_id("u2").unwrap().unwrap().username, "bob");
}

#[test]
fn update_missing_user_returns_not_found() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);

    let err = directory.update(user("ghost", "ghost")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == "ghost"));
    assert!(directory.list().unwrap().is_empty());
}

#[test]
fn delete_removes_present_and_ignores_absent() {
    let store = MemoryKeyValueStore::new();
    let directory = UserDirectory::new(&store);
    directory.create(user("u1", "ana")).unwrap();

    directory.delete("missing").unwrap();
    assert_eq!(directory.list().unwrap().len(), 1);

    directory.delete("u1").unwrap();
    assert!(directory.list().unwrap().is_empty());
}
