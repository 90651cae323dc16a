use chrono::NaiveDate;
use officedesk_core::db::open_db_in_memory;
use officedesk_core::{
    initialize, month_markers, Appointment, AppointmentStatus, AppointmentWorkflow, DayMarker,
    NotificationCenter, Priority, Role, ScheduleRequest, Session, SqliteKeyValueStore,
    WorkflowError, MANAGEMENT_INBOX, SECRETARY_INBOX,
};

fn secretary() -> Session {
    Session::new(Role::Secretary, "Secretaria")
}

fn management() -> Session {
    Session::new(Role::Management, "Jefatura")
}

fn request(person: &str, priority: Priority) -> ScheduleRequest {
    ScheduleRequest {
        date: "2024-01-10".to_string(),
        time: "09:00".to_string(),
        person_name: person.to_string(),
        notes: String::new(),
        priority,
    }
}

#[test]
fn schedule_creates_waiting_appointment_without_notice_for_normal_priority() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    initialize(&store).unwrap();
    let workflow = AppointmentWorkflow::new(&store);

    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();

    assert_eq!(created.status, AppointmentStatus::Waiting);
    assert!(!created.id.is_empty());
    assert_eq!(workflow.book().find_by_id(&created.id).unwrap(), Some(created));
    assert!(NotificationCenter::new(&store)
        .list_for(MANAGEMENT_INBOX)
        .unwrap()
        .is_empty());
}

#[test]
fn urgent_schedule_notifies_management_once() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);

    let created = workflow
        .schedule(&secretary(), request("Luis", Priority::High))
        .unwrap();

    let inbox = NotificationCenter::new(&store)
        .list_for(MANAGEMENT_INBOX)
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].appointment_id.as_deref(), Some(created.id.as_str()));
    assert!(inbox[0].message.contains("Luis"));
    assert!(inbox[0].message.contains("2024-01-10"));
    assert!(!inbox[0].read);
}

#[test]
fn schedule_rejects_blank_person_name() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);

    let err = workflow
        .schedule(&secretary(), request("  ", Priority::Normal))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::MissingField("personName")));
    assert!(workflow.book().list().unwrap().is_empty());
}

#[test]
fn management_status_change_notifies_secretary() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();

    let approved = workflow
        .change_status(&management(), &created.id, AppointmentStatus::Approved)
        .unwrap();
    assert_eq!(approved.status, AppointmentStatus::Approved);

    let completed = workflow
        .change_status(&management(), &created.id, AppointmentStatus::Completed)
        .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    let inbox = NotificationCenter::new(&store)
        .list_for(SECRETARY_INBOX)
        .unwrap();
    assert_eq!(inbox.len(), 2);
    assert!(inbox
        .iter()
        .all(|notice| notice.appointment_id.as_deref() == Some(created.id.as_str())));
    assert!(inbox.iter().any(|notice| notice.message.contains("approved")));
    assert!(inbox
        .iter()
        .any(|notice| notice.message.contains("marked as attended")));
}

#[test]
fn secretary_cancel_does_not_notify() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();

    workflow
        .change_status(&secretary(), &created.id, AppointmentStatus::Cancelled)
        .unwrap();

    assert!(NotificationCenter::new(&store)
        .list_for(SECRETARY_INBOX)
        .unwrap()
        .is_empty());
}

#[test]
fn forbidden_transitions_are_rejected_without_writes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();

    let err = workflow
        .change_status(&secretary(), &created.id, AppointmentStatus::Approved)
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::TransitionNotAllowed {
            role: Role::Secretary,
            from: AppointmentStatus::Waiting,
            to: AppointmentStatus::Approved,
        }
    ));

    let err = workflow
        .change_status(&management(), &created.id, AppointmentStatus::Completed)
        .unwrap_err();
    assert!(matches!(err, WorkflowError::TransitionNotAllowed { .. }));

    workflow
        .change_status(&management(), &created.id, AppointmentStatus::Cancelled)
        .unwrap();
    let err = workflow
        .change_status(&management(), &created.id, AppointmentStatus::Cancelled)
        .unwrap_err();
    assert!(matches!(err, WorkflowError::TransitionNotAllowed { .. }));

    assert_eq!(
        NotificationCenter::new(&store)
            .list_for(SECRETARY_INBOX)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn change_status_on_missing_appointment_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);

    let err = workflow
        .change_status(&management(), "missing", AppointmentStatus::Approved)
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound(id) if id == "missing"));
}

#[test]
fn edit_preserves_status_and_notifies_when_raised_to_urgent() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();
    workflow
        .change_status(&management(), &created.id, AppointmentStatus::Approved)
        .unwrap();

    let edited = workflow
        .edit(
            &secretary(),
            Appointment {
                time: "10:30".to_string(),
                priority: Priority::High,
                status: AppointmentStatus::Waiting,
                ..created.clone()
            },
        )
        .unwrap();

    assert_eq!(edited.status, AppointmentStatus::Approved);
    assert_eq!(edited.time, "10:30");
    assert_eq!(
        NotificationCenter::new(&store)
            .list_for(MANAGEMENT_INBOX)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn edit_of_finalized_appointment_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();
    workflow
        .change_status(&secretary(), &created.id, AppointmentStatus::Cancelled)
        .unwrap();

    let err = workflow.edit(&secretary(), created.clone()).unwrap_err();
    assert!(matches!(err, WorkflowError::Finalized(id) if id == created.id));
}

#[test]
fn update_notes_replaces_only_notes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    let created = workflow
        .schedule(&secretary(), request("Ana", Priority::Low))
        .unwrap();

    let updated = workflow.update_notes(&created.id, "arrived early").unwrap();

    assert_eq!(updated.notes, "arrived early");
    assert_eq!(
        Appointment {
            notes: String::new(),
            ..updated
        },
        created
    );
}

#[test]
fn month_markers_flag_urgent_days() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::new(&conn);
    let workflow = AppointmentWorkflow::new(&store);
    workflow
        .schedule(&secretary(), request("Ana", Priority::Normal))
        .unwrap();
    workflow
        .schedule(
            &secretary(),
            ScheduleRequest {
                date: "2024-01-20".to_string(),
                ..request("Luis", Priority::High)
            },
        )
        .unwrap();
    workflow
        .schedule(
            &secretary(),
            ScheduleRequest {
                date: "2024-02-01".to_string(),
                ..request("Rosa", Priority::Normal)
            },
        )
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let markers = month_markers(workflow.book(), day).unwrap();

    assert_eq!(
        markers,
        vec![
            (NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), DayMarker::Scheduled),
            (NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(), DayMarker::Urgent),
        ]
    );
}
