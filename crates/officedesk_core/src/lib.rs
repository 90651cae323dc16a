//! Core domain logic for the office desk: appointments, chat, notifications
//! and user accounts over a local key-value store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::appointment::{
    allowed_transitions, Appointment, AppointmentId, AppointmentStatus, Priority,
};
pub use model::message::Message;
pub use model::notification::{NewNotification, Notification};
pub use model::role::{Role, UserRole};
pub use model::user::User;
pub use repo::appointment_book::AppointmentBook;
pub use repo::message_log::MessageLog;
pub use repo::notification_center::NotificationCenter;
pub use repo::user_directory::UserDirectory;
pub use repo::{RepoError, RepoResult};
pub use search::appointment_filter::{
    filter_appointments, AppointmentFilter, PriorityFilter, StatusFilter,
};
pub use service::appointment_service::{
    AppointmentWorkflow, ScheduleRequest, WorkflowError, WorkflowResult, MANAGEMENT_INBOX,
    SECRETARY_INBOX,
};
pub use service::auth_service::{authenticate, Session};
pub use service::calendar_service::{day_marker, month_markers, DayMarker};
pub use service::chat_service::ChatService;
pub use store::{
    initialize, Collection, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError,
    StoreResult,
};
