//! Appointment workflow: scheduling, editing, and status changes.
//!
//! # Responsibility
//! - Create appointments in `waiting` status with generated ids.
//! - Enforce `allowed_transitions` for status changes.
//! - Raise notifications: urgent bookings to management, management status
//!   changes to the secretary inbox.
//!
//! # Invariants
//! - The book write happens before the notification write; a failed
//!   notification never rolls back the appointment.

use crate::model::appointment::{
    allowed_transitions, Appointment, AppointmentStatus, Priority,
};
use crate::model::notification::NewNotification;
use crate::model::role::Role;
use crate::repo::appointment_book::AppointmentBook;
use crate::repo::notification_center::NotificationCenter;
use crate::repo::RepoError;
use crate::service::auth_service::Session;
use crate::store::KeyValueStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Inbox read by the front desk.
pub const SECRETARY_INBOX: &str = "secretary";
/// Inbox read by management.
pub const MANAGEMENT_INBOX: &str = "management";

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[derive(Debug)]
pub enum WorkflowError {
    /// A required field was blank.
    MissingField(&'static str),
    NotFound(String),
    /// Completed or cancelled appointments no longer accept edits.
    Finalized(String),
    TransitionNotAllowed {
        role: Role,
        from: AppointmentStatus,
        to: AppointmentStatus,
    },
    Repo(RepoError),
}

impl Display for WorkflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is empty"),
            Self::NotFound(id) => write!(f, "appointment not found: {id}"),
            Self::Finalized(id) => write!(f, "appointment {id} is finalized"),
            Self::TransitionNotAllowed { role, from, to } => {
                write!(f, "role {role} cannot move an appointment from {from} to {to}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WorkflowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WorkflowError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Form input for a new appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub date: String,
    pub time: String,
    pub person_name: String,
    pub notes: String,
    pub priority: Priority,
}

impl ScheduleRequest {
    fn missing_field(&self) -> Option<&'static str> {
        missing_field(&self.date, &self.time, &self.person_name)
    }
}

fn missing_field(date: &str, time: &str, person_name: &str) -> Option<&'static str> {
    [("date", date), ("time", time), ("personName", person_name)]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
}

/// Appointment use-cases over one shared store.
pub struct AppointmentWorkflow<'store, S: KeyValueStore + ?Sized> {
    book: AppointmentBook<'store, S>,
    notifications: NotificationCenter<'store, S>,
}

impl<'store, S: KeyValueStore + ?Sized> AppointmentWorkflow<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self {
            book: AppointmentBook::new(store),
            notifications: NotificationCenter::new(store),
        }
    }

    pub fn book(&self) -> &AppointmentBook<'store, S> {
        &self.book
    }

    /// Books a new appointment in `waiting` status.
    ///
    /// Urgent (high priority) bookings also notify management.
    pub fn schedule(
        &self,
        session: &Session,
        request: ScheduleRequest,
    ) -> WorkflowResult<Appointment> {
        if let Some(field) = request.missing_field() {
            return Err(WorkflowError::MissingField(field));
        }

        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            date: request.date,
            time: request.time,
            person_name: request.person_name,
            notes: request.notes,
            priority: request.priority,
            status: AppointmentStatus::Waiting,
        };
        let stored = self.book.upsert(appointment)?;
        info!(
            "event=appointment_schedule module=workflow status=ok appointment_id={} role={} priority={}",
            stored.id, session.role, stored.priority
        );

        if stored.is_urgent() {
            self.notify_urgent(&stored)?;
        }
        Ok(stored)
    }

    /// Replaces the editable fields of an existing appointment.
    ///
    /// The stored status is kept; status only moves through `change_status`.
    /// Raising priority to high notifies management.
    pub fn edit(&self, session: &Session, edited: Appointment) -> WorkflowResult<Appointment> {
        if let Some(field) = missing_field(&edited.date, &edited.time, &edited.person_name) {
            return Err(WorkflowError::MissingField(field));
        }
        let current = self.load(&edited.id)?;
        if current.is_finalized() {
            return Err(WorkflowError::Finalized(current.id));
        }

        let became_urgent = !current.is_urgent() && edited.is_urgent();
        let stored = self.book.upsert(Appointment {
            status: current.status,
            ..edited
        })?;
        info!(
            "event=appointment_edit module=workflow status=ok appointment_id={} role={}",
            stored.id, session.role
        );

        if became_urgent {
            self.notify_urgent(&stored)?;
        }
        Ok(stored)
    }

    /// Replaces the notes of an existing appointment.
    pub fn update_notes(&self, id: &str, notes: impl Into<String>) -> WorkflowResult<Appointment> {
        let mut appointment = self.load(id)?;
        appointment.notes = notes.into();
        Ok(self.book.upsert(appointment)?)
    }

    /// Moves an appointment to `next` if the caller's role allows it.
    ///
    /// Management changes are announced to the secretary inbox.
    pub fn change_status(
        &self,
        session: &Session,
        id: &str,
        next: AppointmentStatus,
    ) -> WorkflowResult<Appointment> {
        let mut appointment = self.load(id)?;
        let previous = appointment.status;
        if !allowed_transitions(session.role, previous).contains(&next) {
            warn!(
                "event=appointment_status module=workflow status=rejected appointment_id={id} role={} from={previous} to={next}",
                session.role
            );
            return Err(WorkflowError::TransitionNotAllowed {
                role: session.role,
                from: previous,
                to: next,
            });
        }

        appointment.status = next;
        let stored = self.book.upsert(appointment)?;
        info!(
            "event=appointment_status module=workflow status=ok appointment_id={id} role={} from={previous} to={next}",
            session.role
        );

        if session.role == Role::Management {
            let notice = NewNotification::new(
                SECRETARY_INBOX,
                "Appointment update",
                format!(
                    "The appointment for {} has been {}",
                    stored.person_name,
                    status_change_phrase(next)
                ),
            )
            .for_appointment(stored.id.clone());
            self.notifications.create(notice)?;
        }
        Ok(stored)
    }

    fn load(&self, id: &str) -> WorkflowResult<Appointment> {
        self.book
            .find_by_id(id)?
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))
    }

    fn notify_urgent(&self, appointment: &Appointment) -> WorkflowResult<()> {
        let notice = NewNotification::new(
            MANAGEMENT_INBOX,
            "Urgent appointment",
            format!(
                "New urgent appointment for {} on {} at {}",
                appointment.person_name, appointment.date, appointment.time
            ),
        )
        .for_appointment(appointment.id.clone());
        self.notifications.create(notice)?;
        Ok(())
    }
}

fn status_change_phrase(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Approved => "approved",
        AppointmentStatus::Completed => "marked as attended",
        AppointmentStatus::Cancelled => "cancelled",
        AppointmentStatus::Waiting => "updated",
    }
}
