//! Month view markers for the appointment calendar.

use crate::model::appointment::Appointment;
use crate::repo::appointment_book::AppointmentBook;
use crate::repo::RepoResult;
use crate::store::KeyValueStore;
use chrono::{Datelike, NaiveDate};

/// Highlight for a calendar day that has appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMarker {
    Scheduled,
    /// At least one high-priority appointment.
    Urgent,
}

/// Marker for one day given that day's appointments.
pub fn day_marker(appointments: &[Appointment]) -> Option<DayMarker> {
    if appointments.is_empty() {
        None
    } else if appointments.iter().any(Appointment::is_urgent) {
        Some(DayMarker::Urgent)
    } else {
        Some(DayMarker::Scheduled)
    }
}

/// Marked days of the month containing `day`, in calendar order.
///
/// Days without appointments are omitted. The book is read once.
pub fn month_markers<S: KeyValueStore + ?Sized>(
    book: &AppointmentBook<'_, S>,
    day: NaiveDate,
) -> RepoResult<Vec<(NaiveDate, DayMarker)>> {
    let appointments = book.list()?;
    let markers = day
        .with_day(1)
        .into_iter()
        .flat_map(|first| {
            first
                .iter_days()
                .take_while(move |candidate| candidate.month() == first.month())
        })
        .filter_map(|date| {
            let key = date.format("%Y-%m-%d").to_string();
            let on_day: Vec<Appointment> = appointments
                .iter()
                .filter(|appointment| appointment.date == key)
                .cloned()
                .collect();
            day_marker(&on_day).map(|marker| (date, marker))
        })
        .collect();
    Ok(markers)
}
