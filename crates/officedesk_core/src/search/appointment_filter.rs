//! Multi-predicate appointment filter used by the listing views.
//!
//! # Invariants
//! - Predicates combine with AND; an unset predicate matches everything.
//! - Output is sorted newest first by `date`+`time`; ties keep input order.
//! - Applying the same filter twice yields the same result as applying it once.

use crate::model::appointment::{Appointment, AppointmentStatus, Priority};
use std::str::FromStr;

/// Status predicate; `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

/// Priority predicate; `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

/// Listing filter as entered in the search panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    /// Case-insensitive substring of `person_name` or `notes`; empty skips.
    pub search_text: String,
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    /// Inclusive lower bound on `date`; `None` or empty skips.
    pub date_from: Option<String>,
    /// Inclusive upper bound on `date`; `None` or empty skips.
    pub date_to: Option<String>,
}

impl AppointmentFilter {
    /// Whether a single appointment passes every active predicate.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.matches_text(appointment)
            && self.matches_status(appointment)
            && self.matches_priority(appointment)
            && self.matches_dates(appointment)
    }

    fn matches_text(&self, appointment: &Appointment) -> bool {
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        appointment.person_name.to_lowercase().contains(&needle)
            || appointment.notes.to_lowercase().contains(&needle)
    }

    fn matches_status(&self, appointment: &Appointment) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => appointment.status == status,
        }
    }

    fn matches_priority(&self, appointment: &Appointment) -> bool {
        match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => appointment.priority == priority,
        }
    }

    fn matches_dates(&self, appointment: &Appointment) -> bool {
        let date = appointment.date.as_str();
        let after_start = active_bound(&self.date_from).map_or(true, |from| date >= from);
        let before_end = active_bound(&self.date_to).map_or(true, |to| date <= to);
        after_start && before_end
    }
}

fn active_bound(bound: &Option<String>) -> Option<&str> {
    bound.as_deref().filter(|value| !value.is_empty())
}

/// Applies `filter` and sorts the survivors newest first.
pub fn filter_appointments(
    appointments: &[Appointment],
    filter: &AppointmentFilter,
) -> Vec<Appointment> {
    let mut filtered: Vec<Appointment> = appointments
        .iter()
        .filter(|appointment| filter.matches(appointment))
        .cloned()
        .collect();
    filtered.sort_by_cached_key(|appointment| std::cmp::Reverse(appointment.schedule_key()));
    filtered
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::{PriorityFilter, StatusFilter};
    use crate::model::appointment::{AppointmentStatus, Priority};

    #[test]
    fn all_sentinel_parses_case_insensitively() {
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(" all ".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
    }

    #[test]
    fn concrete_values_parse_to_only() {
        assert_eq!(
            "approved".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::Approved)
        );
        assert_eq!(
            "high".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::High)
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }
}
