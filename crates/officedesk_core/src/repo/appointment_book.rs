//! Appointment collection with date lookup and upsert semantics.

use super::RepoResult;
use crate::model::appointment::Appointment;
use crate::store::{read_collection, write_collection, Collection, KeyValueStore};
use log::info;

pub struct AppointmentBook<'store, S: KeyValueStore + ?Sized> {
    store: &'store S,
}

impl<'store, S: KeyValueStore + ?Sized> AppointmentBook<'store, S> {
    pub fn new(store: &'store S) -> Self {
        Self { store }
    }

    pub fn list(&self) -> RepoResult<Vec<Appointment>> {
        Ok(read_collection(self.store, Collection::Appointments)?)
    }

    /// Appointments whose `date` equals `date` exactly (no normalization).
    pub fn list_by_date(&self, date: &str) -> RepoResult<Vec<Appointment>> {
        let mut appointments = self.list()?;
        appointments.retain(|appointment| appointment.date == date);
        Ok(appointments)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Appointment>> {
        Ok(self.list()?.into_iter().find(|appointment| appointment.id == id))
    }

    /// Replaces the appointment with the same id, or appends it.
    pub fn upsert(&self, appointment: Appointment) -> RepoResult<Appointment> {
        let mut appointments = self.list()?;
        let mode = match appointments
            .iter_mut()
            .find(|existing| existing.id == appointment.id)
        {
            Some(existing) => {
                *existing = appointment.clone();
                "replace"
            }
            None => {
                appointments.push(appointment.clone());
                "insert"
            }
        };

        write_collection(self.store, Collection::Appointments, &appointments)?;
        info!(
            "event=appointment_upsert module=repo status=ok mode={mode} appointment_id={} appointment_status={}",
            appointment.id, appointment.status
        );
        Ok(appointment)
    }

    /// Removes the appointment if present.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        let mut appointments = self.list()?;
        appointments.retain(|appointment| appointment.id != id);
        write_collection(self.store, Collection::Appointments, &appointments)?;
        info!("event=appointment_delete module=repo status=ok appointment_id={id}");
        Ok(())
    }
}
