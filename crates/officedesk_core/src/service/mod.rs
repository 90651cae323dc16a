//! Use-case services composed from the collection accessors.
//!
//! # Responsibility
//! - Couple appointment mutations with their notification side effects.
//! - Keep front ends (CLI today) free of policy and storage details.

pub mod appointment_service;
pub mod auth_service;
pub mod calendar_service;
pub mod chat_service;
