//! In-memory search over loaded collections.

pub mod appointment_filter;
