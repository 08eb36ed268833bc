//! Core types shared across the season-report crates: the canonical
//! [`models::Activity`] record, CLI settings, the error taxonomy, and the
//! unit/field coercion helpers used while normalizing raw export records.

pub mod coercion;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod units;
pub mod zones;
