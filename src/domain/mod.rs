//! Core types and lookup logic.

pub mod value;
pub mod coerce;
pub mod accessor;
pub mod error;
