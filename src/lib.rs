//! keyconf — typed access to key-value configuration.
//!
//! Hexagonal architecture: the accessor and coercion rules live in [`domain`],
//! the source trait in [`ports`], concrete sources in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
pub mod logging;
