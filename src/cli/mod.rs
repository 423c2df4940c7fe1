//! Command line surface over the core operations.

pub mod convert;
pub mod currencies;
pub mod interactive;
pub mod rate;
pub mod setup;
pub mod ui;
pub mod week;
