//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod currency;
pub mod error;
pub mod log;
pub mod report;

// Re-export main types for cleaner imports
pub use conversion::{ConversionRecord, RecordKind};
pub use currency::{CurrencyCatalog, CurrencyCode, RateProvider};
pub use error::{InputError, RateUnavailable};
pub use report::DailyRateEntry;
