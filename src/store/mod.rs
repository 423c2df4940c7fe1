//! Durable local storage.

pub mod history;

pub use history::HistoryLog;
