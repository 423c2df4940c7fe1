pub mod extract;
pub mod frankfurter;
