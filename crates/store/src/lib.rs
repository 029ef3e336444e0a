//! SQLite-backed persistence for per-channel duty state.

pub mod sqlite;

pub use sqlite::SqliteDutyStore;
