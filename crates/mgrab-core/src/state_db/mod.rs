//! Persistent key-value state mirror (SQLite via sqlx).
//!
//! Flat string-keyed storage for session state, filter config, the captured
//! resource list, and the panel mode preference. Read once at startup to
//! restore the coordinator; written after every mutating core operation.
//! No transactional guarantees are assumed by callers: a failed write is
//! logged and the in-memory state stays authoritative.

pub mod db;
mod state;

#[cfg(test)]
mod tests;

pub use db::StateDb;
pub use state::PersistedState;
