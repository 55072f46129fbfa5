//! Persistence layer — per-user keyed JSON state storage.

pub mod libsql_backend;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use traits::{SessionStore, StateKey};
