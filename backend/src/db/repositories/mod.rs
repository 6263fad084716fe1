//! Repository implementations module.
//!
//! This module contains the implementations of the `TceRepository` trait:
//! - `sqlite`: read-only SQLite implementation used by the server
//! - `local`: in-memory implementation for unit testing and local development
pub mod local;
pub mod sqlite;

pub use local::LocalRepository;
pub use sqlite::SqliteRepository;
