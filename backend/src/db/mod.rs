//! Database module for TCE lookups.
//!
//! This module provides read-only access to the TCE databases via the
//! Repository pattern, so the HTTP layer can run against SQLite in production
//! and against an in-memory store in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / lookup service                         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  TceRepository trait - Abstract Interface               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │                              │
//! ┌───▼──────────────┐   ┌───────────▼──────┐
//! │ SqliteRepository │   │ LocalRepository  │
//! │ (read-only files)│   │ (in-memory)      │
//! └──────────────────┘   └──────────────────┘
//! ```
//!
//! The data directory is passed in as a [`DatabaseConfig`] value; nothing in
//! this module reads process-wide state after construction.

pub mod config;
pub mod repositories;
pub mod repository;

pub use config::DatabaseConfig;
pub use repositories::{LocalRepository, SqliteRepository};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, TceRepository};
