//! # TESS DV Fast
//!
//! Fast lookup of TESS Threshold Crossing Events (TCEs) by TIC id.
//!
//! The TCE statistics published by the SPOC (2-min cadence) and TESS-SPOC
//! (FFI) pipelines are ingested offline into two SQLite databases. This crate
//! reads them, puts the TCEs of one target into a stable order and renders
//! HTML tables linking to the Data Validation reports on MAST.
//!
//! ## Architecture
//!
//! - [`models`]: TIC ids, sector descriptors and the two TCE shapes
//! - [`derivation`]: derived identifiers, product filenames and URLs
//! - [`units`]: unit conversions and value formatting
//! - [`db`]: database configuration, repository trait and implementations
//! - [`services`]: lookup orchestration, ordering, release watermarks
//! - [`render`]: HTML tables and pages
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod build_info;
pub mod db;
pub mod derivation;
pub mod models;
pub mod render;
pub mod services;
pub mod units;

#[cfg(feature = "http-server")]
pub mod http;
