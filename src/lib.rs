//! Marginalia Server Library
//!
//! A minimal annotation-store service: clients create text documents and
//! attach span-based annotations (start/end offsets tied to a labeled
//! entity) to them.
//!
//! # Modules
//!
//! - `model`: value types carrying the validity invariants (span ordering,
//!   document ownership)
//! - `db`: SQLite-backed repositories, the persistence root of record
//! - `routes`: REST surface mapping HTTP verbs to store operations

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod routes;
pub mod state;
