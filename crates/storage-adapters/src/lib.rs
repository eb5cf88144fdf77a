//! # storage-adapters
//!
//! Concrete implementations of the persistence ports declared in
//! `domains`. SQLite is the only backend wired up today; the feature gate
//! keeps the door open for others without touching the callers.

#[cfg(feature = "db-sqlite")]
pub mod sqlite;
