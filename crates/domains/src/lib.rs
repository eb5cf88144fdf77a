//! # domains
//!
//! The central domain logic and interface definitions for Agora: models for
//! the forum containment tree (discussions, posts, comments) and the
//! marketplace catalog (products, sellers), the ports every adapter plugs
//! into, and the shared error type.

pub mod error;
pub mod models;
pub mod pagination;
pub mod ports;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use pagination::*;
pub use ports::*;
