//! # api-adapters
//!
//! Transport adapters in front of the service layer. The axum JSON API is
//! the one wired up today, behind the `web-axum` feature.

#[cfg(feature = "web-axum")]
pub mod web;
