//! # Domain Models
//!
//! These structs represent the core entities of Agora.
//! We use UUID v7 for time-ordered, globally unique identification.

pub mod forum;
pub mod product;
pub mod seller;

pub use forum::*;
pub use product::*;
pub use seller::*;
