//! mg-core: shared types, IDs, errors, configuration, and upload validation.
//!
//! This crate is the foundational dependency for the other mg-* crates,
//! providing the typed image identifier, the image record types, a unified
//! error type, application configuration, and the pure upload validation
//! rules.

pub mod config;
pub mod error;
pub mod ids;
pub mod media;
pub mod validation;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use media::*;
