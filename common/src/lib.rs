//! Common types and utilities for the market kit
//!
//! This library contains shared types used across the workspace crates: the
//! error type, precision helpers for snapshot numbers, and the small domain
//! models (trading pairs, trade sides) that request handling needs.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
