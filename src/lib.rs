//! Market kit
//!
//! Re-exports the workspace libraries so the cross-crate integration tests in
//! `tests/` can reach everything through one path.

pub use common;
pub use market_data;
