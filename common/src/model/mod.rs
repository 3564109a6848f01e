//! Domain models shared across the workspace

pub mod order;
pub mod market;
