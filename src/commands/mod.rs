//! Command implementations for the bits-migrate CLI

pub mod completions;
pub mod migrate;
pub mod resolve;
pub mod version;
