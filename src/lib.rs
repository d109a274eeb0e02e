//! bits-migrate - application bits state migration
//!
//! Rewrites resource state written with the legacy bits attributes (`url`,
//! `git`, `github_release`) to the `path` + `source_code_hash` form. Sources
//! that are not a remote zip are fetched and stored as zip archives under a
//! local bits directory.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod git;
pub mod hash;
pub mod legacy;
pub mod materialize;
pub mod migration;
pub mod output_path;
pub mod path_utils;
pub mod rewrite;
pub mod source;
pub mod state;
pub mod temp;

#[cfg(test)]
mod test_fixtures;

pub use config::MigrationConfig;
pub use error::{BitsError, Result};
pub use migration::{BitsMigration, MigrationPlan};
pub use state::{Attributes, InstanceState, StateDocument};
