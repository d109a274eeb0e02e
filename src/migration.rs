//! The bits v2 to v3 migration pipeline
//!
//! read legacy attributes → resolve the source URI → reference it directly
//! or materialize it → rewrite the attributes.
//!
//! The input state is only borrowed. On any error the caller's copy is
//! unchanged and nothing is written to the state store; archives already
//! written under the bits directory stay in place and are overwritten by
//! the next run.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::MigrationConfig;
use crate::error::{Result, unsupported_feature};
use crate::fetch::{ContentFetcher, Fetcher};
use crate::legacy::{self, ADD_CONTENT_GROUP};
use crate::materialize::{Materializer, is_remote_zip};
use crate::rewrite::rewrite;
use crate::source::{SourceUri, resolve};
use crate::state::InstanceState;

/// What migrating one instance will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationPlan {
    /// Nothing to migrate: empty state or no source configured
    Noop,
    /// Reference a remote zip as `path`
    Direct { uri: SourceUri },
    /// Fetch the source and write it as an archive at `output`
    Materialize { uri: SourceUri, output: PathBuf },
}

/// Migrates resource instances from the legacy bits schema
pub struct BitsMigration<F: ContentFetcher = Fetcher> {
    config: MigrationConfig,
    fetcher: F,
}

impl BitsMigration<Fetcher> {
    /// Migration with the default multi-protocol fetcher
    pub fn new(config: MigrationConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: ContentFetcher> BitsMigration<F> {
    pub fn with_fetcher(config: MigrationConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    fn materializer(&self) -> Materializer<'_> {
        Materializer::new(&self.fetcher, &self.config.bits_dir)
    }

    /// Decide what [`migrate`](Self::migrate) would do, without fetching
    /// or writing anything.
    pub fn plan(&self, state: &InstanceState) -> Result<MigrationPlan> {
        let Some(uri) = self.source_of(state)? else {
            return Ok(MigrationPlan::Noop);
        };

        if is_remote_zip(&uri) {
            return Ok(MigrationPlan::Direct { uri });
        }
        let output = self.materializer().output_path(&uri);
        Ok(MigrationPlan::Materialize { uri, output })
    }

    /// Migrate one instance, returning the migrated copy.
    ///
    /// Empty instances and instances without a legacy source come back
    /// unchanged. `add_content` is rejected with a non-retryable error.
    pub fn migrate(&self, state: &InstanceState) -> Result<InstanceState> {
        let Some(uri) = self.source_of(state)? else {
            return Ok(state.clone());
        };

        let fragment = self.materializer().materialize(&uri)?;
        let attributes = rewrite(&state.attributes, &fragment);

        info!(id = %state.id, path = %fragment.path, "migrated bits");
        Ok(state.with_attributes(attributes))
    }

    fn source_of(&self, state: &InstanceState) -> Result<Option<SourceUri>> {
        if state.is_empty() {
            debug!("empty instance state; nothing to migrate");
            return Ok(None);
        }

        let bits = legacy::read(&state.attributes)?;
        if bits.has_add_content {
            return Err(unsupported_feature(ADD_CONTENT_GROUP));
        }

        let uri = resolve(&bits.source)?;
        if uri.is_none() {
            debug!(id = %state.id, "no legacy bits source; nothing to migrate");
        }
        Ok(uri)
    }
}
