use clap::Parser;
use std::path::PathBuf;

/// Arguments for resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// State file holding one instance or an `instances` list
    pub state: PathBuf,
}
