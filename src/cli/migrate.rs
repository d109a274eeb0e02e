use clap::Parser;
use std::path::PathBuf;

/// Arguments for migrate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Migrate a state file in place:\n    bits-migrate migrate terraform.tfstate.json\n\n\
                  Write the migrated state to another file:\n    bits-migrate migrate state.json --output migrated.json\n\n\
                  Show the planned archive paths without fetching:\n    bits-migrate migrate state.json --dry-run")]
pub struct MigrateArgs {
    /// State file holding one instance or an `instances` list
    pub state: PathBuf,

    /// Write the migrated state here instead of replacing the input
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Resolve sources and print the planned paths without fetching or writing
    #[arg(long)]
    pub dry_run: bool,
}
