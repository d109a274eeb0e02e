//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - migrate: Migrate command arguments
//! - resolve: Resolve command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_BITS_DIR, MigrationConfig};

pub mod completions;
pub mod migrate;
pub mod resolve;

pub use completions::CompletionsArgs;
pub use migrate::MigrateArgs;
pub use resolve::ResolveArgs;

/// bits-migrate - application bits state migration
#[derive(Parser, Debug)]
#[command(
    name = "bits-migrate",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Migrate application bits state to path + source_code_hash",
    long_about = "Rewrites resource state that describes application bits with the legacy \
                  url, git or github_release attributes. Remote zip archives are referenced \
                  directly; every other source is fetched and stored as a zip archive under \
                  the bits directory.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  bits-migrate resolve state.json                 \x1b[90m# Show where each source comes from\x1b[0m\n   \
                  bits-migrate migrate state.json --dry-run       \x1b[90m# Show planned paths only\x1b[0m\n   \
                  bits-migrate migrate state.json -o new.json     \x1b[90m# Write migrated state elsewhere\x1b[0m\n   \
                  bits-migrate -b /srv/bits migrate state.json    \x1b[90m# Store archives under /srv/bits\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Directory that receives materialized zip archives
    #[arg(
        long,
        short = 'b',
        global = true,
        env = "BITS_MIGRATE_DIR",
        default_value = DEFAULT_BITS_DIR
    )]
    pub bits_dir: PathBuf,

    /// Accept invalid TLS certificates when downloading
    #[arg(long, global = true, env = "BITS_MIGRATE_SKIP_SSL_VALIDATION")]
    pub skip_ssl_validation: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Migration settings selected on the command line
    pub fn config(&self) -> MigrationConfig {
        MigrationConfig::new(&self.bits_dir).with_skip_ssl_validation(self.skip_ssl_validation)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Migrate every instance of a state file
    Migrate(MigrateArgs),

    /// Show the resolved source of every instance
    Resolve(ResolveArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_cli_parsing_migrate() {
        let cli = Cli::try_parse_from(["bits-migrate", "migrate", "state.json"]).unwrap();
        match cli.command {
            Commands::Migrate(args) => {
                assert_eq!(args.state, PathBuf::from("state.json"));
                assert_eq!(args.output, None);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_parsing_migrate_options() {
        let cli = Cli::try_parse_from([
            "bits-migrate",
            "migrate",
            "state.json",
            "--output",
            "out.json",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Migrate(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out.json")));
                assert!(args.dry_run);
            }
            _ => panic!("Expected Migrate command"),
        }
    }

    #[test]
    fn test_cli_parsing_resolve() {
        let cli = Cli::try_parse_from(["bits-migrate", "resolve", "state.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve(_)));
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["bits-migrate", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    #[serial]
    fn test_cli_default_config() {
        let cli = Cli::try_parse_from(["bits-migrate", "resolve", "state.json"]).unwrap();
        assert_eq!(cli.config(), MigrationConfig::default());
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "bits-migrate",
            "-v",
            "-b",
            "/srv/bits",
            "--skip-ssl-validation",
            "migrate",
            "state.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        let config = cli.config();
        assert_eq!(config.bits_dir, PathBuf::from("/srv/bits"));
        assert!(config.skip_ssl_validation);
    }

    #[test]
    #[serial]
    fn test_cli_bits_dir_flag_overrides_env() {
        unsafe {
            std::env::set_var("BITS_MIGRATE_DIR", "/tmp/env-bits");
        }
        let cli = Cli::try_parse_from(["bits-migrate", "-b", "/tmp/flag-bits", "resolve", "s.json"])
            .unwrap();
        assert_eq!(cli.bits_dir, PathBuf::from("/tmp/flag-bits"));
        unsafe {
            std::env::remove_var("BITS_MIGRATE_DIR");
        }
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::try_parse_from(["bits-migrate", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
