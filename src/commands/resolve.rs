//! Resolve command: shows where each instance's bits come from

use crate::cli::ResolveArgs;
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::migration::{BitsMigration, MigrationPlan};
use crate::state::{InstanceState, StateDocument};

/// Run resolve command
pub fn run(config: MigrationConfig, args: ResolveArgs) -> Result<()> {
    let document = StateDocument::load(&args.state)?;
    let migration = BitsMigration::new(config)?;

    for instance in document.instances() {
        let plan = migration.plan(instance)?;
        println!("{}", describe(instance, &plan));
    }

    Ok(())
}

/// Human-readable summary of one instance's plan
pub fn describe(instance: &InstanceState, plan: &MigrationPlan) -> String {
    let id = if instance.is_empty() {
        "(empty)"
    } else {
        instance.id.as_str()
    };

    match plan {
        MigrationPlan::Noop => format!("{id}\n  nothing to migrate"),
        MigrationPlan::Direct { uri } => format!(
            "{id}\n  source: {}\n  action: reference remote zip\n  path:   {}",
            uri.redacted(),
            uri.redacted()
        ),
        MigrationPlan::Materialize { uri, output } => format!(
            "{id}\n  source: {}\n  action: fetch and archive\n  path:   {}",
            uri.redacted(),
            output.display()
        ),
    }
}
