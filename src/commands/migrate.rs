//! Migrate command: rewrites a state file to the new bits attributes

use tracing::info;

use crate::cli::MigrateArgs;
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::migration::{BitsMigration, MigrationPlan};
use crate::state::StateDocument;

/// Run migrate command
pub fn run(config: MigrationConfig, args: MigrateArgs) -> Result<()> {
    let document = StateDocument::load(&args.state)?;
    let migration = BitsMigration::new(config)?;

    if args.dry_run {
        for instance in document.instances() {
            let plan = migration.plan(instance)?;
            println!("{}: {}", instance.id, planned_path(&plan));
        }
        return Ok(());
    }

    let migrated = document.try_map(|instance| migration.migrate(instance))?;

    let output = args.output.as_deref().unwrap_or(args.state.as_path());
    migrated.save(output)?;
    info!(
        instances = migrated.instances().len(),
        output = %output.display(),
        "wrote migrated state"
    );
    println!(
        "Migrated {} instance(s) into {}",
        migrated.instances().len(),
        output.display()
    );

    Ok(())
}

fn planned_path(plan: &MigrationPlan) -> String {
    match plan {
        MigrationPlan::Noop => "unchanged".to_string(),
        MigrationPlan::Direct { uri } => uri.redacted(),
        MigrationPlan::Materialize { output, .. } => output.display().to_string(),
    }
}
