//! Command handler for `mc-cli backup`.

use colored::Colorize;
use std::path::PathBuf;

use mc_runtime::{BackupOrchestrator, ContainerConfig, DockerCli};

use super::fail;

/// Archives the world inside the container and copies it to `dest`.
pub fn execute(config: &ContainerConfig, name: &str, dest: Option<&str>) {
    if name.trim().is_empty() || name.contains('/') {
        fail(format!("Invalid backup name `{name}`."));
    }
    let destination = dest
        .map(PathBuf::from)
        .unwrap_or_else(|| config.local_backups_dir.clone());

    println!(
        "{} Backing up {} to {}...",
        "•".dimmed(),
        name.bold(),
        destination.display()
    );

    let orchestrator = BackupOrchestrator::new(
        DockerCli::new(config.docker.as_str()),
        config.container.as_str(),
        &config.data,
    );
    match orchestrator.backup(name, &destination) {
        Ok(local) => println!(
            "{} Backup completed: {}",
            "✓".green().bold(),
            local.display().to_string().cyan()
        ),
        Err(e) => fail(e),
    }
}
