use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{container_manager, fail};

pub fn execute(config: &ContainerConfig) {
    let manager = container_manager(config);
    println!(
        "{} Stopping and cleaning up {}...",
        "•".dimmed(),
        manager.container().cyan()
    );

    if let Err(e) = manager.compose_down() {
        fail(e);
    }
    println!(
        "{} Stopped and removed {}.",
        "✓".green().bold(),
        manager.container().cyan()
    );
}
