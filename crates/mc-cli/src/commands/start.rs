//! Command handler for `mc-cli start`.

use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{container_manager, fail};

/// Executes the `mc-cli start` command.
pub fn execute(config: &ContainerConfig) {
    let manager = container_manager(config);
    println!("{} Starting {}...", "•".dimmed(), manager.container().cyan());

    if let Err(e) = manager.start() {
        fail(e);
    }
    println!("{} Started {}.", "✓".green().bold(), manager.container().cyan());
}
