use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{container_manager, fail};

pub fn execute(config: &ContainerConfig) {
    let manager = container_manager(config);
    println!("{} Stopping {}...", "•".dimmed(), manager.container().cyan());

    if let Err(e) = manager.stop() {
        fail(e);
    }
    println!("{} Stopped {}.", "✓".green().bold(), manager.container().cyan());
}
