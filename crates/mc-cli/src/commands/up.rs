//! Command handler for `mc-cli up`.

use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{container_manager, fail};

/// Recreates the container from the configured compose file.
pub fn execute(config: &ContainerConfig) {
    if !config.compose_file.exists() {
        fail(format!(
            "Compose file {} does not exist.",
            config.compose_file.display().to_string().bold()
        ));
    }

    let manager = container_manager(config);
    println!("{} Rebuilding {}...", "•".dimmed(), manager.container().cyan());

    if let Err(e) = manager.compose_up() {
        fail(e);
    }
    println!("{} Rebuilt {}.", "✓".green().bold(), manager.container().cyan());
}
