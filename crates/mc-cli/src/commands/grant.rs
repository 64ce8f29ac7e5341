//! Command handler for `mc-cli grant`.

use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{fail, membership_store};

/// Appends a permission grant for an allowlisted, already-connected player.
pub fn execute(config: &ContainerConfig, name: &str, permission: &str) {
    match membership_store(config).grant_permission(name, permission) {
        Ok(level) => println!(
            "{} Granted {} the permission level {}.",
            "✓".green().bold(),
            name.cyan(),
            level.to_string().bold()
        ),
        Err(e) => fail(e),
    }
}
