use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{fail, membership_store};

pub fn execute(config: &ContainerConfig, name: &str) {
    if let Err(e) = membership_store(config).revoke_permission(name) {
        fail(e);
    }
    println!(
        "{} Revoked all permissions for {}.",
        "✓".green().bold(),
        name.cyan()
    );
}
