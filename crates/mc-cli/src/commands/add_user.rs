use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{fail, membership_store};

pub fn execute(config: &ContainerConfig, name: &str, uuid: &str) {
    if name.trim().is_empty() {
        fail("Player name must not be empty.");
    }

    if let Err(e) = membership_store(config).add_allowlist_entry(name, uuid) {
        fail(e);
    }
    println!("{} Added {} to the allowlist.", "✓".green().bold(), name.cyan());
}
