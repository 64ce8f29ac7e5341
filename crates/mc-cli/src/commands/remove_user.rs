use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{fail, membership_store};

pub fn execute(config: &ContainerConfig, name: &str) {
    if let Err(e) = membership_store(config).remove_allowlist_entry(name) {
        fail(e);
    }
    println!(
        "{} Removed {} from the allowlist.",
        "✓".green().bold(),
        name.cyan()
    );
}
