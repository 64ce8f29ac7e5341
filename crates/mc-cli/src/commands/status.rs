//! Command handler for `mc-cli status`.

use colored::Colorize;

use mc_runtime::ContainerConfig;

use super::{container_manager, fail};

/// Executes the `mc-cli status` command.
pub fn execute(config: &ContainerConfig) {
    let manager = container_manager(config);
    let rows = match manager.status() {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    if rows.is_empty() {
        println!(
            "{} No container named {} found.",
            "!".yellow().bold(),
            manager.container().cyan()
        );
        return;
    }

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in &rows {
        let marker = if row.is_running() {
            "running".green()
        } else {
            "stopped".red()
        };
        println!(
            "  {}  {}  {}",
            format!("{:<width$}", row.name).cyan(),
            marker,
            row.state.dimmed()
        );
    }
}
