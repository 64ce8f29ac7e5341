use colored::Colorize;

use mc_runtime::{follow_logs, ContainerConfig, FollowOutcome};

use super::fail;

pub fn execute(config: &ContainerConfig) {
    println!(
        "{} Showing logs for {}. Press {} to stop.\n",
        "•".dimmed(),
        config.container.cyan(),
        "Ctrl+C".bold()
    );

    match follow_logs(&config.docker, &config.container) {
        Ok(FollowOutcome::Interrupted) => {
            println!("\n{} Stopped following logs.", "✓".green().bold());
        }
        Ok(FollowOutcome::Ended(Some(0))) => {}
        Ok(FollowOutcome::Ended(code)) => fail(format!(
            "Log stream for {} ended with status {}.",
            config.container.cyan(),
            code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
        )),
        Err(e) => fail(e),
    }
}
