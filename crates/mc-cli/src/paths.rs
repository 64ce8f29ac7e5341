use std::path::PathBuf;

pub fn mc_cli_home() -> Option<PathBuf> {
    // Allow override via MC_CLI_HOME for testing
    if let Ok(home) = std::env::var("MC_CLI_HOME") {
        return Some(PathBuf::from(home));
    }
    dirs::home_dir().map(|h| h.join(".mc-cli"))
}

pub fn config_path() -> Option<PathBuf> {
    mc_cli_home().map(|h| h.join("config.toml"))
}

/// Directory holding the server's `docker-compose.yml` unless configured.
pub fn default_compose_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join("mc-bedrock"))
}

/// Where `backup` copies archives unless configured or given on the command line.
pub fn default_backups_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join("mc-backups"))
}
