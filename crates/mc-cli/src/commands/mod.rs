//! CLI subcommand declarations and dispatch.

pub mod add_user;
pub mod backup;
pub mod down;
pub mod grant;
pub mod logs;
pub mod remove_user;
pub mod revoke;
pub mod start;
pub mod status;
pub mod stop;
pub mod up;
pub mod users;

use clap::Subcommand;
use colored::Colorize;
use std::fmt;
use std::process;

use mc_membership::MembershipStore;
use mc_runtime::{ContainerConfig, ContainerManager, DockerCli, RemoteFiles, DEFAULT_BACKUP_NAME};

/// Top-level CLI subcommands supported by `mc-cli`.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the Minecraft Bedrock server
    Start,

    /// Rebuild the server container from its docker-compose.yml
    Up,

    /// Stop the Minecraft Bedrock server
    Stop,

    /// Stop and clean up the server container
    Down,

    /// Show the status of the server container
    Status,

    /// Follow the server logs (Ctrl+C to stop)
    Logs,

    /// Back up the world data to the local filesystem
    Backup {
        /// Archive file name
        #[arg(default_value = DEFAULT_BACKUP_NAME)]
        name: String,

        /// Local destination directory (defaults to the configured backups dir)
        dest: Option<String>,
    },

    /// Add a player to the allowlist
    AddUser {
        /// Player name
        name: String,

        /// Player uuid
        uuid: String,
    },

    /// Remove a player from the allowlist
    RemoveUser {
        /// Player name
        name: String,
    },

    /// Grant a player a permission level (visitor, member, operator, admin)
    Grant {
        /// Player name
        name: String,

        /// Permission level
        #[arg(default_value = "member")]
        permission: String,
    },

    /// Revoke all of a player's permission grants
    Revoke {
        /// Player name
        name: String,
    },

    /// List allowlisted players with their permission levels
    Users {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Dispatches a parsed CLI command to its command module.
pub fn execute(command: Commands, config: &ContainerConfig) {
    match command {
        Commands::Start => start::execute(config),
        Commands::Up => up::execute(config),
        Commands::Stop => stop::execute(config),
        Commands::Down => down::execute(config),
        Commands::Status => status::execute(config),
        Commands::Logs => logs::execute(config),
        Commands::Backup { name, dest } => backup::execute(config, &name, dest.as_deref()),
        Commands::AddUser { name, uuid } => add_user::execute(config, &name, &uuid),
        Commands::RemoveUser { name } => remove_user::execute(config, &name),
        Commands::Grant { name, permission } => grant::execute(config, &name, &permission),
        Commands::Revoke { name } => revoke::execute(config, &name),
        Commands::Users { json } => users::execute(config, json),
    }
}

/// Prints a failure line and exits with status 1.
pub(crate) fn fail(msg: impl fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), msg);
    process::exit(1);
}

pub(crate) fn container_manager(config: &ContainerConfig) -> ContainerManager<DockerCli> {
    ContainerManager::new(DockerCli::new(config.docker.as_str()), config)
}

pub(crate) fn membership_store(config: &ContainerConfig) -> MembershipStore<DockerCli> {
    let files = RemoteFiles::new(DockerCli::new(config.docker.as_str()), config.container.as_str());
    MembershipStore::new(files, &config.data)
}
