// SPDX-License-Identifier: Apache-2.0

//! Start/stop/rebuild verbs for the managed container.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::ContainerConfig;
use crate::gateway::{argv, CommandGateway, CommandOutput};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to run docker {verb}: {source}")]
    Spawn { verb: String, source: io::Error },
    #[error("docker {verb} failed: {detail}")]
    Failed { verb: String, detail: String },
}

/// One row of `docker ps` for the managed container name filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStatus {
    pub name: String,
    /// Status column as reported by Docker, e.g. `Up 3 minutes`.
    pub state: String,
}

impl ContainerStatus {
    pub fn is_running(&self) -> bool {
        self.state.starts_with("Up")
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.state)
    }
}

pub struct ContainerManager<G> {
    gateway: G,
    container: String,
    compose_file: PathBuf,
}

impl<G: CommandGateway> ContainerManager<G> {
    pub fn new(gateway: G, config: &ContainerConfig) -> Self {
        ContainerManager {
            gateway,
            container: config.container.clone(),
            compose_file: config.compose_file.clone(),
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Starts the existing container.
    pub fn start(&self) -> Result<(), LifecycleError> {
        self.run("start", argv(["start", self.container.as_str()]))
            .map(drop)
    }

    /// Stops the running container.
    pub fn stop(&self) -> Result<(), LifecycleError> {
        self.run("stop", argv(["stop", self.container.as_str()]))
            .map(drop)
    }

    /// Recreates the container from its compose file.
    pub fn compose_up(&self) -> Result<(), LifecycleError> {
        let compose_file = self.compose_file.to_string_lossy();
        self.run(
            "compose up",
            argv(["compose", "-f", &*compose_file, "up", "-d"]),
        )
        .map(drop)
    }

    /// Stops and removes the compose project.
    pub fn compose_down(&self) -> Result<(), LifecycleError> {
        let compose_file = self.compose_file.to_string_lossy();
        self.run(
            "compose down",
            argv(["compose", "-f", &*compose_file, "down"]),
        )
        .map(drop)
    }

    /// Lists containers whose name matches the managed container, stopped ones included.
    pub fn status(&self) -> Result<Vec<ContainerStatus>, LifecycleError> {
        let filter = format!("name={}", self.container);
        let out = self.run(
            "ps",
            argv([
                "ps",
                "-a",
                "--filter",
                filter.as_str(),
                "--format",
                "{{.Names}}\t{{.Status}}",
            ]),
        )?;
        Ok(parse_status(&out.stdout_text()))
    }

    fn run(&self, verb: &str, args: Vec<String>) -> Result<CommandOutput, LifecycleError> {
        info!(verb, container = %self.container, "running lifecycle command");
        let out = self
            .gateway
            .run(&args)
            .map_err(|source| LifecycleError::Spawn {
                verb: verb.to_string(),
                source,
            })?;
        if !out.success() {
            return Err(LifecycleError::Failed {
                verb: verb.to_string(),
                detail: out.failure_detail(),
            });
        }
        Ok(out)
    }
}

/// Parses `{{.Names}}\t{{.Status}}` lines, skipping blanks.
fn parse_status(stdout: &str) -> Vec<ContainerStatus> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| match line.split_once('\t') {
            Some((name, state)) => ContainerStatus {
                name: name.trim().to_string(),
                state: state.trim().to_string(),
            },
            None => ContainerStatus {
                name: line.to_string(),
                state: String::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::testing::MemoryContainer;

    fn config() -> ContainerConfig {
        Settings::default().resolve(PathBuf::from("/srv/mc-bedrock"), PathBuf::from("/srv/backups"))
    }

    #[test]
    fn verbs_issue_expected_commands() {
        let container = MemoryContainer::new("mc-bedrock");
        let manager = ContainerManager::new(&container, &config());

        manager.start().unwrap();
        manager.stop().unwrap();
        manager.compose_up().unwrap();
        manager.compose_down().unwrap();

        let calls = container.calls();
        assert_eq!(calls[0], vec!["start", "mc-bedrock"]);
        assert_eq!(calls[1], vec!["stop", "mc-bedrock"]);
        assert_eq!(
            calls[2],
            vec!["compose", "-f", "/srv/mc-bedrock/docker-compose.yml", "up", "-d"]
        );
        assert_eq!(
            calls[3],
            vec!["compose", "-f", "/srv/mc-bedrock/docker-compose.yml", "down"]
        );
    }

    #[test]
    fn failed_verb_reports_stderr() {
        let container = MemoryContainer::new("mc-bedrock");
        container.fail("start", 1, "Error response from daemon: No such container: mc-bedrock");
        let manager = ContainerManager::new(&container, &config());

        match manager.start().unwrap_err() {
            LifecycleError::Failed { verb, detail } => {
                assert_eq!(verb, "start");
                assert!(detail.contains("No such container"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_runtime_is_a_spawn_error() {
        let container = MemoryContainer::new("mc-bedrock");
        container.fail_to_spawn("stop");
        let manager = ContainerManager::new(&container, &config());

        assert!(matches!(
            manager.stop(),
            Err(LifecycleError::Spawn { .. })
        ));
    }

    #[test]
    fn status_parses_ps_rows() {
        let container = MemoryContainer::new("mc-bedrock");
        container.respond(
            "ps",
            CommandOutput::ok("mc-bedrock\tUp 2 hours\nmc-bedrock-old\tExited (0) 3 days ago\n\n"),
        );
        let manager = ContainerManager::new(&container, &config());

        let rows = manager.status().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_running());
        assert_eq!(rows[1].name, "mc-bedrock-old");
        assert!(!rows[1].is_running());
        assert_eq!(container.calls()[0][3], "name=mc-bedrock");
    }

    #[test]
    fn status_with_no_rows_is_empty() {
        let container = MemoryContainer::new("mc-bedrock");
        container.respond("ps", CommandOutput::ok(""));
        let manager = ContainerManager::new(&container, &config());

        assert!(manager.status().unwrap().is_empty());
    }
}
