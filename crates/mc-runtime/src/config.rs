// SPDX-License-Identifier: Apache-2.0

//! Container configuration and the optional on-disk settings file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DOCKER: &str = "docker";
pub const DEFAULT_CONTAINER: &str = "mc-bedrock";
pub const DEFAULT_BACKUP_NAME: &str = "backup.tar.gz";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Fixed locations inside the container's data volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub allowlist: String,
    pub permission_list: String,
    pub worlds_dir: String,
    pub backups_dir: String,
}

impl Default for DataLayout {
    fn default() -> Self {
        DataLayout {
            allowlist: "/data/allowlist.json".to_string(),
            permission_list: "/data/permissionlist.json".to_string(),
            worlds_dir: "/data/worlds".to_string(),
            backups_dir: "/data/backups".to_string(),
        }
    }
}

/// Everything a component needs to address the managed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Container runtime executable.
    pub docker: String,
    pub container: String,
    pub compose_file: PathBuf,
    /// Local directory backups are copied into when no destination is given.
    pub local_backups_dir: PathBuf,
    pub data: DataLayout,
}

/// Operator overrides read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub docker: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
    /// Directory holding `docker-compose.yml`.
    #[serde(default)]
    pub compose_dir: Option<PathBuf>,
    #[serde(default)]
    pub backups_dir: Option<PathBuf>,
    #[serde(default)]
    pub allowlist_path: Option<String>,
    #[serde(default)]
    pub permission_list_path: Option<String>,
    #[serde(default)]
    pub worlds_dir: Option<String>,
    #[serde(default)]
    pub remote_backups_dir: Option<String>,
}

impl Settings {
    /// Reads settings from `path`, defaulting to empty when the file is missing.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves settings against local defaults for the compose and backup directories.
    pub fn resolve(self, default_compose_dir: PathBuf, default_backups_dir: PathBuf) -> ContainerConfig {
        let defaults = DataLayout::default();
        let compose_dir = self.compose_dir.unwrap_or(default_compose_dir);

        ContainerConfig {
            docker: self.docker.unwrap_or_else(|| DEFAULT_DOCKER.to_string()),
            container: self
                .container
                .unwrap_or_else(|| DEFAULT_CONTAINER.to_string()),
            compose_file: compose_dir.join("docker-compose.yml"),
            local_backups_dir: self.backups_dir.unwrap_or(default_backups_dir),
            data: DataLayout {
                allowlist: self.allowlist_path.unwrap_or(defaults.allowlist),
                permission_list: self
                    .permission_list_path
                    .unwrap_or(defaults.permission_list),
                worlds_dir: self.worlds_dir.unwrap_or(defaults.worlds_dir),
                backups_dir: self.remote_backups_dir.unwrap_or(defaults.backups_dir),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());

        let config = settings.resolve(PathBuf::from("/srv/mc"), PathBuf::from("/srv/backups"));
        assert_eq!(config.docker, "docker");
        assert_eq!(config.container, "mc-bedrock");
        assert_eq!(config.compose_file, PathBuf::from("/srv/mc/docker-compose.yml"));
        assert_eq!(config.local_backups_dir, PathBuf::from("/srv/backups"));
        assert_eq!(config.data, DataLayout::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "container = \"survival\"\ncompose_dir = \"/opt/survival\"\npermission_list_path = \"/data/permissions.json\"\n",
        )
        .unwrap();

        let config = Settings::load(&path)
            .unwrap()
            .resolve(PathBuf::from("/srv/mc"), PathBuf::from("/srv/backups"));
        assert_eq!(config.container, "survival");
        assert_eq!(
            config.compose_file,
            PathBuf::from("/opt/survival/docker-compose.yml")
        );
        assert_eq!(config.data.permission_list, "/data/permissions.json");
        assert_eq!(config.data.allowlist, "/data/allowlist.json");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "container = [oops").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "contianer = \"typo\"\n").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
