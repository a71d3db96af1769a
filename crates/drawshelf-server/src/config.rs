//! Server configuration from the environment.

use drawshelf_core::model::RepositoryRef;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const ADDR_ENV: &str = "DRAWSHELF_ADDR";
pub const DATA_DIR_ENV: &str = "DRAWSHELF_DATA_DIR";
pub const REPOSITORIES_ENV: &str = "DRAWSHELF_REPOSITORIES";

pub const DEFAULT_ADDR: &str = "0.0.0.0:3030";
pub const DEFAULT_REPOSITORIES: &str = "drawings=Drawings";

/// `DRAWSHELF_DATA_DIR` value selecting volatile storage.
pub const MEMORY_STORAGE: &str = "memory";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid listen address {0:?}")]
    InvalidAddr(String),
    #[error("Invalid repository entry {0:?}, expected name=Label")]
    InvalidRepository(String),
    #[error("Duplicate repository {0:?}")]
    DuplicateRepository(String),
    #[error("No repositories configured")]
    NoRepositories,
}

/// Where drawings are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Directory(PathBuf),
    /// The platform data directory.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub storage: StorageConfig,
    pub repositories: Vec<RepositoryRef>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from a variable lookup; unset variables take their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = var(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr.clone()))?;

        let storage = match var(DATA_DIR_ENV) {
            None => StorageConfig::Default,
            Some(dir) if dir.trim().is_empty() => StorageConfig::Default,
            Some(dir) if dir.trim() == MEMORY_STORAGE => StorageConfig::Memory,
            Some(dir) => StorageConfig::Directory(PathBuf::from(dir.trim())),
        };

        let repositories = parse_repositories(
            &var(REPOSITORIES_ENV).unwrap_or_else(|| DEFAULT_REPOSITORIES.to_string()),
        )?;

        Ok(Self {
            addr,
            storage,
            repositories,
        })
    }
}

/// Parse `name=Label,name=Label`. A bare `name` uses the name as label.
pub fn parse_repositories(value: &str) -> Result<Vec<RepositoryRef>, ConfigError> {
    let mut repositories: Vec<RepositoryRef> = Vec::new();
    for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, label) = match entry.split_once('=') {
            Some((name, label)) => (name.trim(), label.trim()),
            None => (entry, entry),
        };
        if name.is_empty() || label.is_empty() {
            return Err(ConfigError::InvalidRepository(entry.to_string()));
        }
        if repositories.iter().any(|r| r.name == name) {
            return Err(ConfigError::DuplicateRepository(name.to_string()));
        }
        repositories.push(RepositoryRef::new(name, label));
    }
    if repositories.is_empty() {
        return Err(ConfigError::NoRepositories);
    }
    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:3030".parse().unwrap());
        assert_eq!(config.storage, StorageConfig::Default);
        assert_eq!(config.repositories, vec![RepositoryRef::new("drawings", "Drawings")]);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (ADDR_ENV, "127.0.0.1:8080"),
            (DATA_DIR_ENV, "memory"),
            (REPOSITORIES_ENV, "work=Work Stuff, play"),
        ])
        .unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert_eq!(
            config.repositories,
            vec![RepositoryRef::new("work", "Work Stuff"), RepositoryRef::new("play", "play")]
        );

        let config = load(&[(DATA_DIR_ENV, "/srv/drawings")]).unwrap();
        assert_eq!(config.storage, StorageConfig::Directory(PathBuf::from("/srv/drawings")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[(ADDR_ENV, "nowhere")]),
            Err(ConfigError::InvalidAddr(_))
        ));
        assert_eq!(parse_repositories(" , "), Err(ConfigError::NoRepositories));
        assert_eq!(
            parse_repositories("a=A,a=B"),
            Err(ConfigError::DuplicateRepository("a".to_string()))
        );
        assert!(matches!(
            parse_repositories("=Label"),
            Err(ConfigError::InvalidRepository(_))
        ));
    }
}
