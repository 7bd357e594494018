//! Configuration for the docso bot

use std::path::{Path, PathBuf};
use std::time::Duration;

use docso_core::{OwnerPolicy, RegistryConfig};
use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Main bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Text every command must start with
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Command word for lookups
    #[serde(default = "default_doc_command")]
    pub doc_command: String,

    /// Command word for the function listing
    #[serde(default = "default_funcs_command")]
    pub funcs_command: String,

    /// Command word for the type listing
    #[serde(default = "default_types_command")]
    pub types_command: String,

    /// Directory holding `<pkg>.json` index files
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Index cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_prefix() -> String { "!".to_string() }
fn default_doc_command() -> String { "doc".to_string() }
fn default_funcs_command() -> String { "getfuncs".to_string() }
fn default_types_command() -> String { "gettypes".to_string() }
fn default_docs_dir() -> PathBuf { PathBuf::from("docs") }
fn default_true() -> bool { true }

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            doc_command: default_doc_command(),
            funcs_command: default_funcs_command(),
            types_command: default_types_command(),
            docs_dir: default_docs_dir(),
            pagination: PaginationConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> BotResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| BotError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> BotResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the bot cannot run with
    pub fn validate(&self) -> BotResult<()> {
        if self.prefix.chars().any(char::is_whitespace) {
            return Err(BotError::Config("prefix must not contain whitespace".to_string()));
        }
        let commands = [&self.doc_command, &self.funcs_command, &self.types_command];
        if commands.iter().any(|c| c.is_empty() || c.chars().any(char::is_whitespace)) {
            return Err(BotError::Config(
                "command words must be non-empty and contain no whitespace".to_string(),
            ));
        }
        if self.pagination.sweep_interval_secs == 0 {
            return Err(BotError::Config("sweep_interval_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Pagination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Seconds without navigation before a listing is dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Seconds between idle sweeps
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Only the caller who opened a listing may navigate it
    #[serde(default)]
    pub owner_only: bool,
}

fn default_idle_timeout() -> u64 { 300 }
fn default_sweep_interval() -> u64 { 30 }

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            sweep_interval_secs: default_sweep_interval(),
            owner_only: false,
        }
    }
}

impl PaginationConfig {
    pub fn registry_config(&self) -> RegistryConfig {
        let policy = if self.owner_only {
            OwnerPolicy::OwnerOnly
        } else {
            OwnerPolicy::Anyone
        };
        RegistryConfig::new()
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .owner_policy(policy)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Index cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether fetched indexes are kept
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds a fetched index stays fresh
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Maximum cached packages
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl() -> u64 { 300 }
fn default_max_entries() -> usize { 64 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.doc_command, "doc");
        assert_eq!(config.funcs_command, "getfuncs");
        assert_eq!(config.types_command, "gettypes");
        assert_eq!(config.pagination.idle_timeout_secs, 300);
        assert_eq!(config.pagination.sweep_interval_secs, 30);
        assert!(!config.pagination.owner_only);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = BotConfig::from_json(
            r#"{ "prefix": "?", "pagination": { "owner_only": true } }"#,
        )
        .unwrap();

        assert_eq!(config.prefix, "?");
        assert_eq!(config.doc_command, "doc");
        assert!(config.pagination.owner_only);
        assert_eq!(config.pagination.idle_timeout_secs, 300);

        let registry = config.pagination.registry_config();
        assert_eq!(registry.owner_policy, OwnerPolicy::OwnerOnly);
        assert_eq!(registry.idle_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            BotConfig::from_json(r#"{ "prefix": "a b" }"#),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            BotConfig::from_json(r#"{ "doc_command": "" }"#),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            BotConfig::from_json(r#"{ "pagination": { "sweep_interval_secs": 0 } }"#),
            Err(BotError::Config(_))
        ));
        assert!(matches!(
            BotConfig::from_json("not json"),
            Err(BotError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = BotConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }
}
