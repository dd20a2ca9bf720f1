// src/infrastructure/config.rs
use crate::constants::{
    DATABASE_ENV, DEFAULT_HTML_PATH, DEFAULT_OUTPUT_PATH, NOTION_API_BASE, NOTION_API_VERSION,
    QUERY_PAGE_SIZE, TOKEN_ENV,
};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How table blocks are written into the content lines.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    /// Fixed-width text grid.
    #[default]
    Ascii,
    /// Sanitized `<table>` behind the HTML sentinel.
    Html,
}

/// TOML configuration for folio
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub properties: PropertyConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_html_path")]
    pub html_path: PathBuf,
    #[serde(default)]
    pub table_style: TableStyle,
}

/// Property names tried, in order, before falling back to a scan by type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PropertyConfig {
    #[serde(default = "default_title_names")]
    pub title: Vec<String>,
    #[serde(default = "default_date_names")]
    pub date: Vec<String>,
    #[serde(default = "default_tag_names")]
    pub tags: Vec<String>,
    #[serde(default = "default_status_names")]
    pub status: Vec<String>,
    #[serde(default = "default_image_names")]
    pub image: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub default_color: String,
    #[serde(default = "default_status_colors")]
    pub status_colors: BTreeMap<String, String>,
}

// Default value functions
fn default_base_url() -> String { NOTION_API_BASE.to_string() }
fn default_version() -> String { NOTION_API_VERSION.to_string() }
fn default_page_size() -> u32 { QUERY_PAGE_SIZE }
fn default_output_path() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_PATH) }
fn default_html_path() -> PathBuf { PathBuf::from(DEFAULT_HTML_PATH) }
fn default_title_names() -> Vec<String> { names(&["Title", "Name"]) }
fn default_date_names() -> Vec<String> { names(&["Date"]) }
fn default_tag_names() -> Vec<String> { names(&["Multi-select", "Tags"]) }
fn default_status_names() -> Vec<String> { names(&["Status"]) }
fn default_image_names() -> Vec<String> { names(&["Image"]) }
fn default_color() -> String { "#666666".to_string() }
fn default_status_colors() -> BTreeMap<String, String> {
    [
        ("Done", "#2d5a2d"),
        ("In progress", "#ef6c00"),
        ("Planned", "#1565c0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_version(),
            page_size: default_page_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            html_path: default_html_path(),
            table_style: TableStyle::default(),
        }
    }
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            title: default_title_names(),
            date: default_date_names(),
            tags: default_tag_names(),
            status: default_status_names(),
            image: default_image_names(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            status_colors: default_status_colors(),
        }
    }
}

impl DisplayConfig {
    pub fn status_color(&self, status: &str) -> &str {
        self.status_colors
            .get(status)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

impl OutputConfig {
    /// Command-line values take precedence over the configured ones.
    pub fn with_overrides(
        &self,
        path: Option<PathBuf>,
        html_path: Option<PathBuf>,
        table_style: Option<TableStyle>,
    ) -> Self {
        Self {
            path: path.unwrap_or_else(|| self.path.clone()),
            html_path: html_path.unwrap_or_else(|| self.html_path.clone()),
            table_style: table_style.unwrap_or(self.table_style),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| DomainError::Config(e.to_string()))
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file
    /// `<config_dir>/folio/config.toml` is used when present, defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading user config");
                Self::load(path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("folio").join("config.toml"))
}

/// API credentials, read from the environment only.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub token: String,
    pub database_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV).filter(|v| !v.trim().is_empty());
        let database_id = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty());

        match (token, database_id) {
            (Some(token), Some(database_id)) => Ok(Self { token, database_id }),
            _ => Err(DomainError::MissingCredential(format!(
                "{TOKEN_ENV} or {DATABASE_ENV}"
            ))),
        }
    }
}
