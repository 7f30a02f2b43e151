//! The site configuration record and its loader.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::{default_on_broken_links, default_on_broken_markdown_links, LinkPolicy};
use crate::preset::PresetConfig;
use crate::theme::ThemeConfig;

/// Site configuration (`outsite.toml`).
///
/// Keys keep their camelCase spelling; they are the contract with every
/// site that already has a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    /// Production URL of the site, without the base path
    pub url: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path relative to the static directory
    #[serde(default)]
    pub favicon: Option<String>,

    #[serde(default)]
    pub organization_name: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,

    #[serde(default = "default_on_broken_links")]
    pub on_broken_links: LinkPolicy,

    #[serde(default = "default_on_broken_markdown_links")]
    pub on_broken_markdown_links: LinkPolicy,

    /// Directory copied verbatim to the output root
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default)]
    pub preset: PresetConfig,

    #[serde(default)]
    pub theme_config: ThemeConfig,
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl SiteConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content, &path.display().to_string())?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let (config, ignored) =
            parse_with_ignored(content).map_err(|source| ConfigError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        for field in &ignored {
            tracing::warn!("Unknown key `{}` in {} is ignored", field, origin);
        }

        Ok(config)
    }

    /// Absolute URL for a site route, used in the sitemap.
    pub fn absolute_url(&self, route: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), route)
    }

    /// Title shown in the navbar.
    pub fn navbar_title(&self) -> &str {
        self.theme_config
            .navbar
            .title
            .as_deref()
            .unwrap_or(&self.title)
    }
}

/// Deserialize, collecting the paths of keys nothing consumed.
fn parse_with_ignored(content: &str) -> Result<(SiteConfig, Vec<String>), toml::de::Error> {
    let mut ignored = Vec::new();
    let deserializer = toml::Deserializer::new(content);
    let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
        ignored.push(path.to_string());
    })?;
    Ok((config, ignored))
}
