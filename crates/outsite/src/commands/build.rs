//! Static site build command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use outsite_config::SiteConfig;
use outsite_static::{BuildConfig, StaticBuilder};

use super::{output_dir, site_root};

/// Run the build command.
pub async fn run(config_path: &Path, out_dir: Option<PathBuf>, minify: bool) -> Result<()> {
    tracing::info!("Building static site...");

    let site = SiteConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let mut config = BuildConfig::new(Arc::new(site), site_root(config_path));
    config.output_dir = out_dir.unwrap_or_else(|| output_dir(config_path));
    config.minify = minify;

    let result = StaticBuilder::new(config).build().await?;

    if result.broken_links > 0 {
        tracing::warn!("{} broken links reported", result.broken_links);
    }

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);
    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
