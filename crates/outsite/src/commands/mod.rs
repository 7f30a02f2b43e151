pub mod build;
pub mod init;
pub mod serve;

use std::path::{Path, PathBuf};

/// Site root: the directory holding the config file.
pub fn site_root(config: &Path) -> &Path {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Default output directory of `build`, and what `serve` previews.
pub fn output_dir(config: &Path) -> PathBuf {
    site_root(config).join("build")
}
