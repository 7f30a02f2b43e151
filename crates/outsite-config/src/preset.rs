//! Preset options: the docs plugin and the stylesheet hook.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Named bundle of defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    #[default]
    Classic,
}

/// `[preset]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresetConfig {
    pub name: PresetName,
    pub docs: DocsOptions,
    pub theme: ThemeOptions,
}

/// `[preset.docs]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocsOptions {
    /// Docs source directory, relative to the site root
    pub path: PathBuf,

    /// URL segment docs are served under
    pub route_base_path: String,

    /// Start sidebar categories collapsed
    pub sidebar_collapsed: bool,

    /// Prefix for "Edit this page" links
    pub edit_url: Option<String>,
}

impl Default for DocsOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("docs"),
            route_base_path: "docs".to_string(),
            sidebar_collapsed: true,
            edit_url: None,
        }
    }
}

impl DocsOptions {
    /// Edit link for a doc source file, relative to the docs directory.
    ///
    /// Path separators are normalized to `/`.
    pub fn edit_link(&self, relative_source: &std::path::Path) -> Option<String> {
        let base = self.edit_url.as_deref()?.trim_end_matches('/');
        let docs_dir = path_to_slash(&self.path);
        let file = path_to_slash(relative_source);

        Some(if docs_dir.is_empty() {
            format!("{}/{}", base, file)
        } else {
            format!("{}/{}/{}", base, docs_dir, file)
        })
    }
}

/// `[preset.theme]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeOptions {
    /// Extra stylesheet linked after the built-in one
    pub custom_css: Option<PathBuf>,
}

fn path_to_slash(path: &std::path::Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
