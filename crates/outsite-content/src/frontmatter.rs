//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter of a doc page. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Frontmatter {
    /// Replaces the file name in the doc id
    pub id: Option<String>,

    /// Page title; falls back to the first `#` heading
    pub title: Option<String>,

    /// Page description for the meta tag
    pub description: Option<String>,

    /// Order in the sidebar (lower = first)
    pub sidebar_position: Option<i32>,

    /// Sidebar text, when it should differ from the title
    pub sidebar_label: Option<String>,

    /// Custom route; absolute slugs start at the base URL
    pub slug: Option<String>,

    pub hide_table_of_contents: bool,
}

/// Extract frontmatter from a Markdown source.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    // An empty block (`---\n---`) is valid and means "no fields".
    let frontmatter = if yaml_content.is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml_content)
            .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?
    };

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
