//! Configuration errors.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur when loading or checking `outsite.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid site configuration:{}", format_issues(.0))]
    Invalid(Vec<Issue>),
}

/// A single problem found while checking the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Key path, e.g. `themeConfig.navbar.items[1]`
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {}", self.field, self.message)
    }
}

fn format_issues(issues: &[Issue]) -> String {
    issues.iter().map(|i| format!("\n  - {}", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_issue() {
        let err = ConfigError::Invalid(vec![
            Issue::new("url", "must be an absolute URL"),
            Issue::new("baseUrl", "must end with `/`"),
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid site configuration:\n  - `url`: must be an absolute URL\n  - `baseUrl`: must end with `/`"
        );
    }
}
