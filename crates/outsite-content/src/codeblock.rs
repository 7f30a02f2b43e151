//! Code fence info strings.

/// A fenced code block found in a doc.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// First word of the info string, lowercased
    pub language: Option<String>,

    /// Caption from `title="..."`
    pub title: Option<String>,

    /// Source code content
    pub source: String,

    /// Line number of the opening fence (1-indexed)
    pub line_number: usize,
}

/// Parsed code fence info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FenceInfo {
    pub language: Option<String>,
    pub title: Option<String>,
}

impl FenceInfo {
    /// Parse an info string like `js title="server.js"`.
    pub fn parse(info: &str) -> Self {
        let language = info
            .split_whitespace()
            .next()
            .filter(|word| !word.contains('='))
            .map(str::to_lowercase);

        Self {
            language,
            title: extract_title(info),
        }
    }
}

/// Extract the title from a code fence info string if present.
///
/// Supports formats like:
/// - `js title="server.js"`
/// - `js title=server.js`
pub fn extract_title(info: &str) -> Option<String> {
    let start = info.find("title=")?;
    let rest = &info[start + 6..];

    if let Some(quoted) = rest.strip_prefix('"') {
        let end = quoted.find('"')?;
        return Some(quoted[..end].to_string()).filter(|t| !t.is_empty());
    }

    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(rest[..end].to_string()).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(FenceInfo::parse("GraphQL").language.as_deref(), Some("graphql"));
        assert_eq!(FenceInfo::parse("sh title=\"install\"").language.as_deref(), Some("sh"));
        assert_eq!(FenceInfo::parse("").language, None);
        assert_eq!(FenceInfo::parse("title=\"x\"").language, None);
    }

    #[test]
    fn extracts_title() {
        assert_eq!(
            extract_title("js title=\"server.js\""),
            Some("server.js".to_string())
        );
        assert_eq!(
            extract_title("js title=server.js showLineNumbers"),
            Some("server.js".to_string())
        );
        assert_eq!(extract_title("js title=\"unclosed"), None);
        assert_eq!(extract_title("js"), None);
    }
}
