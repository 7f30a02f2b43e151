//! Link targets found in doc bodies.

/// How a link target should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Has a scheme (`https:`, `mailto:`) or is protocol-relative
    External,
    /// `#section` on the same page
    Anchor,
    /// Path to another Markdown source, e.g. `./setup.md#install`
    MarkdownFile,
    /// Site route, absolute (`/docs/intro`) or relative (`../intro`)
    Internal,
}

/// A link in a doc body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    pub target: String,
    pub kind: LinkKind,
    /// Line the link starts on, counted from the top of the file (1-indexed)
    pub line: usize,
}

impl DocLink {
    pub fn new(target: impl Into<String>, line: usize) -> Self {
        let target = target.into();
        let kind = classify(&target);
        Self { target, kind, line }
    }
}

/// Classify a link target.
pub fn classify(target: &str) -> LinkKind {
    if target.starts_with('#') {
        return LinkKind::Anchor;
    }
    if target.starts_with("//") || has_scheme(target) {
        return LinkKind::External;
    }

    let (path, _) = split_suffix(target);
    if path.ends_with(".md") || path.ends_with(".mdx") {
        LinkKind::MarkdownFile
    } else {
        LinkKind::Internal
    }
}

/// Split a target into its path and the `?query` / `#fragment` suffix.
pub fn split_suffix(target: &str) -> (&str, &str) {
    match target.find(['?', '#']) {
        Some(pos) => (&target[..pos], &target[pos..]),
        None => (target, ""),
    }
}

fn has_scheme(target: &str) -> bool {
    let Some(colon) = target.find(':') else {
        return false;
    };
    let scheme = &target[..colon];
    !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
