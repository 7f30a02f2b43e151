//! Link resolution and broken link policies.

use std::collections::HashSet;
use std::fmt;

use outsite_config::{join_base, LinkPolicy};
use outsite_content::{links::classify, split_suffix, LinkKind};

use crate::builder::BuildError;
use crate::docs::{normalize_route, normalize_segments, DocPage, DocSet};

/// A link whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Route of the linking page, or `navbar` / `footer`
    pub source: String,
    pub target: String,
    pub line: Option<usize>,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{} (line {}) -> {}", self.source, line, self.target),
            None => write!(f, "{} -> {}", self.source, self.target),
        }
    }
}

/// Result of resolving one link target from a doc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Leave the target alone (external, anchors)
    Keep,
    /// Site route the link points at, with its `?query` / `#fragment`
    Route(String),
    /// Markdown file link with no matching doc
    MissingDoc,
    /// Relative path that climbs above the site root
    OutsideSite,
}

/// Resolves doc link targets against the doc table.
pub struct LinkResolver<'a> {
    docs: &'a DocSet,
    base_url: &'a str,
}

impl<'a> LinkResolver<'a> {
    pub fn new(docs: &'a DocSet, base_url: &'a str) -> Self {
        Self { docs, base_url }
    }

    pub fn resolve(&self, from: &DocPage, target: &str) -> Resolved {
        let (path, suffix) = split_suffix(target);

        match classify(target) {
            LinkKind::External | LinkKind::Anchor => Resolved::Keep,
            LinkKind::MarkdownFile => match self.docs.by_markdown_link(from, path) {
                Some(doc) => Resolved::Route(format!("{}{}", doc.route, suffix)),
                None => Resolved::MissingDoc,
            },
            LinkKind::Internal if path.starts_with('/') => {
                Resolved::Route(format!("{}{}", join_base(self.base_url, path), suffix))
            }
            LinkKind::Internal => {
                // Relative to the directory the page's route sits in.
                let dir = from.route.rsplit_once('/').map_or("", |(dir, _)| dir);
                match normalize_segments(&format!("{}/{}", dir, path)) {
                    Some(joined) => Resolved::Route(format!("/{}{}", joined, suffix)),
                    None => Resolved::OutsideSite,
                }
            }
        }
    }
}

/// Routes and static files that exist in the output.
#[derive(Debug, Default)]
pub struct KnownRoutes {
    routes: HashSet<String>,
}

impl KnownRoutes {
    pub fn insert(&mut self, route: &str) {
        self.routes.insert(normalize_route(route));
    }

    /// Whether a site-absolute target resolves. Query and fragment are ignored.
    pub fn contains(&self, target: &str) -> bool {
        let (path, _) = split_suffix(target);
        let path = path.strip_suffix("index.html").unwrap_or(path);
        self.routes.contains(&normalize_route(path))
    }
}

/// Internal targets of config-defined links (navbar, footer) worth checking.
pub fn is_site_path(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// Apply a policy to the broken links of one class.
pub fn enforce(policy: LinkPolicy, kind: &'static str, broken: &[BrokenLink]) -> Result<(), BuildError> {
    if broken.is_empty() {
        return Ok(());
    }

    match policy {
        LinkPolicy::Throw => Err(BuildError::BrokenLinks {
            kind,
            links: broken.to_vec(),
        }),
        LinkPolicy::Warn => {
            for link in broken {
                tracing::warn!("Broken {}: {}", kind, link);
            }
            Ok(())
        }
        LinkPolicy::Ignore => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outsite_config::DocsOptions;
    use std::fs;

    fn docs() -> DocSet {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("guide")).unwrap();
        fs::write(temp.path().join("intro.md"), "# Intro").unwrap();
        fs::write(temp.path().join("guide/setup.md"), "# Setup").unwrap();
        DocSet::discover(temp.path(), &DocsOptions::default(), "/").unwrap()
    }

    fn broken(target: &str) -> BrokenLink {
        BrokenLink {
            source: "/docs/intro".to_string(),
            target: target.to_string(),
            line: Some(3),
        }
    }

    #[test]
    fn resolves_targets() {
        let docs = docs();
        let resolver = LinkResolver::new(&docs, "/");
        let setup = docs.by_id("guide/setup").unwrap();

        assert_eq!(resolver.resolve(setup, "https://example.com"), Resolved::Keep);
        assert_eq!(resolver.resolve(setup, "#install"), Resolved::Keep);
        assert_eq!(
            resolver.resolve(setup, "../intro.md#top"),
            Resolved::Route("/docs/intro#top".to_string())
        );
        assert_eq!(resolver.resolve(setup, "nope.md"), Resolved::MissingDoc);
        assert_eq!(
            resolver.resolve(setup, "/img/logo.svg"),
            Resolved::Route("/img/logo.svg".to_string())
        );
        assert_eq!(
            resolver.resolve(setup, "../intro"),
            Resolved::Route("/docs/intro".to_string())
        );
        assert_eq!(
            resolver.resolve(setup, "run?x=1"),
            Resolved::Route("/docs/guide/run?x=1".to_string())
        );
    }

    #[test]
    fn climbing_above_root_is_outside_site() {
        let docs = docs();
        let resolver = LinkResolver::new(&docs, "/");
        let setup = docs.by_id("guide/setup").unwrap();

        assert_eq!(resolver.resolve(setup, "../../../intro"), Resolved::OutsideSite);
        assert_eq!(resolver.resolve(setup, "../../../img/a.svg"), Resolved::OutsideSite);
    }

    #[test]
    fn prefixes_base_url_on_absolute_paths() {
        let docs = docs();
        let resolver = LinkResolver::new(&docs, "/outserv/");
        let intro = docs.by_id("intro").unwrap();

        assert_eq!(
            resolver.resolve(intro, "/docs/intro"),
            Resolved::Route("/outserv/docs/intro".to_string())
        );
    }

    #[test]
    fn matches_known_routes() {
        let mut known = KnownRoutes::default();
        known.insert("/docs/intro");
        known.insert("/");

        assert!(known.contains("/docs/intro/"));
        assert!(known.contains("/docs/intro#setup"));
        assert!(known.contains("/docs/intro/index.html"));
        assert!(known.contains("/"));
        assert!(!known.contains("/docs/missing"));
    }

    #[test]
    fn throw_fails_with_every_link() {
        let links = vec![broken("/a"), broken("/b")];

        let err = enforce(LinkPolicy::Throw, "link", &links).unwrap_err();

        match err {
            BuildError::BrokenLinks { kind, links } => {
                assert_eq!(kind, "link");
                assert_eq!(links.len(), 2);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn warn_and_ignore_continue() {
        let links = vec![broken("/a")];

        assert!(enforce(LinkPolicy::Warn, "markdown link", &links).is_ok());
        assert!(enforce(LinkPolicy::Ignore, "link", &links).is_ok());
        assert!(enforce(LinkPolicy::Throw, "link", &[]).is_ok());
    }

    #[test]
    fn displays_source_line() {
        assert_eq!(broken("/a").to_string(), "/docs/intro (line 3) -> /a");
    }
}
