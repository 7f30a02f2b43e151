//! Doc discovery, ids and routes.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use outsite_config::{join_base, DocsOptions};
use outsite_content::{parse_doc, ParsedDoc};

use crate::builder::BuildError;

/// A doc with its resolved id and route.
#[derive(Debug)]
pub struct DocPage {
    /// Doc id, e.g. `guide/setup`
    pub id: String,

    /// Route including the base URL, without trailing slash
    pub route: String,

    /// Source path relative to the docs directory
    pub relative_path: PathBuf,

    pub doc: ParsedDoc,
}

impl DocPage {
    pub fn title(&self) -> String {
        self.doc
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| self.id.rsplit('/').next().unwrap_or(&self.id).to_string())
    }

    pub fn sidebar_label(&self) -> String {
        self.doc
            .frontmatter
            .as_ref()
            .and_then(|f| f.sidebar_label.clone())
            .unwrap_or_else(|| self.title())
    }

    pub fn sidebar_position(&self) -> Option<i32> {
        self.doc.frontmatter.as_ref().and_then(|f| f.sidebar_position)
    }

    pub fn description(&self) -> Option<&str> {
        self.doc
            .frontmatter
            .as_ref()
            .and_then(|f| f.description.as_deref())
    }

    /// Directory of the source file relative to the docs dir, `/`-separated.
    pub fn source_dir(&self) -> String {
        self.relative_path
            .parent()
            .map(slash_path)
            .unwrap_or_default()
    }

    fn is_index(&self) -> bool {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("index"))
    }
}

/// All docs of a site, in discovery order (sorted by source path).
#[derive(Debug, Default)]
pub struct DocSet {
    pages: Vec<DocPage>,
    by_id: HashMap<String, usize>,
    by_source: HashMap<String, usize>,
}

impl DocSet {
    /// Read and parse every `.md` / `.mdx` file under `docs_dir`.
    pub fn discover(
        docs_dir: &Path,
        options: &DocsOptions,
        base_url: &str,
    ) -> Result<Self, BuildError> {
        if !docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                docs_dir.display()
            )));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(docs_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "md" && ext != "mdx" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_doc(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path.strip_prefix(docs_dir).unwrap_or(path).to_path_buf();
            pages.push(DocPage::new(relative_path, doc, options, base_url));
        }

        Self::from_pages(pages)
    }

    /// Index pages, rejecting duplicate ids and routes.
    pub fn from_pages(pages: Vec<DocPage>) -> Result<Self, BuildError> {
        let mut by_id = HashMap::new();
        let mut by_source = HashMap::new();
        let mut routes: HashMap<&str, &Path> = HashMap::new();

        for (i, page) in pages.iter().enumerate() {
            if let Some(other) = routes.insert(page.route.as_str(), &page.relative_path) {
                return Err(BuildError::DuplicateRoute {
                    route: page.route.clone(),
                    first: other.display().to_string(),
                    second: page.relative_path.display().to_string(),
                });
            }
            if let Some(first) = by_id.insert(page.id.clone(), i) {
                return Err(BuildError::DuplicateRoute {
                    route: format!("doc id `{}`", page.id),
                    first: pages[first].relative_path.display().to_string(),
                    second: page.relative_path.display().to_string(),
                });
            }
            by_source.insert(slash_path(&page.relative_path), i);
        }

        Ok(Self {
            pages,
            by_id,
            by_source,
        })
    }

    pub fn pages(&self) -> &[DocPage] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&DocPage> {
        self.by_id.get(id).map(|&i| &self.pages[i])
    }

    /// Find the doc a Markdown file link points at.
    ///
    /// Relative paths start at the linking doc's directory; a leading `/`
    /// starts at the docs directory.
    pub fn by_markdown_link(&self, from: &DocPage, path: &str) -> Option<&DocPage> {
        let joined = if let Some(absolute) = path.strip_prefix('/') {
            absolute.to_string()
        } else {
            let dir = from.source_dir();
            if dir.is_empty() {
                path.to_string()
            } else {
                format!("{}/{}", dir, path)
            }
        };

        let normalized = normalize_segments(&joined)?;
        self.by_source.get(&normalized).map(|&i| &self.pages[i])
    }
}

impl DocPage {
    fn new(relative_path: PathBuf, doc: ParsedDoc, options: &DocsOptions, base_url: &str) -> Self {
        let frontmatter = doc.frontmatter.as_ref();

        let stem_path = slash_path(&relative_path.with_extension(""));
        let id = match frontmatter.and_then(|f| f.id.as_deref()) {
            Some(custom) => match stem_path.rsplit_once('/') {
                Some((dir, _)) => format!("{}/{}", dir, custom),
                None => custom.to_string(),
            },
            None => stem_path,
        };

        let mut page = Self {
            id,
            route: String::new(),
            relative_path,
            doc,
        };
        page.route = page.compute_route(options, base_url);
        page
    }

    fn compute_route(&self, options: &DocsOptions, base_url: &str) -> String {
        let route_base = options.route_base_path.trim_matches('/');
        let dir = self.source_dir();
        let slug = self.doc.frontmatter.as_ref().and_then(|f| f.slug.as_deref());

        let path = match slug {
            Some(slug) if slug.starts_with('/') => slug.to_string(),
            Some(slug) => format!("/{}/{}/{}", route_base, dir, slug),
            None if self.is_index() => format!("/{}/{}", route_base, dir),
            None => format!("/{}/{}", route_base, self.id),
        };

        normalize_route(&join_base(base_url, &collapse_slashes(&path)))
    }
}

/// Path of the `index.html` a route is written to.
pub fn output_path(output_dir: &Path, base_url: &str, route: &str) -> PathBuf {
    let relative = route
        .strip_prefix(base_url.trim_end_matches('/'))
        .unwrap_or(route)
        .trim_matches('/');

    if relative.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(relative).join("index.html")
    }
}

/// Strip the trailing slash, except for the root route.
pub fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

/// Resolve `.` and `..` segments. `None` when the path climbs above its root.
pub fn normalize_segments(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Join path components with `/` regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
