//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Datelike;
use rayon::prelude::*;

use outsite_config::{ConfigError, LinkPolicy, SiteConfig};
use outsite_content::render_html;

use crate::assets::AssetPipeline;
use crate::docs::{normalize_route, output_path, DocPage, DocSet};
use crate::features::FEATURE_LIST;
use crate::layout::{static_href, Layout, Link};
use crate::links::{enforce, is_site_path, BrokenLink, KnownRoutes, LinkResolver, Resolved};
use crate::sidebar::{build_sidebar, reading_order, with_active, SidebarItem};
use crate::templates::{DocContext, HomeContext, TemplateEngine, TocEntry};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site descriptor, shared read-only
    pub site: Arc<SiteConfig>,

    /// Site root; docs and static paths resolve against it
    pub root: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,
}

impl BuildConfig {
    pub fn new(site: Arc<SiteConfig>, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            site,
            output_dir: root.join("build"),
            root,
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, homepage included
    pub pages: usize,

    /// Broken links reported as warnings
    pub broken_links: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse doc: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Duplicate route {route}: {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },

    #[error("Navbar item `{label}` points at unknown doc `{doc_id}`")]
    UnknownDoc { doc_id: String, label: String },

    #[error("Missing static asset: {path}")]
    MissingAsset { path: String },

    #[error("Found broken {kind}s:{}", list_links(.links))]
    BrokenLinks {
        kind: &'static str,
        links: Vec<BrokenLink>,
    },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

fn list_links(links: &[BrokenLink]) -> String {
    links.iter().map(|link| format!("\n  - {}", link)).collect()
}

/// A doc rendered in memory, with what its links turned up.
struct RenderedDoc {
    route: String,
    html: String,
    broken_markdown: Vec<BrokenLink>,
    broken: Vec<BrokenLink>,
}

/// Shared state for rendering docs.
struct RenderContext<'a> {
    docs: &'a DocSet,
    layout: &'a Layout,
    sidebar: &'a [SidebarItem],
    order: &'a [(String, String)],
    known: &'a KnownRoutes,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    ///
    /// Every page is rendered and every link checked before anything is
    /// written, so a build that fails on broken links leaves the output
    /// directory untouched.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let site = self.config.site.as_ref();
        let base_url = site.base_url.as_str();

        site.validate()?;

        let docs_dir = self.config.root.join(&site.preset.docs.path);
        let docs = DocSet::discover(&docs_dir, &site.preset.docs, base_url)?;
        tracing::info!("Found {} docs in {}", docs.len(), docs_dir.display());

        let static_dir = self.config.root.join(&site.static_dir);
        let static_files = AssetPipeline::scan_static(&static_dir);

        let home_route = normalize_route(base_url);
        let render_home = docs.pages().iter().all(|page| page.route != home_route);
        if !render_home {
            tracing::debug!("A doc is served at {}, skipping the homepage", home_route);
        }
        self.check_assets(&static_files, render_home)?;

        let custom_css = self.read_custom_css()?;
        let styles = match custom_css {
            Some(_) => vec![format!("{}assets/custom.css", base_url)],
            None => Vec::new(),
        };

        let known = self.known_routes(&docs, &static_files);
        let layout = Layout::new(site, &docs, chrono::Local::now().year(), styles)?;
        let sidebar = build_sidebar(&docs, site.preset.docs.sidebar_collapsed);
        let order = reading_order(&sidebar);

        let ctx = RenderContext {
            docs: &docs,
            layout: &layout,
            sidebar: &sidebar,
            order: &order,
            known: &known,
        };

        // Render pages in parallel
        let results: Vec<Result<RenderedDoc, BuildError>> = docs
            .pages()
            .par_iter()
            .map(|page| self.render_doc(page, &ctx))
            .collect();

        let mut pages = Vec::with_capacity(results.len() + 1);
        let mut broken_markdown = Vec::new();
        let mut broken = layout.broken_links(&known);

        for result in results {
            let rendered = result?;
            broken_markdown.extend(rendered.broken_markdown);
            broken.extend(rendered.broken);
            pages.push((rendered.route, rendered.html));
        }

        if render_home {
            let home = HomeContext {
                get_started: order.first().map(|(_, route)| route.clone()),
            };
            let html = self
                .templates
                .render_home(&layout, &home, FEATURE_LIST)
                .map_err(|e| BuildError::TemplateError(e.to_string()))?;
            pages.push((home_route, html));
        }

        let not_found = self
            .templates
            .render_not_found(&layout)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        enforce(site.on_broken_markdown_links, "markdown link", &broken_markdown)?;
        enforce(site.on_broken_links, "link", &broken)?;

        self.write_pages(&pages, &not_found)?;

        AssetPipeline::copy_static(&static_dir, &self.config.output_dir, &static_files)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", static_dir.display(), e)))?;

        self.generate_assets(custom_css)?;
        self.generate_sitemap(&pages)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            broken_links: warned(site.on_broken_markdown_links, &broken_markdown)
                + warned(site.on_broken_links, &broken),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Feature icons must exist; a missing favicon or logo only warns.
    fn check_assets(&self, static_files: &[String], home: bool) -> Result<(), BuildError> {
        let site = &self.config.site;
        let present: HashSet<&str> = static_files.iter().map(String::as_str).collect();
        let exists = |path: &str| path.contains("://") || present.contains(path.trim_start_matches('/'));

        if home {
            if let Some(feature) = FEATURE_LIST.iter().find(|f| !exists(f.icon)) {
                return Err(BuildError::MissingAsset {
                    path: site.static_dir.join(feature.icon).display().to_string(),
                });
            }
        }

        let logo = site.theme_config.navbar.logo.as_ref().map(|logo| logo.src.as_str());
        for path in site.favicon.as_deref().into_iter().chain(logo) {
            if !exists(path) {
                tracing::warn!("Static file not found: {}", site.static_dir.join(path).display());
            }
        }

        Ok(())
    }

    fn read_custom_css(&self) -> Result<Option<String>, BuildError> {
        let Some(path) = &self.config.site.preset.theme.custom_css else {
            return Ok(None);
        };

        let path = self.config.root.join(path);
        if !path.is_file() {
            return Err(BuildError::MissingAsset {
                path: path.display().to_string(),
            });
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))
    }

    /// Every route and file the finished site serves.
    fn known_routes(&self, docs: &DocSet, static_files: &[String]) -> KnownRoutes {
        let base_url = self.config.site.base_url.as_str();
        let mut known = KnownRoutes::default();

        known.insert(base_url);
        for page in docs.pages() {
            known.insert(&page.route);
        }
        for file in static_files {
            known.insert(&static_href(base_url, file));
        }
        for generated in ["404.html", "sitemap.xml", "assets/main.css", "assets/main.js"] {
            known.insert(&format!("{}{}", base_url, generated));
        }

        known
    }

    /// Render a single doc.
    fn render_doc(&self, page: &DocPage, ctx: &RenderContext<'_>) -> Result<RenderedDoc, BuildError> {
        let site = &self.config.site;
        let resolver = LinkResolver::new(ctx.docs, &site.base_url);
        // The renderer visits link and image targets in the order the parser
        // recorded them, so each one pairs with its own line.
        let mut recorded = page.doc.links.iter();

        let mut broken_markdown = Vec::new();
        let mut broken = Vec::new();

        let content = render_html(&page.doc.content, &page.doc.toc, |target| {
            let line = recorded
                .next()
                .filter(|link| link.target == target)
                .map(|link| link.line);
            let report = || BrokenLink {
                source: page.route.clone(),
                target: target.to_string(),
                line,
            };

            match resolver.resolve(page, target) {
                Resolved::Keep => None,
                Resolved::MissingDoc => {
                    broken_markdown.push(report());
                    None
                }
                Resolved::OutsideSite => {
                    broken.push(report());
                    None
                }
                Resolved::Route(route) => {
                    if is_site_path(&route) && !ctx.known.contains(&route) {
                        broken.push(report());
                    }
                    Some(route)
                }
            }
        });

        let hide_toc = page
            .doc
            .frontmatter
            .as_ref()
            .is_some_and(|f| f.hide_table_of_contents);
        let toc = if hide_toc {
            Vec::new()
        } else {
            page.doc
                .toc
                .iter()
                .filter(|entry| (2..=3).contains(&entry.level))
                .map(|entry| TocEntry {
                    title: entry.title.clone(),
                    id: entry.id.clone(),
                    level: entry.level,
                })
                .collect()
        };

        let position = ctx.order.iter().position(|(_, route)| *route == page.route);
        let neighbor = |index: Option<usize>| {
            index
                .and_then(|i| ctx.order.get(i))
                .map(|(label, route)| Link::new(label, route))
        };

        let context = DocContext {
            title: page.title(),
            description: page.description().map(str::to_string),
            content,
            sidebar: with_active(ctx.sidebar, &page.route),
            toc,
            edit_url: site.preset.docs.edit_link(&page.relative_path),
            previous: neighbor(position.and_then(|i| i.checked_sub(1))),
            next: neighbor(position.map(|i| i + 1)),
        };

        let html = self
            .templates
            .render_doc(ctx.layout, &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", page.id, e)))?;

        Ok(RenderedDoc {
            route: page.route.clone(),
            html,
            broken_markdown,
            broken,
        })
    }

    fn write_pages(&self, pages: &[(String, String)], not_found: &str) -> Result<(), BuildError> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for (route, html) in pages {
            let path = output_path(output_dir, &self.config.site.base_url, route);
            write_file(&path, html)?;
        }

        write_file(&output_dir.join("404.html"), not_found)
    }

    /// Write CSS and JS assets.
    fn generate_assets(&self, custom_css: Option<String>) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");

        let css = AssetPipeline::generate_css(&self.config.site.theme_config.prism);
        write_file(&assets_dir.join("main.css"), &self.minify(css))?;
        write_file(&assets_dir.join("main.js"), &AssetPipeline::generate_js())?;

        if let Some(css) = custom_css {
            write_file(&assets_dir.join("custom.css"), &self.minify(css))?;
        }

        Ok(())
    }

    fn minify(&self, css: String) -> String {
        if !self.config.minify {
            return css;
        }
        match AssetPipeline::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("{}, writing CSS unminified", e);
                css
            }
        }
    }

    fn generate_sitemap(&self, pages: &[(String, String)]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|(route, _)| {
                format!(
                    "  <url>\n    <loc>{}</loc>\n  </url>",
                    xml_escape(&self.config.site.absolute_url(route))
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        write_file(&self.config.output_dir.join("sitemap.xml"), &sitemap)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }
    fs::write(path, content)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

fn warned(policy: LinkPolicy, links: &[BrokenLink]) -> usize {
    if policy == LinkPolicy::Warn {
        links.len()
    } else {
        0
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const CONFIG: &str = r#"
title = "Outserv"
tagline = "Blockchain data, served over GraphQL"
url = "https://outserv.example"
baseUrl = "/"
favicon = "img/favicon.ico"

[preset.docs]
editUrl = "https://github.com/outcaste-io/docs/tree/main"

[[themeConfig.navbar.items]]
type = "doc"
docId = "intro"
label = "Docs"
"#;

    fn fixture(intro: &str) -> TempDir {
        let temp = tempdir().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("docs/guide")).unwrap();
        fs::write(root.join("docs/intro.md"), intro).unwrap();
        fs::write(
            root.join("docs/guide/setup.md"),
            "---\nsidebar_position: 1\n---\n# Setup\n\n## Install\n\nRun it.",
        )
        .unwrap();

        fs::create_dir_all(root.join("static/img")).unwrap();
        for feature in FEATURE_LIST {
            fs::write(root.join("static").join(feature.icon), "<svg/>").unwrap();
        }
        fs::write(root.join("static/img/favicon.ico"), "").unwrap();

        temp
    }

    fn config(temp: &TempDir, edit: impl FnOnce(&mut SiteConfig)) -> BuildConfig {
        let mut site = SiteConfig::from_toml_str(CONFIG).unwrap();
        edit(&mut site);
        BuildConfig::new(Arc::new(site), temp.path())
    }

    async fn build(config: BuildConfig) -> Result<BuildResult, BuildError> {
        StaticBuilder::new(config).build().await
    }

    #[tokio::test]
    async fn builds_simple_site() {
        let temp = fixture("---\nsidebar_position: 0\n---\n# Intro\n\nSee [setup](guide/setup.md).");
        let out = temp.path().join("build");

        let result = build(config(&temp, |_| {})).await.unwrap();

        assert_eq!(result.pages, 3);
        assert_eq!(result.broken_links, 0);
        assert!(out.join("index.html").exists());
        assert!(out.join("404.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("assets/main.js").exists());
        assert!(out.join("img/favicon.ico").exists());

        let intro = fs::read_to_string(out.join("docs/intro/index.html")).unwrap();
        assert!(intro.contains("href=\"/docs/guide/setup\""));
        assert!(intro.contains("Edit this page"));
        assert!(intro.contains("pagination-nav__link--next"));

        let setup = fs::read_to_string(out.join("docs/guide/setup/index.html")).unwrap();
        assert!(setup.contains("href=\"#install\""));

        let sitemap = fs::read_to_string(out.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>https://outserv.example/docs/intro</loc>"));
        assert!(sitemap.contains("<loc>https://outserv.example/</loc>"));
    }

    #[tokio::test]
    async fn homepage_shows_features() {
        let temp = fixture("# Intro");

        build(config(&temp, |_| {})).await.unwrap();

        let home = fs::read_to_string(temp.path().join("build/index.html")).unwrap();
        assert_eq!(home.matches("class=\"col col--4\"").count(), 3);
        assert!(home.contains("<h3>Fast GraphQL APIs</h3>"));
        assert!(home.contains("Get started"));
    }

    #[tokio::test]
    async fn broken_link_fails_by_default() {
        let temp = fixture("# Intro\n\n[gone](/docs/missing)");

        let err = build(config(&temp, |_| {})).await.unwrap_err();

        match err {
            BuildError::BrokenLinks { kind, links } => {
                assert_eq!(kind, "link");
                assert_eq!(links.len(), 1);
                assert_eq!(links[0].target, "/docs/missing");
                assert_eq!(links[0].line, Some(3));
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!temp.path().join("build").exists());
    }

    #[tokio::test]
    async fn warn_policy_continues() {
        let temp = fixture("# Intro\n\n[gone](/docs/missing)");

        let result = build(config(&temp, |site| site.on_broken_links = LinkPolicy::Warn))
            .await
            .unwrap();

        assert_eq!(result.broken_links, 1);
        assert!(temp.path().join("build/docs/intro/index.html").exists());
    }

    #[tokio::test]
    async fn broken_markdown_link_warns_by_default() {
        let temp = fixture("# Intro\n\n[gone](missing.md)");

        let result = build(config(&temp, |_| {})).await.unwrap();

        assert_eq!(result.broken_links, 1);
    }

    #[tokio::test]
    async fn broken_markdown_link_can_fail() {
        let temp = fixture("# Intro\n\n[gone](missing.md)");

        let err = build(config(&temp, |site| {
            site.on_broken_markdown_links = LinkPolicy::Throw
        }))
        .await
        .unwrap_err();

        assert!(matches!(err, BuildError::BrokenLinks { kind: "markdown link", .. }));
    }

    #[tokio::test]
    async fn ignore_policy_reports_nothing() {
        let temp = fixture("# Intro\n\n[gone](/docs/missing)");

        let result = build(config(&temp, |site| site.on_broken_links = LinkPolicy::Ignore))
            .await
            .unwrap();

        assert_eq!(result.pages, 3);
        assert_eq!(result.broken_links, 0);
    }

    #[tokio::test]
    async fn missing_feature_icon_fails() {
        let temp = fixture("# Intro");
        fs::remove_file(temp.path().join("static").join(FEATURE_LIST[1].icon)).unwrap();

        let err = build(config(&temp, |_| {})).await.unwrap_err();

        assert!(matches!(err, BuildError::MissingAsset { ref path } if path.contains("tree")));
    }

    #[tokio::test]
    async fn invalid_config_fails_before_reading_docs() {
        let temp = fixture("# Intro");

        let err = build(config(&temp, |site| site.title.clear())).await.unwrap_err();

        assert!(matches!(err, BuildError::Config(ConfigError::Invalid(_))));
    }

    #[tokio::test]
    async fn prefixes_base_url() {
        let temp = fixture("# Intro\n\n[setup](/docs/guide/setup)");

        build(config(&temp, |site| site.base_url = "/outserv/".to_string()))
            .await
            .unwrap();

        let out = temp.path().join("build");
        let intro = fs::read_to_string(out.join("docs/intro/index.html"))
            .unwrap()
            .replace("&#x2f;", "/");
        assert!(intro.contains("href=\"/outserv/docs/guide/setup\""));
        assert!(intro.contains("href=\"/outserv/assets/main.css\""));
        assert!(out.join("index.html").exists());
    }

    #[tokio::test]
    async fn prefixes_base_url_on_images() {
        let temp = fixture("# Intro\n\n![mountain](/img/undraw_docusaurus_mountain.svg)");

        build(config(&temp, |site| site.base_url = "/outserv/".to_string()))
            .await
            .unwrap();

        let intro = fs::read_to_string(temp.path().join("build/docs/intro/index.html")).unwrap();
        assert!(intro.contains("src=\"/outserv/img/undraw_docusaurus_mountain.svg\""));
    }

    #[tokio::test]
    async fn missing_image_is_a_broken_link() {
        let temp = fixture("# Intro\n\n![gone](/img/gone.png)");

        let err = build(config(&temp, |site| site.base_url = "/outserv/".to_string()))
            .await
            .unwrap_err();

        match err {
            BuildError::BrokenLinks { kind, links } => {
                assert_eq!(kind, "link");
                assert_eq!(links[0].target, "/img/gone.png");
                assert_eq!(links[0].line, Some(3));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn reports_each_occurrence_on_its_own_line() {
        let temp = fixture("# Intro\n\n[gone](/docs/missing)\n\n[again](/docs/missing)");

        let err = build(config(&temp, |_| {})).await.unwrap_err();

        match err {
            BuildError::BrokenLinks { links, .. } => {
                let lines: Vec<_> = links.iter().map(|l| l.line).collect();
                assert_eq!(lines, vec![Some(3), Some(5)]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn link_above_site_root_is_broken() {
        let temp = fixture("# Intro\n\n[up](../../../elsewhere)");

        let err = build(config(&temp, |_| {})).await.unwrap_err();

        assert!(matches!(
            err,
            BuildError::BrokenLinks { ref links, .. } if links[0].target == "../../../elsewhere"
        ));
    }

    #[tokio::test]
    async fn copies_custom_css() {
        let temp = fixture("# Intro");
        fs::create_dir_all(temp.path().join("src/css")).unwrap();
        fs::write(temp.path().join("src/css/custom.css"), ":root { --primary: #ff0000; }").unwrap();

        build(config(&temp, |site| {
            site.preset.theme.custom_css = Some(PathBuf::from("src/css/custom.css"))
        }))
        .await
        .unwrap();

        let out = temp.path().join("build");
        assert!(out.join("assets/custom.css").exists());
        let intro = fs::read_to_string(out.join("docs/intro/index.html"))
            .unwrap()
            .replace("&#x2f;", "/");
        assert!(intro.contains("href=\"/assets/custom.css\""));
    }

    #[tokio::test]
    async fn unknown_navbar_doc_fails() {
        let temp = fixture("---\nid: start\n---\n# Intro");

        let err = build(config(&temp, |_| {})).await.unwrap_err();

        assert!(matches!(err, BuildError::UnknownDoc { ref doc_id, .. } if doc_id == "intro"));
    }
}
