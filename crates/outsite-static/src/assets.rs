//! Asset pipeline for CSS, JavaScript and the static directory.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use outsite_config::{Palette, PrismConfig};

use crate::docs::slash_path;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file, including the code theme colors.
    pub fn generate_css(prism: &PrismConfig) -> String {
        format!(
            "{}\n{}\n{}",
            DEFAULT_CSS,
            palette_rule(":root", &prism.theme.palette()),
            palette_rule("html[data-theme='dark']", &prism.dark_theme.palette()),
        )
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// List files under the static directory as `/`-separated relative paths.
    ///
    /// A missing directory has no files.
    pub fn scan_static(static_dir: &Path) -> Vec<String> {
        if !static_dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(static_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(static_dir)
                    .ok()
                    .map(slash_path)
            })
            .collect()
    }

    /// Copy the listed static files into the output root.
    pub fn copy_static(static_dir: &Path, output_dir: &Path, files: &[String]) -> io::Result<()> {
        for file in files {
            let target = output_dir.join(file);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(static_dir.join(file), target)?;
        }
        Ok(())
    }
}

fn palette_rule(selector: &str, palette: &Palette) -> String {
    format!(
        "{} {{\n  --code-background: {};\n  --code-foreground: {};\n  --code-highlight: {};\n}}\n",
        selector, palette.background, palette.foreground, palette.highlight
    )
}

// Layout tokens follow the Infima class names the templates use
// (navbar__*, footer__*, menu__*, col--*), so custom CSS written for
// those names keeps working.
const DEFAULT_CSS: &str = r#"/* Outserv docs theme */

:root {
  --background: #ffffff;
  --foreground: #1c1e21;
  --muted: #f5f6f7;
  --border: #dadde1;
  --primary: #2e8555;
  --primary-foreground: #ffffff;
  --navbar-height: 3.75rem;
  --sidebar-width: 280px;
  --toc-width: 220px;
  --content-max-width: 860px;
}

html[data-theme='dark'] {
  --background: #1b1b1d;
  --foreground: #e3e3e3;
  --muted: #242526;
  --border: #444950;
  --primary: #25c2a0;
  --primary-foreground: #1b1b1d;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.65;
  display: flex;
  flex-direction: column;
  min-height: 100vh;
}

a {
  color: var(--primary);
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

.container {
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

.main-wrapper {
  flex: 1 0 auto;
}

.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 -1rem;
}

.col {
  flex: 1 0;
  padding: 0 1rem;
}

.col--4 {
  flex: 0 0 33.333%;
  max-width: 33.333%;
}

.text--center {
  text-align: center;
}

.padding-horiz--md {
  padding-left: 1rem;
  padding-right: 1rem;
}

/* Navbar */
.navbar {
  position: sticky;
  top: 0;
  z-index: 10;
  height: var(--navbar-height);
  background: var(--background);
  border-bottom: 1px solid var(--border);
  padding: 0 1rem;
}

.navbar__inner {
  display: flex;
  justify-content: space-between;
  align-items: center;
  height: 100%;
}

.navbar__items {
  display: flex;
  align-items: center;
  gap: 1rem;
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  color: var(--foreground);
}

.navbar__logo {
  height: 2rem;
}

.navbar__link {
  color: var(--foreground);
  font-weight: 500;
}

.navbar__link:hover {
  color: var(--primary);
  text-decoration: none;
}

.color-mode-toggle {
  background: none;
  border: none;
  color: var(--foreground);
  cursor: pointer;
  font-size: 1.25rem;
}

/* Hero */
.hero {
  padding: 4rem 0;
  text-align: center;
}

.hero--primary {
  background: var(--primary);
  color: var(--primary-foreground);
}

.hero__title {
  font-size: 3rem;
}

.hero__subtitle {
  font-size: 1.5rem;
  margin: 1rem 0 2rem;
}

.button {
  display: inline-block;
  border-radius: 0.4rem;
  font-weight: 700;
  padding: 0.4rem 1.25rem;
}

.button--lg {
  font-size: 1.2rem;
  padding: 0.6rem 2rem;
}

.button--secondary {
  background: var(--muted);
  color: var(--foreground);
}

/* Features */
.features {
  display: flex;
  align-items: center;
  padding: 2rem 0;
  width: 100%;
}

.feature-svg {
  height: 200px;
  width: 200px;
}

.features h3 {
  margin: 1rem 0 0.5rem;
}

/* Docs layout */
.docs-wrapper {
  display: flex;
}

.doc-sidebar {
  width: var(--sidebar-width);
  flex-shrink: 0;
  border-right: 1px solid var(--border);
  padding: 1rem 0.5rem;
  position: sticky;
  top: var(--navbar-height);
  height: calc(100vh - var(--navbar-height));
  overflow-y: auto;
}

.docs-wrapper.sidebar-hidden .doc-sidebar {
  width: 2.5rem;
}

.docs-wrapper.sidebar-hidden .menu__list {
  display: none;
}

.doc-sidebar__hide {
  background: none;
  border: 1px solid var(--border);
  border-radius: 0.25rem;
  color: var(--foreground);
  cursor: pointer;
  margin-top: 1rem;
  padding: 0.25rem 0.5rem;
}

.menu__list {
  list-style: none;
}

.menu__list .menu__list {
  padding-left: 1rem;
}

.menu__list-item--collapsed > .menu__list {
  display: none;
}

.menu__link {
  display: block;
  color: var(--foreground);
  border-radius: 0.25rem;
  padding: 0.3rem 0.75rem;
}

.menu__link:hover {
  background: var(--muted);
  text-decoration: none;
}

.menu__link--active {
  color: var(--primary);
  background: var(--muted);
}

.menu__caret {
  cursor: pointer;
  font-weight: 600;
}

.doc-main {
  display: flex;
  flex: 1;
  padding: 2rem;
  gap: 2rem;
}

.doc {
  flex: 1;
  max-width: var(--content-max-width);
}

.markdown h1,
.markdown h2,
.markdown h3 {
  margin: 1.5rem 0 0.75rem;
  scroll-margin-top: calc(var(--navbar-height) + 0.5rem);
}

.markdown p,
.markdown ul,
.markdown ol,
.markdown table {
  margin-bottom: 1rem;
}

.markdown ul,
.markdown ol {
  padding-left: 1.5rem;
}

.markdown code {
  background: var(--code-background);
  color: var(--code-foreground);
  border-radius: 0.25rem;
  font-size: 0.9em;
  padding: 0.1rem 0.3rem;
}

.markdown pre {
  background: var(--code-background);
  color: var(--code-foreground);
  border-radius: 0.4rem;
  margin-bottom: 1rem;
  overflow-x: auto;
  padding: 1rem;
}

.markdown pre code {
  background: none;
  padding: 0;
}

.code-block-title {
  background: var(--code-highlight);
  color: var(--code-foreground);
  border-radius: 0.4rem 0.4rem 0 0;
  font-size: 0.85rem;
  padding: 0.5rem 1rem;
}

.code-block-title + pre {
  border-top-left-radius: 0;
  border-top-right-radius: 0;
}

.edit-this-page {
  display: inline-block;
  margin-top: 2rem;
}

.pagination-nav {
  display: flex;
  gap: 1rem;
  margin-top: 2rem;
}

.pagination-nav__link {
  flex: 1;
  border: 1px solid var(--border);
  border-radius: 0.4rem;
  padding: 1rem;
}

.pagination-nav__link--next {
  text-align: right;
}

.pagination-nav__sublabel {
  color: var(--foreground);
  font-size: 0.85rem;
}

.pagination-nav__label {
  font-weight: 700;
}

.toc {
  width: var(--toc-width);
  flex-shrink: 0;
  position: sticky;
  top: calc(var(--navbar-height) + 2rem);
  align-self: flex-start;
  font-size: 0.85rem;
}

.toc ul {
  list-style: none;
  border-left: 1px solid var(--border);
  padding-left: 0.75rem;
}

.toc-level-3 {
  padding-left: 0.75rem;
}

/* Footer */
.footer {
  padding: 2rem 0;
  background: var(--muted);
}

.footer--dark {
  background: #303846;
  color: #ebedf0;
}

.footer--dark a {
  color: #ebedf0;
}

.footer__links {
  margin-bottom: 1rem;
}

.footer__title {
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.footer__items {
  list-style: none;
}

.footer__copyright {
  text-align: center;
}

.not-found {
  padding: 4rem 1rem;
}

@media (max-width: 996px) {
  .col--4 {
    flex: 0 0 100%;
    max-width: 100%;
  }

  .doc-sidebar,
  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"// Outserv docs client script
(function () {
  'use strict';

  var root = document.documentElement;

  var toggle = document.querySelector('.color-mode-toggle');
  if (toggle) {
    toggle.addEventListener('click', function () {
      var next = root.getAttribute('data-theme') === 'dark' ? 'light' : 'dark';
      root.setAttribute('data-theme', next);
      localStorage.setItem('theme', next);
    });
  }

  var hide = document.querySelector('.doc-sidebar__hide');
  var wrapper = document.querySelector('.docs-wrapper');
  if (hide && wrapper) {
    hide.addEventListener('click', function () {
      var hidden = wrapper.classList.toggle('sidebar-hidden');
      hide.innerHTML = hidden ? '&raquo;' : '&laquo;';
    });
  }

  document.querySelectorAll('.menu__caret').forEach(function (caret) {
    caret.addEventListener('click', function () {
      caret.parentElement.classList.toggle('menu__list-item--collapsed');
    });
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use outsite_config::CodeTheme;

    #[test]
    fn includes_light_and_dark_code_palettes() {
        let css = AssetPipeline::generate_css(&PrismConfig {
            theme: CodeTheme::Github,
            dark_theme: CodeTheme::Nord,
        });

        assert!(css.contains("--code-background: #f6f8fa;"));
        assert!(css.contains("html[data-theme='dark'] {\n  --code-background: #2e3440;"));
    }

    #[test]
    fn minifies_generated_css() {
        let css = AssetPipeline::generate_css(&PrismConfig::default());

        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains(".navbar"));
    }

    #[test]
    fn scans_and_copies_static_files() {
        let temp = tempfile::tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("build");
        fs::create_dir_all(static_dir.join("img")).unwrap();
        fs::write(static_dir.join("img/logo.svg"), "<svg/>").unwrap();
        fs::write(static_dir.join("robots.txt"), "User-agent: *").unwrap();

        let files = AssetPipeline::scan_static(&static_dir);
        assert_eq!(files, vec!["img/logo.svg".to_string(), "robots.txt".to_string()]);

        AssetPipeline::copy_static(&static_dir, &out, &files).unwrap();
        assert!(out.join("img/logo.svg").exists());
        assert!(out.join("robots.txt").exists());
    }

    #[test]
    fn missing_static_dir_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        assert!(AssetPipeline::scan_static(&temp.path().join("static")).is_empty());
    }
}
