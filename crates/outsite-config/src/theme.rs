//! `[themeConfig]`: navbar, footer, docs sidebar and code colors.

use serde::{Deserialize, Serialize};

/// `[themeConfig]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub navbar: Navbar,
    pub docs: DocsThemeConfig,
    pub footer: Footer,
    pub prism: PrismConfig,
}

/// Top navigation bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Navbar {
    /// Text next to the logo; the site title is used when empty
    pub title: Option<String>,
    pub logo: Option<NavbarLogo>,
    pub items: Vec<NavbarItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarLogo {
    pub alt: String,
    /// Path relative to the static directory
    pub src: String,
}

/// Kind of navbar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarItemKind {
    /// Points at a doc by id
    Doc,
    /// Plain `href` or `to` link
    #[default]
    Link,
}

/// Which side of the navbar an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// A single navbar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarItem {
    #[serde(rename = "type")]
    pub kind: NavbarItemKind,
    pub label: String,
    pub position: NavbarPosition,
    pub doc_id: Option<String>,
    pub href: Option<String>,
    pub to: Option<String>,
}

impl NavbarItem {
    /// Resolved href of a link item. Doc items resolve through the doc
    /// table and return `None` here.
    pub fn link_href(&self, base_url: &str) -> Option<String> {
        if self.kind == NavbarItemKind::Doc {
            return None;
        }
        resolve_link(self.href.as_deref(), self.to.as_deref(), base_url)
    }
}

/// `[themeConfig.docs]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocsThemeConfig {
    pub sidebar: SidebarConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SidebarConfig {
    /// Show a button that hides the sidebar
    pub hideable: bool,
}

/// Footer color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Dark,
    #[default]
    Light,
}

/// Page footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Footer {
    pub style: FooterStyle,
    pub links: Vec<FooterLinkGroup>,
    /// `{year}` is replaced with the build year
    pub copyright: Option<String>,
}

impl Footer {
    /// Copyright line for the given year.
    pub fn copyright_for(&self, year: i32) -> Option<String> {
        self.copyright
            .as_ref()
            .map(|c| c.replace("{year}", &year.to_string()))
    }
}

/// Titled column of footer links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterLinkGroup {
    pub title: String,
    pub items: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterLink {
    pub label: String,
    pub href: Option<String>,
    pub to: Option<String>,
}

impl FooterLink {
    /// Resolved href: `to` gets the base URL, `href` is taken verbatim.
    pub fn resolved_href(&self, base_url: &str) -> Option<String> {
        resolve_link(self.href.as_deref(), self.to.as_deref(), base_url)
    }
}

/// `[themeConfig.prism]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrismConfig {
    pub theme: CodeTheme,
    pub dark_theme: CodeTheme,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: CodeTheme::Github,
            dark_theme: CodeTheme::Dracula,
        }
    }
}

/// Code block color theme, selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeTheme {
    Github,
    Dracula,
    VsDark,
    Nord,
    OneLight,
}

/// Colors a code theme contributes to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub highlight: &'static str,
}

impl CodeTheme {
    pub fn palette(&self) -> Palette {
        match self {
            Self::Github => Palette {
                background: "#f6f8fa",
                foreground: "#393a34",
                highlight: "#e2e6ea",
            },
            Self::Dracula => Palette {
                background: "#282a36",
                foreground: "#f8f8f2",
                highlight: "#44475a",
            },
            Self::VsDark => Palette {
                background: "#1e1e1e",
                foreground: "#d4d4d4",
                highlight: "#264f78",
            },
            Self::Nord => Palette {
                background: "#2e3440",
                foreground: "#d8dee9",
                highlight: "#3b4252",
            },
            Self::OneLight => Palette {
                background: "#fafafa",
                foreground: "#383a42",
                highlight: "#e5e5e6",
            },
        }
    }
}

/// `to` is site-relative and gets the base URL; `href` wins when both are set.
pub fn resolve_link(href: Option<&str>, to: Option<&str>, base_url: &str) -> Option<String> {
    if let Some(href) = href {
        return Some(href.to_string());
    }
    to.map(|to| join_base(base_url, to))
}

/// Prefix a site-relative path with the base URL. Absolute URLs and
/// relative paths pass through unchanged.
pub fn join_base(base_url: &str, to: &str) -> String {
    match to.strip_prefix('/') {
        Some(rest) if !to.starts_with("//") => {
            format!("{}/{}", base_url.trim_end_matches('/'), rest)
        }
        _ => to.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url() {
        assert_eq!(join_base("/", "/docs/intro"), "/docs/intro");
        assert_eq!(join_base("/outserv/", "/docs/intro"), "/outserv/docs/intro");
        assert_eq!(
            join_base("/outserv/", "https://manishrjain.com"),
            "https://manishrjain.com"
        );
        assert_eq!(join_base("/outserv/", "//cdn.example.com/x"), "//cdn.example.com/x");
    }

    #[test]
    fn footer_link_prefers_href() {
        let link = FooterLink {
            label: "GitHub".to_string(),
            href: Some("https://github.com/outcaste-io/outserv".to_string()),
            to: None,
        };
        assert_eq!(
            link.resolved_href("/base/").as_deref(),
            Some("https://github.com/outcaste-io/outserv")
        );

        let link = FooterLink {
            label: "Tutorial".to_string(),
            href: None,
            to: Some("/docs/intro".to_string()),
        };
        assert_eq!(link.resolved_href("/base/").as_deref(), Some("/base/docs/intro"));
    }

    #[test]
    fn doc_items_have_no_link_href() {
        let item = NavbarItem {
            kind: NavbarItemKind::Doc,
            doc_id: Some("intro".to_string()),
            label: "Docs".to_string(),
            ..Default::default()
        };
        assert!(item.link_href("/").is_none());
    }

    #[test]
    fn substitutes_copyright_year() {
        let footer = Footer {
            copyright: Some("Copyright © {year} Outcaste LLC.".to_string()),
            ..Default::default()
        };
        assert_eq!(
            footer.copyright_for(2026).as_deref(),
            Some("Copyright © 2026 Outcaste LLC.")
        );
    }

    #[test]
    fn parses_code_theme_names() {
        let prism: PrismConfig =
            toml::from_str("theme = \"one-light\"\ndarkTheme = \"vs-dark\"").unwrap();
        assert_eq!(prism.theme, CodeTheme::OneLight);
        assert_eq!(prism.dark_theme, CodeTheme::VsDark);

        assert!(toml::from_str::<PrismConfig>("theme = \"solarized\"").is_err());
    }

    #[test]
    fn navbar_item_defaults_to_left_link() {
        let item: NavbarItem = toml::from_str("label = \"Blog\"\nto = \"/blog\"").unwrap();
        assert_eq!(item.kind, NavbarItemKind::Link);
        assert_eq!(item.position, NavbarPosition::Left);
    }
}
