//! Site-wide chrome: navbar and footer resolved from the configuration.

use serde::Serialize;

use outsite_config::{join_base, FooterStyle, NavbarItem, NavbarItemKind, NavbarPosition, SiteConfig};

use crate::builder::BuildError;
use crate::docs::DocSet;
use crate::links::{is_site_path, BrokenLink, KnownRoutes};

/// A rendered link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
    /// Opens in a new tab
    pub external: bool,
}

impl Link {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            label: label.into(),
            external: !is_site_path(&href) && !href.starts_with('#'),
            href,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkGroup {
    pub title: String,
    pub items: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Logo {
    pub src: String,
    pub alt: String,
}

/// Everything the base template needs besides the page itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub site_title: String,
    pub tagline: String,
    pub base_url: String,
    pub favicon: Option<String>,
    pub navbar_title: String,
    pub logo: Option<Logo>,
    pub navbar_left: Vec<Link>,
    pub navbar_right: Vec<Link>,
    pub footer_style: &'static str,
    pub footer_links: Vec<LinkGroup>,
    pub copyright: Option<String>,
    /// Extra stylesheets, linked after the built-in one
    pub styles: Vec<String>,
    pub sidebar_hideable: bool,
}

impl Layout {
    /// Resolve navbar and footer links. Doc items must name an existing doc.
    pub fn new(
        site: &SiteConfig,
        docs: &DocSet,
        year: i32,
        styles: Vec<String>,
    ) -> Result<Self, BuildError> {
        let base_url = site.base_url.as_str();
        let theme = &site.theme_config;

        let mut navbar_left = Vec::new();
        let mut navbar_right = Vec::new();
        for item in &theme.navbar.items {
            let link = navbar_link(item, docs, base_url)?;
            match item.position {
                NavbarPosition::Left => navbar_left.push(link),
                NavbarPosition::Right => navbar_right.push(link),
            }
        }

        let footer_links = theme
            .footer
            .links
            .iter()
            .map(|group| LinkGroup {
                title: group.title.clone(),
                items: group
                    .items
                    .iter()
                    .filter_map(|item| {
                        item.resolved_href(base_url)
                            .map(|href| Link::new(&item.label, href))
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            site_title: site.title.clone(),
            tagline: site.tagline.clone(),
            base_url: site.base_url.clone(),
            favicon: site.favicon.as_deref().map(|f| static_href(base_url, f)),
            navbar_title: site.navbar_title().to_string(),
            logo: theme.navbar.logo.as_ref().map(|logo| Logo {
                src: static_href(base_url, &logo.src),
                alt: logo.alt.clone(),
            }),
            navbar_left,
            navbar_right,
            footer_style: match theme.footer.style {
                FooterStyle::Dark => "dark",
                FooterStyle::Light => "light",
            },
            footer_links,
            copyright: theme.footer.copyright_for(year),
            styles,
            sidebar_hideable: theme.docs.sidebar.hideable,
        })
    }

    /// Site-internal navbar and footer links that point nowhere.
    pub fn broken_links(&self, known: &KnownRoutes) -> Vec<BrokenLink> {
        let navbar = self
            .navbar_left
            .iter()
            .chain(&self.navbar_right)
            .map(|link| ("navbar", link));
        let footer = self
            .footer_links
            .iter()
            .flat_map(|group| &group.items)
            .map(|link| ("footer", link));

        navbar
            .chain(footer)
            .filter(|(_, link)| is_site_path(&link.href) && !known.contains(&link.href))
            .map(|(source, link)| BrokenLink {
                source: source.to_string(),
                target: link.href.clone(),
                line: None,
            })
            .collect()
    }
}

fn navbar_link(item: &NavbarItem, docs: &DocSet, base_url: &str) -> Result<Link, BuildError> {
    let href = match item.kind {
        NavbarItemKind::Doc => {
            let doc_id = item.doc_id.as_deref().unwrap_or_default();
            let doc = docs.by_id(doc_id).ok_or_else(|| BuildError::UnknownDoc {
                doc_id: doc_id.to_string(),
                label: item.label.clone(),
            })?;
            doc.route.clone()
        }
        NavbarItemKind::Link => item.link_href(base_url).unwrap_or_default(),
    };
    Ok(Link::new(&item.label, href))
}

/// Href for a file in the static directory.
pub fn static_href(base_url: &str, path: &str) -> String {
    if path.contains("://") {
        path.to_string()
    } else {
        join_base(base_url, &format!("/{}", path.trim_start_matches('/')))
    }
}
