//! Consumer-side checks of a loaded configuration.
//!
//! Loading never rejects well-typed values; the builder calls
//! [`SiteConfig::validate`] before it starts and reports every problem at once.

use url::Url;

use crate::error::{ConfigError, Issue};
use crate::site::SiteConfig;
use crate::theme::NavbarItemKind;

impl SiteConfig {
    /// Check field values, collecting all issues.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(Issue::new("title", "must not be empty"));
        }

        match Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => issues.push(Issue::new(
                "url",
                format!("scheme `{}` is not http or https", url.scheme()),
            )),
            Err(e) => issues.push(Issue::new("url", format!("not an absolute URL ({})", e))),
        }

        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            issues.push(Issue::new("baseUrl", "must start and end with `/`"));
        }

        let route_base = &self.preset.docs.route_base_path;
        if route_base.is_empty() || route_base.contains("//") {
            issues.push(Issue::new(
                "preset.docs.routeBasePath",
                "must be a non-empty path segment",
            ));
        }

        for (i, item) in self.theme_config.navbar.items.iter().enumerate() {
            let field = format!("themeConfig.navbar.items[{}]", i);
            match item.kind {
                NavbarItemKind::Doc => {
                    if item.doc_id.as_deref().map_or(true, str::is_empty) {
                        issues.push(Issue::new(&field, "doc items need a `docId`"));
                    }
                    if item.href.is_some() || item.to.is_some() {
                        issues.push(Issue::new(&field, "doc items take no `href` or `to`"));
                    }
                }
                NavbarItemKind::Link => {
                    check_link_target(&field, item.href.as_deref(), item.to.as_deref(), &mut issues)
                }
            }
        }

        for (g, group) in self.theme_config.footer.links.iter().enumerate() {
            for (i, link) in group.items.iter().enumerate() {
                let field = format!("themeConfig.footer.links[{}].items[{}]", g, i);
                check_link_target(&field, link.href.as_deref(), link.to.as_deref(), &mut issues);
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

/// Exactly one of `href` / `to`, each an absolute URL or a site-relative path.
fn check_link_target(
    field: &str,
    href: Option<&str>,
    to: Option<&str>,
    issues: &mut Vec<Issue>,
) {
    match (href, to) {
        (Some(_), Some(_)) => issues.push(Issue::new(field, "set either `href` or `to`, not both")),
        (None, None) => issues.push(Issue::new(field, "needs an `href` or a `to`")),
        (Some(target), None) | (None, Some(target)) => {
            if !is_absolute_url(target) && !target.starts_with('/') {
                issues.push(Issue::new(
                    field,
                    format!("`{}` is neither an absolute URL nor a site path", target),
                ));
            }
        }
    }
}

fn is_absolute_url(target: &str) -> bool {
    Url::parse(target).is_ok_and(|url| url.has_host() || url.scheme() == "mailto")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FooterLink, FooterLinkGroup, NavbarItem};

    fn base() -> SiteConfig {
        SiteConfig::from_toml_str("title = \"Outserv\"\nurl = \"https://outserv.example\"").unwrap()
    }

    fn issues(config: &SiteConfig) -> Vec<Issue> {
        match config.validate() {
            Err(ConfigError::Invalid(issues)) => issues,
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn accepts_minimal_config() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_relative_site_url() {
        let mut config = base();
        config.url = "outserv.example".to_string();

        let found = issues(&config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, "url");
    }

    #[test]
    fn rejects_base_url_without_slashes() {
        let mut config = base();
        config.base_url = "outserv".to_string();

        assert_eq!(issues(&config)[0].field, "baseUrl");
    }

    #[test]
    fn checks_navbar_items() {
        let mut config = base();
        config.theme_config.navbar.items = vec![
            NavbarItem {
                kind: NavbarItemKind::Doc,
                label: "Docs".to_string(),
                ..Default::default()
            },
            NavbarItem {
                label: "Both".to_string(),
                href: Some("https://example.com".to_string()),
                to: Some("/docs".to_string()),
                ..Default::default()
            },
        ];

        let found = issues(&config);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].field, "themeConfig.navbar.items[0]");
        assert_eq!(found[1].field, "themeConfig.navbar.items[1]");
    }

    #[test]
    fn checks_footer_targets() {
        let mut config = base();
        config.theme_config.footer.links = vec![FooterLinkGroup {
            title: "More".to_string(),
            items: vec![
                FooterLink {
                    label: "Blog".to_string(),
                    href: None,
                    to: Some("https://manishrjain.com".to_string()),
                },
                FooterLink {
                    label: "Broken".to_string(),
                    href: Some("not a url".to_string()),
                    to: None,
                },
                FooterLink {
                    label: "Empty".to_string(),
                    href: None,
                    to: None,
                },
            ],
        }];

        let found = issues(&config);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].field, "themeConfig.footer.links[0].items[1]");
        assert_eq!(found[1].field, "themeConfig.footer.links[0].items[2]");
    }
}
