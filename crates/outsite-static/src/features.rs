//! Homepage feature list.

use serde::Serialize;

use crate::templates::TemplateEngine;

/// One homepage feature card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature<'a> {
    pub title: &'a str,
    /// Image path relative to the static directory
    pub icon: &'a str,
    /// HTML fragment, emitted unescaped
    pub description: &'a str,
}

/// Features shown on the homepage, in display order.
pub static FEATURE_LIST: &[Feature<'static>] = &[
    Feature {
        title: "Blockchain Search",
        icon: "img/undraw_docusaurus_mountain.svg",
        description: "Outserv's importers connect with any blockchain and index their data to \
                      provide fast, production-grade search capabilities.",
    },
    Feature {
        title: "Fast GraphQL APIs",
        icon: "img/undraw_docusaurus_tree.svg",
        description: "Outserv generates GraphQL APIs out of the box and executes queries \
                      within milliseconds. Extend these APIs with custom Javascript \
                      code run by Outserv.",
    },
    Feature {
        title: "Fast Setup",
        icon: "img/undraw_docusaurus_react.svg",
        description: "Single downloadable binary can index 15 million Ethereum \
                      blocks within hours, making it easy and fast to set up.",
    },
];

/// Render the three-column feature section for `features`, in order.
///
/// Rendering is pure: the same input always produces the same markup, and an
/// empty slice yields an empty section.
pub fn render_features(
    templates: &TemplateEngine,
    features: &[Feature<'_>],
    base_url: &str,
) -> Result<String, minijinja::Error> {
    templates.render_features(features, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headings(html: &str) -> Vec<&str> {
        html.split("<h3>")
            .skip(1)
            .filter_map(|rest| rest.split("</h3>").next())
            .collect()
    }

    // Autoescaping encodes `/` inside attribute values.
    fn unescape(html: &str) -> String {
        html.replace("&#x2f;", "/")
    }

    fn column_count(html: &str) -> usize {
        html.matches("class=\"col col--4\"").count()
    }

    #[test]
    fn renders_fixed_list_in_order() {
        let templates = TemplateEngine::new();

        let html = render_features(&templates, FEATURE_LIST, "/").unwrap();

        assert_eq!(column_count(&html), 3);
        assert_eq!(
            headings(&html),
            vec!["Blockchain Search", "Fast GraphQL APIs", "Fast Setup"]
        );
        assert!(unescape(&html).contains("src=\"/img/undraw_docusaurus_mountain.svg\""));
        assert!(html.contains("alt=\"Fast Setup\""));
    }

    #[test]
    fn headings_match_titles_exactly() {
        let templates = TemplateEngine::new();
        let html = render_features(&templates, FEATURE_LIST, "/").unwrap();

        let titles: Vec<_> = FEATURE_LIST.iter().map(|f| f.title).collect();
        assert_eq!(headings(&html), titles);
    }

    #[test]
    fn keeps_description_markup() {
        let templates = TemplateEngine::new();
        let features = [Feature {
            title: "Rich",
            icon: "img/rich.svg",
            description: "Uses <code>outserv</code> directly",
        }];

        let html = render_features(&templates, &features, "/").unwrap();

        assert!(html.contains("<p>Uses <code>outserv</code> directly</p>"));
    }

    #[test]
    fn preserves_order_of_arbitrary_lists() {
        let templates = TemplateEngine::new();
        let features = [
            Feature {
                title: "A",
                icon: "img/a.svg",
                description: "first",
            },
            Feature {
                title: "B",
                icon: "img/b.svg",
                description: "second",
            },
        ];

        let html = render_features(&templates, &features, "/outserv/").unwrap();

        assert_eq!(column_count(&html), 2);
        assert_eq!(headings(&html), vec!["A", "B"]);
        assert!(unescape(&html).contains("src=\"/outserv/img/a.svg\""));
    }

    #[test]
    fn renders_empty_section() {
        let templates = TemplateEngine::new();

        let html = render_features(&templates, &[], "/").unwrap();

        assert!(html.contains("<section class=\"features\">"));
        assert_eq!(column_count(&html), 0);
    }

    #[test]
    fn rendering_is_idempotent() {
        let templates = TemplateEngine::new();

        let first = render_features(&templates, FEATURE_LIST, "/").unwrap();
        let second = render_features(&templates, FEATURE_LIST, "/").unwrap();

        assert_eq!(first, second);
    }
}
