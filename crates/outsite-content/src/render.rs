//! Markdown to HTML rendering.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag};

use crate::codeblock::FenceInfo;
use crate::parser::{markdown_options, TocEntry};

/// Render doc content to HTML.
///
/// Headings get the ids from `toc` (which must come from parsing the same
/// content) and code fence titles become a caption above the block. Link and
/// image targets are passed through `rewrite_link` in document order; it
/// returns a replacement or `None` to keep the target.
pub fn render_html<F>(content: &str, toc: &[TocEntry], mut rewrite_link: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut heading_ids = toc.iter().map(|entry| entry.id.as_str());
    let mut events = Vec::new();

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = heading_ids.next().map(CowStr::from).or(id);
                events.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = match rewrite_link(&dest_url) {
                    Some(rewritten) => CowStr::from(rewritten),
                    None => dest_url,
                };
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }

            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = match rewrite_link(&dest_url) {
                    Some(rewritten) => CowStr::from(rewritten),
                    None => dest_url,
                };
                events.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }

            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                let fence = FenceInfo::parse(&info);
                if let Some(title) = &fence.title {
                    events.push(Event::Html(CowStr::from(format!(
                        "<div class=\"code-block-title\">{}</div>\n",
                        escape_html(title)
                    ))));
                }
                let language = fence.language.unwrap_or_default();
                events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                    CowStr::from(language),
                ))));
            }

            other => events.push(other),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    html_output
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_doc;

    fn render(source: &str) -> String {
        let doc = parse_doc(source).unwrap();
        render_html(&doc.content, &doc.toc, |_| None)
    }

    #[test]
    fn renders_markdown() {
        let html = render("# Hello\n\nWorld");

        assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn uses_parsed_heading_ids() {
        let html = render("## Setup\n\n## Setup {#custom}\n\n## Setup");

        assert!(html.contains("<h2 id=\"setup\">"));
        assert!(html.contains("<h2 id=\"custom\">"));
        assert!(html.contains("<h2 id=\"setup-1\">"));
    }

    #[test]
    fn captions_titled_code_blocks() {
        let html = render("```js title=\"a <b>.js\"\nlet x = 1;\n```");

        assert!(html.contains("<div class=\"code-block-title\">a &lt;b&gt;.js</div>"));
        assert!(html.contains("<code class=\"language-js\">"));
        assert!(!html.contains("title="));
    }

    #[test]
    fn rewrites_links() {
        let doc = parse_doc("[setup](./setup.md#run) and [home](/)").unwrap();

        let html = render_html(&doc.content, &doc.toc, |target| {
            target
                .starts_with("./setup.md")
                .then(|| "/docs/setup#run".to_string())
        });

        assert!(html.contains("href=\"/docs/setup#run\""));
        assert!(html.contains("href=\"/\""));
    }

    #[test]
    fn rewrites_image_sources() {
        let doc = parse_doc("![arch](/img/arch.svg)").unwrap();

        let html = render_html(&doc.content, &doc.toc, |target| {
            Some(format!("/outserv{}", target))
        });

        assert!(html.contains("src=\"/outserv/img/arch.svg\""));
        assert!(html.contains("alt=\"arch\""));
    }
}
