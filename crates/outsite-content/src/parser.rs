//! Markdown doc parser.

use std::collections::HashSet;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::{CodeBlock, FenceInfo};
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::links::DocLink;

/// A parsed doc.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Text of the first level-1 heading
    pub heading: Option<String>,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Every heading in document order
    pub toc: Vec<TocEntry>,

    /// Every link target in document order
    pub links: Vec<DocLink>,
}

impl ParsedDoc {
    /// Title from frontmatter, else the first `#` heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .or(self.heading.as_deref())
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID, unique within the doc
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing a doc.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for parsing and rendering.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Parse a Markdown doc.
///
/// Extracts frontmatter, code blocks, links and the heading outline.
pub fn parse_doc(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, content) = extract_frontmatter(source)?;

    // `content` is a suffix of `source`; offsets inside it need the lines above added.
    let prefix_lines = source[..source.len() - content.len()].matches('\n').count();
    let line_at = |offset: usize| prefix_lines + content[..offset].matches('\n').count() + 1;

    let mut code_blocks = Vec::new();
    let mut links = Vec::new();
    let mut heading = None;
    let mut headings = Vec::new();

    let mut current_code_block: Option<(FenceInfo, usize, String)> = None;
    let mut current_heading: Option<(u8, Option<String>, String)> = None;

    for (event, range) in Parser::new_ext(content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => FenceInfo::parse(info),
                    CodeBlockKind::Indented => FenceInfo::default(),
                };
                current_code_block = Some((info, line_at(range.start), String::new()));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, line_number, source)) = current_code_block.take() {
                    code_blocks.push(CodeBlock {
                        language: info.language,
                        title: info.title,
                        source,
                        line_number,
                    });
                }
            }

            Event::Start(Tag::Heading { level, id, .. }) => {
                current_heading = Some((level as u8, id.map(|id| id.to_string()), String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, explicit_id, title)) = current_heading.take() {
                    let title = title.trim().to_string();
                    if level == 1 && heading.is_none() {
                        heading = Some(title.clone());
                    }
                    headings.push((level, explicit_id, title));
                }
            }

            Event::Start(Tag::Link { dest_url, .. })
            | Event::Start(Tag::Image { dest_url, .. }) => {
                links.push(DocLink::new(dest_url.to_string(), line_at(range.start)));
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, ref mut source)) = current_code_block {
                    source.push_str(&text);
                } else if let Some((_, _, ref mut title)) = current_heading {
                    title.push_str(&text);
                }
            }

            _ => {}
        }
    }

    // Explicit ids are taken first so generated slugs steer around them.
    let mut ids = IdAllocator::default();
    for (_, explicit_id, _) in &headings {
        if let Some(id) = explicit_id {
            ids.reserve(id);
        }
    }
    let toc = headings
        .into_iter()
        .map(|(level, explicit_id, title)| {
            let id = explicit_id.unwrap_or_else(|| ids.allocate(&slugify(&title)));
            TocEntry { title, id, level }
        })
        .collect();

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        heading,
        code_blocks,
        toc,
        links,
    })
}

/// Hands out unused heading ids, suffixing taken ones with `-1`, `-2`, ...
#[derive(Default)]
struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    fn allocate(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut n = 1;
        while self.used.contains(&candidate) {
            candidate = format!("{}-{}", base, n);
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
