//! Markdown doc parser with frontmatter, TOC, code block and link extraction.
//!
//! Docs are plain Markdown with an optional YAML frontmatter block. Parsing
//! collects what the site builder needs before rendering: the heading
//! outline, fenced code block metadata and every link target, so broken
//! links can be found before any page is written.

pub mod codeblock;
pub mod frontmatter;
pub mod links;
pub mod parser;
pub mod render;

pub use codeblock::{CodeBlock, FenceInfo};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use links::{split_suffix, DocLink, LinkKind};
pub use parser::{parse_doc, slugify, ParseError, ParsedDoc, TocEntry};
pub use render::render_html;
