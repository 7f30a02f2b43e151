//! Static site generator for the Outserv documentation site.
//!
//! Turns a site root (an `outsite.toml`, a `docs/` tree and a `static/`
//! directory) into plain HTML: a homepage with the feature section, one page
//! per doc with sidebar and table of contents, a 404 page and a sitemap.

pub mod assets;
pub mod builder;
pub mod docs;
pub mod features;
pub mod layout;
pub mod links;
pub mod sidebar;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use features::{render_features, Feature, FEATURE_LIST};
pub use links::BrokenLink;
