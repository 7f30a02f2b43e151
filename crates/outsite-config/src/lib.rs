//! Site configuration descriptor for the Outserv documentation site.
//!
//! [`SiteConfig`] is read once from `outsite.toml` and treated as immutable
//! for the rest of the build. Loading only enforces types and enumerations
//! (for example the broken-link policies); value checks live in
//! [`SiteConfig::validate`] and are run by the consumer.

pub mod error;
pub mod policy;
pub mod preset;
pub mod site;
pub mod theme;
mod validate;

pub use error::{ConfigError, Issue};
pub use policy::LinkPolicy;
pub use preset::{DocsOptions, PresetConfig, PresetName, ThemeOptions};
pub use site::SiteConfig;
pub use theme::{
    join_base, CodeTheme, Footer, FooterLink, FooterLinkGroup, FooterStyle, Navbar, NavbarItem,
    NavbarItemKind, NavbarLogo, NavbarPosition, Palette, PrismConfig, ThemeConfig,
};
