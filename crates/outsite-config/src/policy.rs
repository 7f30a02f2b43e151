//! Broken link handling policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the build does when it finds a broken link.
///
/// Deserialization only accepts `throw`, `warn` and `ignore`; anything else
/// fails the config load instead of silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Abort the build
    Throw,
    /// Log every broken link and keep going
    Warn,
    /// Say nothing
    Ignore,
}

impl LinkPolicy {
    /// Name as written in `outsite.toml`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn default_on_broken_links() -> LinkPolicy {
    LinkPolicy::Throw
}

pub(crate) fn default_on_broken_markdown_links() -> LinkPolicy {
    LinkPolicy::Warn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Holder {
        policy: LinkPolicy,
    }

    #[test]
    fn parses_known_policies() {
        for (raw, expected) in [
            ("throw", LinkPolicy::Throw),
            ("warn", LinkPolicy::Warn),
            ("ignore", LinkPolicy::Ignore),
        ] {
            let holder: Holder = toml::from_str(&format!("policy = \"{raw}\"")).unwrap();
            assert_eq!(holder.policy, expected);
            assert_eq!(holder.policy.to_string(), raw);
        }
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = toml::from_str::<Holder>("policy = \"explode\"").unwrap_err();
        let message = err.to_string();

        assert!(message.contains("explode"));
        assert!(message.contains("throw"));
    }

    #[test]
    fn policy_names_are_case_sensitive() {
        assert!(toml::from_str::<Holder>("policy = \"Throw\"").is_err());
    }
}
