//! Scaffold a documentation site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use outsite_static::FEATURE_LIST;

use super::site_root;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing outsite...");

    let root = site_root(config_path);

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    write(config_path, DEFAULT_CONFIG, yes)?;
    write(&root.join("docs/intro.md"), DEFAULT_INTRO, yes)?;
    write(&root.join("docs/getting-started/install.md"), DEFAULT_INSTALL, yes)?;
    write(&root.join("src/css/custom.css"), DEFAULT_CUSTOM_CSS, yes)?;
    write(&root.join("static/img/favicon.svg"), DEFAULT_ICON, yes)?;

    for feature in FEATURE_LIST {
        write(&root.join("static").join(feature.icon), DEFAULT_ICON, yes)?;
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'outsite build' to build the site.");

    Ok(())
}

/// Write a scaffold file. Existing files are kept unless `overwrite` is set.
fn write(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::info!("Keeping existing {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Outsite configuration

title = "Outserv"
tagline = "Setup GraphQL Search APIs over Blockchain data 10x faster"
url = "https://github.com/outcaste-io/outserv"
baseUrl = "/"
onBrokenLinks = "throw"
onBrokenMarkdownLinks = "warn"
favicon = "img/favicon.svg"
organizationName = "outcaste-io"
projectName = "outserv"

[preset]
name = "classic"

[preset.docs]
sidebarCollapsed = false
editUrl = "https://github.com/outcaste-io/docs/blob/main"

[preset.theme]
customCss = "src/css/custom.css"

[themeConfig.navbar]
title = "Outserv"

[[themeConfig.navbar.items]]
type = "doc"
docId = "intro"
position = "left"
label = "Docs"

[[themeConfig.navbar.items]]
href = "https://github.com/outcaste-io/outserv"
label = "GitHub"
position = "right"

[themeConfig.docs.sidebar]
hideable = true

[themeConfig.footer]
style = "dark"
copyright = "Copyright © {year} Outcaste LLC."

[[themeConfig.footer.links]]
title = "Docs"
items = [{ label = "Tutorial", to = "/docs/intro" }]

[[themeConfig.footer.links]]
title = "Community"
items = [
  { label = "Discord", href = "https://discord.gg/rmJnNd4XaV" },
  { label = "Twitter", href = "https://twitter.com/manishrjain" },
]

[[themeConfig.footer.links]]
title = "More"
items = [
  { label = "Blog", to = "https://manishrjain.com" },
  { label = "GitHub", href = "https://github.com/outcaste-io/outserv" },
]

[themeConfig.prism]
theme = "github"
darkTheme = "dracula"
"#;

const DEFAULT_INTRO: &str = r#"---
sidebar_position: 1
---

# Introduction

Outserv indexes blockchain data and serves it over GraphQL.

## Next steps

Head over to [installation](getting-started/install.md) to get a node running.
"#;

const DEFAULT_INSTALL: &str = r#"---
sidebar_position: 1
sidebar_label: Install
---

# Installing Outserv

Download the binary and start it:

```bash title="Start a node"
outserv graphql
```

Back to the [introduction](../intro.md).
"#;

const DEFAULT_CUSTOM_CSS: &str = r#"/* Site-wide overrides, loaded after the built-in theme. */

:root {
  --primary: #2e8555;
}

html[data-theme='dark'] {
  --primary: #25c2a0;
}
"#;

const DEFAULT_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><circle cx="32" cy="32" r="28" fill="#2e8555"/></svg>
"##;
