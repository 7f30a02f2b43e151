//! Template engine for rendering site pages.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::features::Feature;
use crate::layout::{Layout, Link};
use crate::sidebar::SidebarItem;

/// A table of contents entry.
#[derive(Debug, Clone, Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (2-3)
    pub level: u8,
}

/// Page-specific context for a doc.
#[derive(Debug, Clone, Serialize)]
pub struct DocContext {
    pub title: String,
    pub description: Option<String>,
    /// Rendered content HTML
    pub content: String,
    pub sidebar: Vec<SidebarItem>,
    pub toc: Vec<TocEntry>,
    pub edit_url: Option<String>,
    pub previous: Option<Link>,
    pub next: Option<Link>,
}

/// Page-specific context for the homepage.
#[derive(Debug, Clone, Serialize)]
pub struct HomeContext {
    /// Target of the hero button
    pub get_started: Option<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("navbar.html", NAVBAR_TEMPLATE),
            ("footer.html", FOOTER_TEMPLATE),
            ("sidebar.html", SIDEBAR_TEMPLATE),
            ("features.html", FEATURES_TEMPLATE),
            ("home.html", HOME_TEMPLATE),
            ("doc.html", DOC_TEMPLATE),
            ("404.html", NOT_FOUND_TEMPLATE),
        ] {
            env.add_template(name, source)
                .unwrap_or_else(|e| panic!("built-in template {} is invalid: {}", name, e));
        }

        Self { env }
    }

    /// Render a doc page.
    pub fn render_doc(&self, layout: &Layout, page: &DocContext) -> Result<String, minijinja::Error> {
        self.env
            .get_template("doc.html")?
            .render(context! { layout => layout, page => page })
    }

    /// Render the homepage with its feature section.
    pub fn render_home(
        &self,
        layout: &Layout,
        page: &HomeContext,
        features: &[Feature<'_>],
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("home.html")?.render(context! {
            layout => layout,
            page => page,
            features => features,
            base_url => &layout.base_url,
        })
    }

    /// Render the 404 page.
    pub fn render_not_found(&self, layout: &Layout) -> Result<String, minijinja::Error> {
        self.env
            .get_template("404.html")?
            .render(context! { layout => layout })
    }

    /// Render the feature section on its own.
    pub fn render_features(
        &self,
        features: &[Feature<'_>],
        base_url: &str,
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template("features.html")?
            .render(context! { features => features, base_url => base_url })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ layout.site_title }}{% endblock %}</title>
  {% block meta %}{% endblock %}
  {% if layout.favicon %}<link rel="icon" href="{{ layout.favicon }}">{% endif %}
  <link rel="stylesheet" href="{{ layout.base_url }}assets/main.css">
  {% for style in layout.styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<script>
    (function () {
      var theme = localStorage.getItem('theme');
      if (!theme) {
        theme = window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light';
      }
      document.documentElement.setAttribute('data-theme', theme);
    })();
  </script>
</head>
<body>
  {% include "navbar.html" %}
  <div class="main-wrapper">
    {% block content %}{% endblock %}
  </div>
  {% include "footer.html" %}
  <script src="{{ layout.base_url }}assets/main.js"></script>
</body>
</html>"##;

const NAVBAR_TEMPLATE: &str = r##"<nav class="navbar">
  <div class="navbar__inner">
    <div class="navbar__items">
      <a class="navbar__brand" href="{{ layout.base_url }}">
        {% if layout.logo %}<img class="navbar__logo" src="{{ layout.logo.src }}" alt="{{ layout.logo.alt }}">{% endif %}
        <b class="navbar__title">{{ layout.navbar_title }}</b>
      </a>
      {% for item in layout.navbar_left %}
      <a class="navbar__item navbar__link" href="{{ item.href }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a>
      {% endfor %}
    </div>
    <div class="navbar__items navbar__items--right">
      {% for item in layout.navbar_right %}
      <a class="navbar__item navbar__link" href="{{ item.href }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a>
      {% endfor %}
      <button class="color-mode-toggle" type="button" aria-label="Switch between dark and light mode">&#9680;</button>
    </div>
  </div>
</nav>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer footer--{{ layout.footer_style }}">
  <div class="container">
    {% if layout.footer_links %}
    <div class="row footer__links">
      {% for group in layout.footer_links %}
      <div class="col footer__col">
        <div class="footer__title">{{ group.title }}</div>
        <ul class="footer__items">
          {% for item in group.items %}
          <li class="footer__item"><a class="footer__link-item" href="{{ item.href }}"{% if item.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ item.label }}</a></li>
          {% endfor %}
        </ul>
      </div>
      {% endfor %}
    </div>
    {% endif %}
    {% if layout.copyright %}<div class="footer__copyright">{{ layout.copyright }}</div>{% endif %}
  </div>
</footer>"##;

const SIDEBAR_TEMPLATE: &str = r##"<ul class="menu__list">
{% for item in page.sidebar recursive %}
  <li class="menu__list-item{% if item.collapsed %} menu__list-item--collapsed{% endif %}">
    {% if item.path %}<a class="menu__link{% if item.children %} menu__link--sublist{% endif %}{% if item.active %} menu__link--active{% endif %}" href="{{ item.path }}">{{ item.label }}</a>
    {% else %}<span class="menu__link menu__link--sublist menu__caret">{{ item.label }}</span>{% endif %}
    {% if item.children %}<ul class="menu__list">{{ loop(item.children) }}</ul>{% endif %}
  </li>
{% endfor %}
</ul>"##;

const FEATURES_TEMPLATE: &str = r##"<section class="features">
  <div class="container">
    <div class="row">
      {% for feature in features %}
      <div class="col col--4">
        <div class="text--center">
          <img class="feature-svg" src="{{ base_url }}{{ feature.icon }}" alt="{{ feature.title }}" role="img">
        </div>
        <div class="text--center padding-horiz--md">
          <h3>{{ feature.title }}</h3>
          <p>{{ feature.description | safe }}</p>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>
</section>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ layout.site_title }}{% if layout.tagline %} | {{ layout.tagline }}{% endif %}{% endblock %}

{% block content %}
<header class="hero hero--primary">
  <div class="container">
    <h1 class="hero__title">{{ layout.site_title }}</h1>
    <p class="hero__subtitle">{{ layout.tagline }}</p>
    {% if page.get_started %}
    <div class="buttons">
      <a class="button button--secondary button--lg" href="{{ page.get_started }}">Get started</a>
    </div>
    {% endif %}
  </div>
</header>
<main>
  {% include "features.html" %}
</main>
{% endblock %}"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}{{ page.title }} | {{ layout.site_title }}{% endblock %}

{% block meta %}{% if page.description %}<meta name="description" content="{{ page.description }}">{% endif %}{% endblock %}

{% block content %}
<div class="docs-wrapper">
  <aside class="doc-sidebar" id="doc-sidebar">
    {% include "sidebar.html" %}
    {% if layout.sidebar_hideable %}
    <button class="doc-sidebar__hide" type="button" title="Collapse sidebar" aria-label="Collapse sidebar">&laquo;</button>
    {% endif %}
  </aside>
  <main class="doc-main">
    <article class="doc">
      <div class="markdown">
        {{ page.content | safe }}
      </div>
      {% if page.edit_url %}
      <a class="edit-this-page" href="{{ page.edit_url }}" target="_blank" rel="noopener noreferrer">Edit this page</a>
      {% endif %}
      {% if page.previous or page.next %}
      <nav class="pagination-nav" aria-label="Docs pages">
        {% if page.previous %}
        <a class="pagination-nav__link pagination-nav__link--prev" href="{{ page.previous.href }}">
          <div class="pagination-nav__sublabel">Previous</div>
          <div class="pagination-nav__label">{{ page.previous.label }}</div>
        </a>
        {% endif %}
        {% if page.next %}
        <a class="pagination-nav__link pagination-nav__link--next" href="{{ page.next.href }}">
          <div class="pagination-nav__sublabel">Next</div>
          <div class="pagination-nav__label">{{ page.next.label }}</div>
        </a>
        {% endif %}
      </nav>
      {% endif %}
    </article>
    {% if page.toc %}
    <aside class="toc">
      <ul>
      {% for entry in page.toc %}
        <li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
      {% endfor %}
      </ul>
    </aside>
    {% endif %}
  </main>
</div>
{% endblock %}"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block title %}Page Not Found | {{ layout.site_title }}{% endblock %}

{% block content %}
<main class="container not-found">
  <h1 class="hero__title">Page Not Found</h1>
  <p>We could not find what you were looking for.</p>
  <p><a href="{{ layout.base_url }}">Back to the homepage</a></p>
</main>
{% endblock %}"##;
