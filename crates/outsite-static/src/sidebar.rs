//! Autogenerated docs sidebar and page pagination.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::docs::{DocPage, DocSet};

const UNPOSITIONED: i32 = 999;

/// A sidebar entry: a doc link or a category of entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    /// Display label
    pub label: String,
    /// Route; categories without an index doc have none
    pub path: Option<String>,
    /// Child items
    pub children: Vec<SidebarItem>,
    /// Whether this is the page being rendered
    pub active: bool,
    /// Categories only: render folded
    pub collapsed: bool,
}

impl SidebarItem {
    fn contains(&self, route: &str) -> bool {
        self.path.as_deref() == Some(route) || self.children.iter().any(|c| c.contains(route))
    }
}

/// Source directory tree used to group docs into categories.
#[derive(Default)]
struct DirNode<'a> {
    docs: Vec<&'a DocPage>,
    dirs: BTreeMap<String, DirNode<'a>>,
}

/// Build the sidebar: docs of a directory first-class, sub-directories as
/// categories, everything ordered by `sidebar_position` then name.
pub fn build_sidebar(docs: &DocSet, collapsed: bool) -> Vec<SidebarItem> {
    let mut root = DirNode::default();

    for page in docs.pages() {
        let dir = page.source_dir();
        let mut node = &mut root;
        for segment in dir.split('/').filter(|s| !s.is_empty()) {
            node = node.dirs.entry(segment.to_string()).or_default();
        }
        node.docs.push(page);
    }

    level_items(&root, collapsed)
        .into_iter()
        .map(|(_, _, item)| item)
        .collect()
}

/// Items of one directory with their sort keys.
fn level_items(node: &DirNode<'_>, collapsed: bool) -> Vec<(i32, String, SidebarItem)> {
    let mut items = Vec::new();

    for page in &node.docs {
        // A category's index doc becomes the category link instead of a child.
        if is_category_index(page) {
            continue;
        }
        items.push((
            page.sidebar_position().unwrap_or(UNPOSITIONED),
            page.relative_path.display().to_string(),
            SidebarItem {
                label: page.sidebar_label(),
                path: Some(page.route.clone()),
                children: Vec::new(),
                active: false,
                collapsed: false,
            },
        ));
    }

    for (name, child) in &node.dirs {
        let index = child.docs.iter().find(|p| is_category_index(p));
        let children: Vec<_> = level_items(child, collapsed);
        if children.is_empty() && index.is_none() {
            continue;
        }

        let position = index
            .and_then(|p| p.sidebar_position())
            .or_else(|| children.iter().map(|(pos, _, _)| *pos).min())
            .unwrap_or(UNPOSITIONED);

        items.push((
            position,
            name.clone(),
            SidebarItem {
                label: index.map(|p| p.sidebar_label()).unwrap_or_else(|| capitalize(name)),
                path: index.map(|p| p.route.clone()),
                children: children.into_iter().map(|(_, _, item)| item).collect(),
                active: false,
                collapsed,
            },
        ));
    }

    items.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    items
}

fn is_category_index(page: &DocPage) -> bool {
    !page.source_dir().is_empty()
        && page
            .relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("index"))
}

/// Copy of the sidebar with `route` marked active and its categories expanded.
pub fn with_active(sidebar: &[SidebarItem], route: &str) -> Vec<SidebarItem> {
    sidebar
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.active = item.path.as_deref() == Some(route);
            if item.contains(route) {
                item.collapsed = false;
            }
            item.children = with_active(&item.children, route);
            item
        })
        .collect()
}

/// Linked entries in reading order: `(label, route)`.
pub fn reading_order(sidebar: &[SidebarItem]) -> Vec<(String, String)> {
    let mut order = Vec::new();
    collect_order(sidebar, &mut order);
    order
}

fn collect_order(items: &[SidebarItem], order: &mut Vec<(String, String)>) {
    for item in items {
        if let Some(path) = &item.path {
            order.push((item.label.clone(), path.clone()));
        }
        collect_order(&item.children, order);
    }
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
