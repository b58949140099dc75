//! Navigation tree derived from document source paths.
//!
//! The tree is built in two phases. First every page path is walked segment
//! by segment and each accumulated path is registered in a flat map: folders
//! for intermediate segments, leaves for `.md` files. Then the map is folded
//! into a tree by attaching each entry to the entry registered at its parent
//! path (the key with its last segment removed). Map iteration order plays
//! no part in the result.
//!
//! Folders are registered at [`DEFAULT_ORDER`] and, once their children are
//! known, move up to the lowest order found among them.

use std::cmp::Ordering;
use std::collections::HashMap;

use folio_renderer::DOCS_PREFIX;
use serde::{Deserialize, Serialize};

use crate::page::{DocumentPage, compare_titles};

/// Sort position for items without an explicit `order`.
pub const DEFAULT_ORDER: i64 = 999;

/// One node in the navigation tree.
///
/// A node with `children` is a folder and is never directly navigable; a node
/// without `children` is a leaf with a non-empty `href`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    /// Target URL; empty for folders.
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationItem>>,
}

impl NavigationItem {
    /// Create a leaf pointing at `href`.
    #[must_use]
    pub fn link(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            description: None,
            external: None,
            order: None,
            children: None,
        }
    }

    fn folder(segment: &str) -> Self {
        Self {
            title: capitalize(segment),
            href: String::new(),
            description: None,
            external: None,
            order: Some(DEFAULT_ORDER),
            children: Some(Vec::new()),
        }
    }

    fn page(page: &DocumentPage) -> Self {
        Self {
            title: page.title.clone(),
            href: format!("{DOCS_PREFIX}/{}", page.slug),
            description: page.description.clone(),
            external: None,
            order: Some(page.order.unwrap_or(DEFAULT_ORDER)),
            children: None,
        }
    }

    /// Whether this node groups other nodes.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.children.is_some()
    }

    /// Sort position, [`DEFAULT_ORDER`] when unset.
    #[must_use]
    pub fn effective_order(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }
}

/// Upper-case the first character of a path segment.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Accumulated path with its last segment removed; `""` for top-level entries.
fn parent_key(key: &str) -> &str {
    key.rsplit_once('/').map_or("", |(parent, _)| parent)
}

fn compare_items(a: &NavigationItem, b: &NavigationItem) -> Ordering {
    a.effective_order()
        .cmp(&b.effective_order())
        .then_with(|| compare_titles(&a.title, &b.title))
}

/// Build the navigation tree for a set of pages.
///
/// Pages without a `file_path` are skipped, and so are pages whose file does
/// not end in `.md` (e.g., `.mdx` sources). Folders are kept even when no
/// leaf ends up below them.
#[must_use]
pub fn build_navigation(pages: &[DocumentPage]) -> Vec<NavigationItem> {
    let mut registry: HashMap<String, NavigationItem> = HashMap::new();

    for page in pages {
        let Some(file_path) = page.file_path.as_deref() else {
            continue;
        };
        let segments: Vec<&str> = file_path.split('/').filter(|s| !s.is_empty()).collect();

        let mut current_path = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(segment);

            if i + 1 == segments.len() {
                if segment.ends_with(".md") {
                    registry.insert(current_path.clone(), NavigationItem::page(page));
                }
            } else {
                registry
                    .entry(current_path.clone())
                    .or_insert_with(|| NavigationItem::folder(segment));
            }
        }
    }

    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    for key in registry.keys() {
        children_of
            .entry(parent_key(key).to_owned())
            .or_default()
            .push(key.clone());
    }

    assemble("", &mut registry, &children_of)
}

/// Collect and sort the registered children of `parent`, recursing into folders.
fn assemble(
    parent: &str,
    registry: &mut HashMap<String, NavigationItem>,
    children_of: &HashMap<String, Vec<String>>,
) -> Vec<NavigationItem> {
    let Some(keys) = children_of.get(parent) else {
        return Vec::new();
    };

    let mut level = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(mut item) = registry.remove(key) else {
            continue;
        };
        if item.is_folder() {
            let children = assemble(key, registry, children_of);
            if let Some(first) = children.first() {
                item.order = Some(item.effective_order().min(first.effective_order()));
            }
            item.children = Some(children);
        }
        level.push((key, item));
    }

    // Equal order and title fall back to the path, so map order never leaks out
    level.sort_by(|(a_key, a), (b_key, b)| compare_items(a, b).then_with(|| a_key.cmp(b_key)));
    level.into_iter().map(|(_, item)| item).collect()
}
