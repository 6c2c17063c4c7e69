//! # Menu Filtering
//!
//! Pure filtering for the menu grid: case-insensitive label search combined
//! with a category filter, plus a configurable fallback for the
//! zero-result case. The fallback scope is deliberately a knob: observed
//! front-end variants disagree on whether an empty result should retry
//! without the category only, or without the search term as well.

use serde::{Deserialize, Serialize};

/// A menu item as the browsing UI supplies it. The catalog itself is an
/// external collaborator; the core only filters what it is handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Catalog identifier.
    pub name: String,

    /// Display label; the identifier doubles as the label when absent.
    #[serde(default)]
    pub item_name: Option<String>,

    /// Menu category the item is filed under.
    #[serde(default)]
    pub category: Option<String>,
}

impl MenuEntry {
    pub fn label(&self) -> &str {
        self.item_name.as_deref().unwrap_or(&self.name)
    }
}

/// What to do when the combined category+search filter matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuFallback {
    /// Drop the category constraint, keep the search term.
    #[default]
    RelaxCategory,
    /// Drop both constraints and show the full list.
    RelaxEverything,
    /// No fallback: an empty result stays empty.
    Disabled,
}

/// Filters menu entries by search term and category.
///
/// The term matches case-insensitively anywhere in the label; a category of
/// `None` or `"all"` matches every entry. When the combined filter yields
/// nothing, `fallback` decides whether and how to relax.
pub fn filter_menu_items<'a>(
    items: &'a [MenuEntry],
    search_term: &str,
    category: Option<&str>,
    fallback: MenuFallback,
) -> Vec<&'a MenuEntry> {
    let term = search_term.trim().to_lowercase();

    let matches_term = |entry: &MenuEntry| term.is_empty() || entry.label().to_lowercase().contains(&term);
    let matches_category = |entry: &MenuEntry| match category {
        None | Some("all") => true,
        Some(wanted) => entry.category.as_deref() == Some(wanted),
    };

    let primary: Vec<&MenuEntry> = items
        .iter()
        .filter(|e| matches_category(e) && matches_term(e))
        .collect();

    if !primary.is_empty() {
        return primary;
    }

    match fallback {
        MenuFallback::RelaxCategory => items.iter().filter(|e| matches_term(e)).collect(),
        MenuFallback::RelaxEverything => items.iter().collect(),
        MenuFallback::Disabled => primary,
    }
}
