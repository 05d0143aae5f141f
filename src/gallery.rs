//! Category filter for the gallery grid.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::MediaItem;

/// Filter value that shows every item.
pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub media: MediaItem,
    pub categories: BTreeSet<String>,
}

impl GalleryItem {
    pub fn new<I, S>(media: MediaItem, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            media,
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, filter: &str) -> bool {
        filter == FILTER_ALL || self.categories.contains(filter)
    }
}

/// Gallery items plus the currently active filter button.
#[derive(Debug, Clone)]
pub struct GalleryFilter {
    items: Vec<GalleryItem>,
    active: String,
}

impl GalleryFilter {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            active: FILTER_ALL.to_string(),
        }
    }

    /// Activate `filter` and return the visibility of every item, in order.
    pub fn apply(&mut self, filter: &str) -> Vec<bool> {
        self.active = filter.to_string();
        let visibility = self.visibility();
        debug!(
            filter,
            visible = visibility.iter().filter(|v| **v).count(),
            "Gallery filter applied"
        );
        visibility
    }

    pub fn visibility(&self) -> Vec<bool> {
        self.items.iter().map(|i| i.matches(&self.active)).collect()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter().filter(|i| i.matches(&self.active))
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Every category present, for building the filter buttons.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.items
            .iter()
            .flat_map(|i| i.categories.iter().map(String::as_str))
            .collect()
    }
}
