//! The gallery and its lightbox viewer.
//!
//! [`Gallery`] owns the filtered view over a fixed collection of media
//! items, the open lightbox position, and a per-item load-status map.
//! The filtered sequence is always the stable sub-order of the full
//! collection matching the active filter; the lightbox index is a
//! position *within that sequence*, and directional navigation wraps
//! around its length.
//!
//! The gallery never fetches images itself. A loader collaborator
//! resolves each item's source and reports back through
//! [`Gallery::report_load_result`]; items that failed get a placeholder
//! in the grid and an inline failure note in the lightbox.

use std::collections::HashMap;

use crate::model::{MediaItem, Orientation};

/// Which orientations the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationFilter {
    #[default]
    All,
    Portrait,
    Landscape,
}

impl OrientationFilter {
    /// Whether an item passes this filter.
    pub fn matches(&self, item: &MediaItem) -> bool {
        match self {
            Self::All => true,
            Self::Portrait => item.orientation == Orientation::Portrait,
            Self::Landscape => item.orientation == Orientation::Landscape,
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Portrait => "Portrait",
            Self::Landscape => "Landscape",
        }
    }

    /// All filters, in display order.
    pub const ALL: [Self; 3] = [Self::All, Self::Portrait, Self::Landscape];
}

/// Presentation layout of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryLayout {
    #[default]
    Grid,
    List,
}

/// Load state of one item's image, keyed by item id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Pending,
    Loaded,
    Error,
}

/// Direction of lightbox navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The gallery controller.
pub struct Gallery {
    items: Vec<MediaItem>,
    filter: OrientationFilter,
    layout: GalleryLayout,
    /// Position of the open item within the current filtered sequence
    open_index: Option<usize>,
    load_status: HashMap<u32, LoadStatus>,
}

impl Gallery {
    /// Create a gallery over a fixed item collection. Empty collections
    /// are fine; the grid just renders its empty state.
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            filter: OrientationFilter::default(),
            layout: GalleryLayout::default(),
            open_index: None,
            load_status: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Filter and layout
    // ------------------------------------------------------------------

    /// Switch the active filter.
    ///
    /// Closes the lightbox if it is open: the open index was computed
    /// against the old filtered sequence and would otherwise point at a
    /// different item, or out of range.
    pub fn set_filter(&mut self, filter: OrientationFilter) {
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.open_index = None;
    }

    /// Switch between grid and list layout. Purely presentational;
    /// filtering and the lightbox are unaffected.
    pub fn set_layout(&mut self, layout: GalleryLayout) {
        self.layout = layout;
    }

    pub fn filter(&self) -> OrientationFilter {
        self.filter
    }

    pub fn layout(&self) -> GalleryLayout {
        self.layout
    }

    /// The full collection, in manifest order.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// The filtered sequence: the stable sub-order of the collection
    /// matching the active filter.
    pub fn filtered(&self) -> Vec<&MediaItem> {
        self.items.iter().filter(|i| self.filter.matches(i)).collect()
    }

    // ------------------------------------------------------------------
    // Lightbox
    // ------------------------------------------------------------------

    /// Open the lightbox on an item.
    ///
    /// The item must be a member of the current filtered sequence;
    /// anything else is a caller bug and is ignored.
    pub fn open(&mut self, item_id: u32) {
        let position = self.filtered().iter().position(|i| i.id == item_id);
        match position {
            Some(index) => self.open_index = Some(index),
            None => {
                tracing::debug!(target: "gallery", item_id, "open outside filtered sequence, ignoring");
            }
        }
    }

    /// Close the lightbox.
    pub fn close(&mut self) {
        self.open_index = None;
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    /// The open item, if any.
    pub fn open_item(&self) -> Option<&MediaItem> {
        let index = self.open_index?;
        self.filtered().get(index).copied()
    }

    /// Open position as (index, filtered length), for the "n / M" badge.
    pub fn open_position(&self) -> Option<(usize, usize)> {
        let index = self.open_index?;
        Some((index, self.filtered().len()))
    }

    /// Step the lightbox through the filtered sequence, wrapping at both
    /// ends. Only valid while an item is open; a no-op otherwise.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(index) = self.open_index else {
            return;
        };
        let len = self.filtered().len();
        if len == 0 {
            self.open_index = None;
            return;
        }
        let new_index = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Previous => (index + len - 1) % len,
        };
        self.open_index = Some(new_index);
    }

    // ------------------------------------------------------------------
    // Load status
    // ------------------------------------------------------------------

    /// Record the outcome of an item's image load. Unknown ids are
    /// ignored.
    pub fn report_load_result(&mut self, item_id: u32, status: LoadStatus) {
        if !self.items.iter().any(|i| i.id == item_id) {
            tracing::debug!(target: "gallery", item_id, "load result for unknown item, ignoring");
            return;
        }
        self.load_status.insert(item_id, status);
    }

    /// Load status of an item; `Pending` until a result is reported.
    pub fn load_status(&self, item_id: u32) -> LoadStatus {
        self.load_status.get(&item_id).copied().unwrap_or_default()
    }
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::MediaItem;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn arb_items() -> impl Strategy<Value = Vec<MediaItem>> {
        prop::collection::vec(prop::bool::ANY, 1..30).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(i, portrait)| MediaItem {
                    id: i as u32 + 1,
                    source: PathBuf::from(format!("img-{i}.jpg")),
                    title: format!("Item {i}"),
                    description: String::new(),
                    orientation: if portrait {
                        Orientation::Portrait
                    } else {
                        Orientation::Landscape
                    },
                })
                .collect()
        })
    }

    proptest! {
        /// Navigating M times over a filtered sequence of length M
        /// returns to the originally opened item.
        #[test]
        fn navigate_is_circular(items in arb_items(), use_portrait in prop::bool::ANY) {
            let mut gallery = Gallery::new(items);
            let filter = if use_portrait {
                OrientationFilter::Portrait
            } else {
                OrientationFilter::Landscape
            };
            gallery.set_filter(filter);

            let filtered: Vec<u32> = gallery.filtered().iter().map(|i| i.id).collect();
            prop_assume!(!filtered.is_empty());

            gallery.open(filtered[0]);
            for _ in 0..filtered.len() {
                gallery.navigate(Direction::Next);
            }
            prop_assert_eq!(gallery.open_item().unwrap().id, filtered[0]);
        }

        /// The filtered sequence is always a stable sub-order of the
        /// full collection.
        #[test]
        fn filtered_is_stable_suborder(items in arb_items()) {
            let mut gallery = Gallery::new(items);
            for filter in OrientationFilter::ALL {
                gallery.set_filter(filter);
                let all_ids: Vec<u32> = gallery.items().iter().map(|i| i.id).collect();
                let filtered_ids: Vec<u32> = gallery.filtered().iter().map(|i| i.id).collect();

                // Order-preserving subsequence check
                let mut cursor = all_ids.iter();
                for id in &filtered_ids {
                    prop_assert!(cursor.any(|x| x == id));
                }
            }
        }
    }
}
