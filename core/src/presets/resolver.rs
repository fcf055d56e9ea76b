//! Selection of the authoritative layer.
//!
//! Resolution is a pure read of the store:
//! - disabled: always `Backup`, the game's own saved settings
//! - in a duty: the layer for the current size, no fallback
//! - outside a duty: walk down from the current size, skipping layers marked
//!   `only_in_duty`, until one applies or `Backup` is reached

use clarity_types::{GroupingSize, Layer};

use super::store::LayerStore;

/// The layer currently in effect, together with the size it is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLayer<'a> {
    pub size: GroupingSize,
    pub layer: &'a Layer,
}

pub fn resolve(
    store: &LayerStore,
    size: GroupingSize,
    in_duty: bool,
    enabled: bool,
) -> ActiveLayer<'_> {
    let size = resolve_size(store, size, in_duty, enabled);
    ActiveLayer {
        size,
        layer: store.layer_for(size),
    }
}

pub fn resolve_size(
    store: &LayerStore,
    size: GroupingSize,
    in_duty: bool,
    enabled: bool,
) -> GroupingSize {
    if !enabled {
        return GroupingSize::Backup;
    }
    if in_duty {
        return size;
    }
    FallbackChain::new(store, size).last().unwrap_or(size)
}

/// The sizes visited while resolving outside a duty, starting at `start`.
///
/// Each step moves one ordinal toward `Backup`, so the chain is strictly
/// decreasing and yields at most `start.ordinal() + 1` sizes. The final
/// element is the resolved size.
pub struct FallbackChain<'a> {
    store: &'a LayerStore,
    next: Option<GroupingSize>,
}

impl<'a> FallbackChain<'a> {
    pub fn new(store: &'a LayerStore, start: GroupingSize) -> Self {
        Self {
            store,
            next: Some(start),
        }
    }
}

impl Iterator for FallbackChain<'_> {
    type Item = GroupingSize;

    fn next(&mut self) -> Option<GroupingSize> {
        let size = self.next.take()?;
        // Backup has no lower size, which ends the chain regardless of its flag
        if self.store.layer_for(size).only_in_duty {
            self.next = size.next_lower();
        }
        Some(size)
    }
}
