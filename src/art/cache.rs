// Memoizing album art cache keyed by source

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{placeholder, ArtSource, PLACEHOLDER_KEY};
use crate::model::AlbumArt;

type Slot = Arc<OnceLock<Option<Arc<AlbumArt>>>>;

/// Album art memoized per source for as long as the cache lives.
///
/// Each key owns a slot that is filled once; concurrent lookups of the same
/// key wait on the first fetch instead of starting their own. Failed fetches
/// are evicted and answered with the placeholder, so a later lookup retries.
#[derive(Default)]
pub struct ArtCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ArtCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Art for `source`, falling back to the placeholder when `source` is
    /// absent or cannot be fetched. Never fails.
    pub fn resolve(&self, source: Option<&str>, fetcher: &dyn ArtSource) -> Arc<AlbumArt> {
        let key = match source.filter(|s| !s.is_empty()) {
            Some(key) => key,
            None => return self.placeholder(),
        };

        let slot = self.slot(key);
        let art = slot.get_or_init(|| match fetcher.fetch(key) {
            Ok(art) => Some(Arc::new(art)),
            Err(e) => {
                warn!(source = key, error = %e, "album art fetch failed, using placeholder");
                None
            }
        });

        match art {
            Some(art) => art.clone(),
            None => {
                self.evict(key, &slot);
                self.placeholder()
            }
        }
    }

    /// Number of sources currently memoized, the placeholder included.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn placeholder(&self) -> Arc<AlbumArt> {
        let slot = self.slot(PLACEHOLDER_KEY);
        slot.get_or_init(|| Some(Arc::new(placeholder())))
            .clone()
            .unwrap_or_else(|| Arc::new(placeholder()))
    }

    fn slot(&self, key: &str) -> Slot {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get(key) {
            debug!(source = key, "album art cache hit");
            return slot.clone();
        }
        let slot = Slot::default();
        slots.insert(key.to_string(), slot.clone());
        slot
    }

    fn evict(&self, key: &str, slot: &Slot) {
        let mut slots = self.slots.lock();
        // Only drop the slot we saw fail, not a newer retry
        if slots.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(key);
        }
    }
}

impl std::fmt::Debug for ArtCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtCache").field("entries", &self.len()).finish()
    }
}
