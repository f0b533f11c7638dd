//! Coordinate entry panel logic.
//!
//! `CoordinateInput` owns the free-text `"lat, lng"` field: it re-derives
//! the displayed text from the authoritative map center whenever the store
//! revision changes (overriding any unsubmitted edit), and turns a
//! submitted text into a recenter plus a target-marker placement.
//! Malformed input is dropped without feedback; that is the panel's
//! contract, not an oversight.

use crate::core::coordinator::MapCoordinator;
use crate::core::geo::LatLng;
use crate::core::store::MapStateStore;
use crate::layers::marker::MarkerRole;

#[derive(Default)]
pub struct CoordinateInput {
    text: String,
    seen_revision: u64,
}

impl CoordinateInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field text, display-rounded when derived from the store
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access for the text widget binding
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Re-derives the text from the authoritative center when it changed
    /// since the last call. An in-progress edit is overwritten; the store
    /// always wins.
    pub fn sync(&mut self, store: &MapStateStore) {
        if store.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = store.revision();
        self.text = match store.map_center() {
            Some(center) => center.rounded().to_string(),
            None => String::new(),
        };
    }

    /// Parses the field and dispatches a recenter plus target-marker
    /// placement. The point is rounded to display precision before
    /// dispatch. Returns false (and changes nothing) on malformed text.
    pub fn submit(&mut self, coordinator: &mut MapCoordinator, store: &mut MapStateStore) -> bool {
        let point = match self.text.parse::<LatLng>() {
            Ok(point) => point.rounded(),
            Err(_) => {
                log::debug!("ignoring malformed coordinate input {:?}", self.text);
                return false;
            }
        };
        coordinator.center_on(store, point);
        coordinator.show_marker(store, MarkerRole::Target, point);
        true
    }
}
