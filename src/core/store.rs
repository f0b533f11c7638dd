//! Shared map-session state.
//!
//! `MapStateStore` is storage only: the widget handle, the marker handles by
//! role and the authoritative map center live here, with no policy attached.
//! [`MapCoordinator`](crate::core::coordinator::MapCoordinator) is the only
//! writer of the widget; everything else reads. The store is passed
//! explicitly to each operation instead of living in ambient global state.

use crate::core::geo::LatLng;
use crate::layers::marker::MarkerRole;
use crate::prelude::HashMap;
use crate::widget::{MapWidget, MarkerId};

/// Per-session state cell: widget handle, marker handles, current center.
#[derive(Default)]
pub struct MapStateStore {
    map: Option<Box<dyn MapWidget>>,
    markers: HashMap<MarkerRole, MarkerId>,
    center: Option<LatLng>,
    revision: u64,
}

impl MapStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the widget handle. Settable once per session; a repeated
    /// set is ignored so a duplicate mount cannot replace a live map.
    pub fn set_map(&mut self, map: Box<dyn MapWidget>) {
        if self.map.is_some() {
            log::warn!("map handle already set, ignoring replacement");
            return;
        }
        self.map = Some(map);
    }

    pub fn map(&self) -> Option<&dyn MapWidget> {
        self.map.as_deref()
    }

    pub fn map_mut(&mut self) -> Option<&mut (dyn MapWidget + 'static)> {
        self.map.as_deref_mut()
    }

    pub fn has_map(&self) -> bool {
        self.map.is_some()
    }

    /// Installs a marker handle for a role, once per session.
    pub fn set_marker(&mut self, role: MarkerRole, marker: MarkerId) {
        if self.markers.contains_key(&role) {
            log::warn!("{} marker already set, ignoring replacement", role);
            return;
        }
        self.markers.insert(role, marker);
    }

    pub fn marker(&self, role: MarkerRole) -> Option<MarkerId> {
        self.markers.get(&role).copied()
    }

    /// Writes the authoritative center. The revision bumps only when the
    /// value actually changes, so display layers can poll cheaply.
    pub fn set_map_center(&mut self, center: Option<LatLng>) {
        if self.center != center {
            self.center = center;
            self.revision += 1;
        }
    }

    /// `None` until the first move or recenter is observed
    pub fn map_center(&self) -> Option<LatLng> {
        self.center
    }

    /// Change counter for the center value; starts at zero
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DEFAULT_CENTER, DEFAULT_ZOOM};
    use crate::widget::headless::HeadlessMap;

    fn test_widget() -> Box<dyn MapWidget> {
        Box::new(HeadlessMap::new(DEFAULT_CENTER, DEFAULT_ZOOM))
    }

    #[test]
    fn test_reads_before_initialization_return_none() {
        let store = MapStateStore::new();
        assert!(store.map().is_none());
        assert!(store.marker(MarkerRole::CurrentLocation).is_none());
        assert!(store.marker(MarkerRole::Target).is_none());
        assert!(store.map_center().is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_map_handle_set_once() {
        let mut store = MapStateStore::new();
        store.set_map(test_widget());
        assert!(store.has_map());

        let mut second = HeadlessMap::new(DEFAULT_CENTER, DEFAULT_ZOOM);
        second.set_view(LatLng::new(45.5, 4.8));
        store.set_map(Box::new(second));

        // First handle survives the second set
        assert_eq!(store.map().unwrap().center(), DEFAULT_CENTER);
    }

    #[test]
    fn test_marker_handles_independent_per_role() {
        let mut store = MapStateStore::new();
        store.set_marker(MarkerRole::CurrentLocation, MarkerId(1));
        store.set_marker(MarkerRole::Target, MarkerId(2));
        store.set_marker(MarkerRole::CurrentLocation, MarkerId(9));

        assert_eq!(store.marker(MarkerRole::CurrentLocation), Some(MarkerId(1)));
        assert_eq!(store.marker(MarkerRole::Target), Some(MarkerId(2)));
    }

    #[test]
    fn test_revision_bumps_only_on_change() {
        let mut store = MapStateStore::new();
        let point = LatLng::new(48.26, 7.45);

        store.set_map_center(Some(point));
        assert_eq!(store.revision(), 1);
        assert_eq!(store.map_center(), Some(point));

        // Idempotent overwrite, no bump
        store.set_map_center(Some(point));
        assert_eq!(store.revision(), 1);

        store.set_map_center(Some(LatLng::new(45.5, 4.8)));
        assert_eq!(store.revision(), 2);

        store.set_map_center(None);
        assert_eq!(store.revision(), 3);
        assert!(store.map_center().is_none());
    }
}
