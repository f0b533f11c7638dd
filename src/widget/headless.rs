//! In-process map widget with no rendering backend.
//!
//! `HeadlessMap` keeps the full widget state: view, tile layers, the layer
//! switcher, markers and move listeners, and does Web Mercator pixel math
//! for drag panning. It is both the test double for the coordination core
//! and the state model the egui panel paints from.

use crate::{
    core::geo::{LatLng, Point},
    layers::{marker::MarkerOptions, tile::TileLayerConfig},
    widget::{LayerControl, LayerId, MapWidget, MarkerId, MoveCallback},
};

struct LayerState {
    config: TileLayerConfig,
    /// Meaningful for overlays; base visibility follows `active_base`
    visible: bool,
}

struct MarkerState {
    options: MarkerOptions,
    position: LatLng,
    attached: bool,
}

pub struct HeadlessMap {
    center: LatLng,
    zoom: f64,
    layers: Vec<(LayerId, LayerState)>,
    control: Option<LayerControl>,
    active_base: Option<LayerId>,
    markers: Vec<(MarkerId, MarkerState)>,
    move_listeners: Vec<MoveCallback>,
    next_id: u64,
}

impl HeadlessMap {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            layers: Vec::new(),
            control: None,
            active_base: None,
            markers: Vec::new(),
            move_listeners: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn fire_move(&self) {
        for listener in &self.move_listeners {
            listener(self.center);
        }
    }

    /// Pans by a pixel-space delta at the current zoom, like a drag gesture
    pub fn pan_by(&mut self, delta: Point) {
        let projected = self.center.project(self.zoom).add(&delta);
        let raw = LatLng::unproject(projected, self.zoom);
        let target = LatLng::new(LatLng::clamp_lat(raw.lat), LatLng::wrap_lng(raw.lng));
        self.set_view(target);
    }

    /// Sets the zoom, clamped to the active base layer's range
    pub fn set_zoom(&mut self, zoom: f64) {
        let (min, max) = match self.active_base_layer() {
            Some(base) => (base.min_zoom as f64, base.max_zoom as f64),
            None => (0.0, 19.0),
        };
        self.zoom = zoom.clamp(min, max);
    }

    pub fn layer(&self, id: LayerId) -> Option<&TileLayerConfig> {
        self.layers
            .iter()
            .find(|(layer_id, _)| *layer_id == id)
            .map(|(_, state)| &state.config)
    }

    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.control.as_ref()
    }

    pub fn active_base_layer(&self) -> Option<&TileLayerConfig> {
        self.active_base.and_then(|id| self.layer(id))
    }

    /// Switches the active base layer; ids outside the control are ignored
    pub fn select_base_layer(&mut self, id: LayerId) {
        let known = self
            .control
            .as_ref()
            .map(|control| control.base_layers.iter().any(|(_, base)| *base == id))
            .unwrap_or(false);
        if known {
            self.active_base = Some(id);
        } else {
            log::debug!("ignoring base selection for unknown layer {:?}", id);
        }
    }

    pub fn set_overlay_visible(&mut self, id: LayerId, visible: bool) {
        if let Some((_, state)) = self.layers.iter_mut().find(|(layer_id, _)| *layer_id == id) {
            state.visible = visible;
        }
    }

    pub fn is_layer_visible(&self, id: LayerId) -> bool {
        if self.active_base == Some(id) {
            return true;
        }
        self.layers
            .iter()
            .find(|(layer_id, _)| *layer_id == id)
            .map(|(_, state)| state.visible)
            .unwrap_or(false)
    }

    /// Attribution lines of all currently visible layers, in layer order
    pub fn attributions(&self) -> Vec<&str> {
        let mut lines = Vec::new();
        for (id, state) in &self.layers {
            if !self.is_layer_visible(*id) {
                continue;
            }
            if let Some(attribution) = state.config.attribution.as_deref() {
                if !lines.contains(&attribution) {
                    lines.push(attribution);
                }
            }
        }
        lines
    }

    /// Currently attached markers with their positions, in creation order
    pub fn attached_markers(&self) -> Vec<(&MarkerOptions, LatLng)> {
        self.markers
            .iter()
            .filter(|(_, state)| state.attached)
            .map(|(_, state)| (&state.options, state.position))
            .collect()
    }

    fn marker_state(&self, marker: MarkerId) -> Option<&MarkerState> {
        self.markers
            .iter()
            .find(|(id, _)| *id == marker)
            .map(|(_, state)| state)
    }

    fn marker_state_mut(&mut self, marker: MarkerId) -> Option<&mut MarkerState> {
        self.markers
            .iter_mut()
            .find(|(id, _)| *id == marker)
            .map(|(_, state)| state)
    }
}

impl MapWidget for HeadlessMap {
    fn set_view(&mut self, center: LatLng) {
        if self.center != center {
            self.center = center;
            self.fire_move();
        }
    }

    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn add_tile_layer(&mut self, config: TileLayerConfig) -> LayerId {
        let id = LayerId(self.next_id());
        self.layers.push((
            id,
            LayerState {
                config,
                visible: false,
            },
        ));
        id
    }

    fn set_layer_control(&mut self, control: LayerControl) {
        self.active_base = control.base_layers.first().map(|(_, id)| *id);
        self.control = Some(control);
    }

    fn add_marker(&mut self, options: MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_id());
        let position = options.position;
        self.markers.push((
            id,
            MarkerState {
                options,
                position,
                attached: false,
            },
        ));
        id
    }

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) {
        if let Some(state) = self.marker_state_mut(marker) {
            state.position = position;
        }
    }

    fn attach_marker(&mut self, marker: MarkerId) {
        if let Some(state) = self.marker_state_mut(marker) {
            state.attached = true;
        }
    }

    fn detach_marker(&mut self, marker: MarkerId) {
        if let Some(state) = self.marker_state_mut(marker) {
            state.attached = false;
        }
    }

    fn is_marker_attached(&self, marker: MarkerId) -> bool {
        self.marker_state(marker)
            .map(|state| state.attached)
            .unwrap_or(false)
    }

    fn marker_position(&self, marker: MarkerId) -> Option<LatLng> {
        self.marker_state(marker).map(|state| state.position)
    }

    fn on_move(&mut self, callback: MoveCallback) {
        self.move_listeners.push(callback);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::marker::MarkerRole;

    fn test_map() -> HeadlessMap {
        HeadlessMap::new(LatLng::new(48.260022, 7.424172), 13.0)
    }

    #[test]
    fn test_set_view_fires_move_listeners() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut map = test_map();
        map.on_move(Box::new(move |center| {
            let _ = tx.send(center);
        }));

        let target = LatLng::new(45.5, 4.8);
        map.set_view(target);
        assert_eq!(rx.try_recv().unwrap(), target);

        // No motion, no event
        map.set_view(target);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_marker_lifecycle() {
        let mut map = test_map();
        let options =
            MarkerOptions::for_role(MarkerRole::Target, LatLng::new(48.260022, 7.424172));
        let marker = map.add_marker(options);

        assert!(!map.is_marker_attached(marker));

        map.attach_marker(marker);
        assert!(map.is_marker_attached(marker));
        map.attach_marker(marker);
        assert!(map.is_marker_attached(marker));
        assert_eq!(map.attached_markers().len(), 1);

        let moved = LatLng::new(45.5, 4.8);
        map.set_marker_position(marker, moved);
        assert_eq!(map.marker_position(marker), Some(moved));

        map.detach_marker(marker);
        assert!(!map.is_marker_attached(marker));
        assert_eq!(map.marker_position(marker), Some(moved));
    }

    #[test]
    fn test_pan_by_moves_center() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut map = test_map();
        map.on_move(Box::new(move |center| {
            let _ = tx.send(center);
        }));

        let before = map.center();
        map.pan_by(Point::new(200.0, 0.0));
        let after = map.center();

        assert!(after.lng > before.lng);
        assert!((after.lat - before.lat).abs() < 1e-9);
        assert_eq!(rx.try_recv().unwrap(), after);
    }

    #[test]
    fn test_layer_control_activates_first_base() {
        let mut map = test_map();
        let plan = map.add_tile_layer(TileLayerConfig::ign_plan());
        let osm = map.add_tile_layer(TileLayerConfig::openstreetmap());
        let ortho = map.add_tile_layer(TileLayerConfig::ign_orthophotos());

        map.set_layer_control(
            LayerControl::new()
                .add_base_layer("IGNv2".to_string(), plan)
                .add_base_layer("OpenStreetMap".to_string(), osm)
                .add_overlay("Satellite".to_string(), ortho),
        );

        assert!(map.is_layer_visible(plan));
        assert!(!map.is_layer_visible(osm));
        assert!(!map.is_layer_visible(ortho));
        assert_eq!(map.active_base_layer().map(|l| l.name.as_str()), Some("IGNv2"));

        map.select_base_layer(osm);
        assert!(map.is_layer_visible(osm));
        assert!(!map.is_layer_visible(plan));

        map.set_overlay_visible(ortho, true);
        assert!(map.is_layer_visible(ortho));
        assert_eq!(map.attributions().len(), 2);
    }

    #[test]
    fn test_zoom_clamped_to_base_layer_range() {
        let mut map = test_map();
        let plan = map.add_tile_layer(TileLayerConfig::ign_plan());
        map.set_layer_control(LayerControl::new().add_base_layer("IGNv2".to_string(), plan));

        map.set_zoom(25.0);
        assert_eq!(map.zoom(), 18.0);
        map.set_zoom(-3.0);
        assert_eq!(map.zoom(), 0.0);
        map.set_zoom(13.0);
        assert_eq!(map.zoom(), 13.0);
    }
}
