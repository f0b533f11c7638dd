//! The map-widget collaborator contract.
//!
//! The coordination core drives any tiled map implementation through the
//! [`MapWidget`] trait: recenter the view, read the visual center, manage
//! tile layers and overlay markers, and deliver move notifications. Handles
//! returned by the widget are opaque; the store keeps them, the coordinator
//! uses them, nothing else touches the widget.

pub mod headless;

use crate::core::geo::LatLng;
use crate::layers::{marker::MarkerOptions, tile::TileLayerConfig};
use serde::{Deserialize, Serialize};

/// Callback invoked by the widget whenever its visual center changes
pub type MoveCallback = Box<dyn Fn(LatLng) + Send + Sync>;

/// Opaque handle to a tile layer held by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

/// Opaque handle to a marker held by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

/// Grouping of layers for the widget's layer switcher control
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerControl {
    /// Labelled base layers; exactly one is shown at a time
    pub base_layers: Vec<(String, LayerId)>,
    /// Labelled overlays, toggled independently
    pub overlays: Vec<(String, LayerId)>,
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_base_layer(mut self, label: String, layer: LayerId) -> Self {
        self.base_layers.push((label, layer));
        self
    }

    pub fn add_overlay(mut self, label: String, layer: LayerId) -> Self {
        self.overlays.push((label, layer));
        self
    }
}

/// Contract a tiled map implementation provides to the coordinator
pub trait MapWidget: Send {
    /// Recenters the view, keeping the current zoom
    fn set_view(&mut self, center: LatLng);

    /// Current visual center
    fn center(&self) -> LatLng;

    /// Current zoom level
    fn zoom(&self) -> f64;

    /// Registers a tile layer with the widget
    fn add_tile_layer(&mut self, config: TileLayerConfig) -> LayerId;

    /// Installs the layer switcher; its first base layer becomes active
    fn set_layer_control(&mut self, control: LayerControl);

    /// Creates a marker; markers start detached from the map
    fn add_marker(&mut self, options: MarkerOptions) -> MarkerId;

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng);

    /// Attaches a marker overlay; attaching an attached marker is a no-op
    fn attach_marker(&mut self, marker: MarkerId);

    fn detach_marker(&mut self, marker: MarkerId);

    fn is_marker_attached(&self, marker: MarkerId) -> bool;

    fn marker_position(&self, marker: MarkerId) -> Option<LatLng>;

    /// Registers a move listener, fired after every center change
    fn on_move(&mut self, callback: MoveCallback);

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
