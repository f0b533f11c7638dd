//! Viewer configuration.
//!
//! `MapConfig` describes everything the coordinator feeds the widget during
//! initialization: initial view plus base and overlay tile layers. The
//! default reproduces the stock deployment (IGN Plan and OpenStreetMap base
//! maps with IGN orthophoto and DFCI overlays).

use crate::{
    core::constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
    core::geo::LatLng,
    layers::tile::TileLayerConfig,
    Result, ViewerError,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial view before any geolocation fix arrives
    pub center: LatLng,
    pub zoom: f64,
    /// Mutually exclusive base layers; the first one is active at startup
    pub base_layers: Vec<TileLayerConfig>,
    /// Independently togglable overlays, all hidden at startup
    pub overlays: Vec<TileLayerConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            base_layers: vec![
                TileLayerConfig::ign_plan(),
                TileLayerConfig::openstreetmap(),
            ],
            overlays: vec![
                TileLayerConfig::ign_orthophotos(),
                TileLayerConfig::ign_dfci(),
            ],
        }
    }
}

impl MapConfig {
    pub fn with_center(mut self, center: LatLng) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Loads a config from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// A usable config carries at least one base layer
    pub fn validate(&self) -> Result<()> {
        if self.base_layers.is_empty() {
            return Err(ViewerError::Config(
                "at least one base layer is required".to_string(),
            ));
        }
        Ok(())
    }
}
