//! Declarative tile layer descriptors.
//!
//! The viewer core never fetches imagery itself; these configs are handed to
//! the map widget, which owns rendering. The built-in catalog covers the
//! OpenStreetMap raster layer and the three Géoplateforme WMTS layers the
//! stock configuration uses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Image format served by a tile endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
    Png,
    Jpeg,
}

impl TileFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            TileFormat::Png => "image/png",
            TileFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileFormat::Png => write!(f, "png"),
            TileFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

/// Configuration for a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayerConfig {
    /// Display name, also used as the layer-control label
    pub name: String,
    /// URL template with `{z}`, `{x}`, `{y}` placeholders
    pub url_template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Tile size in pixels
    pub tile_size: u32,
    /// Attribution text
    pub attribution: Option<String>,
    pub format: TileFormat,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            url_template: String::new(),
            min_zoom: 0,
            max_zoom: 18,
            tile_size: crate::core::constants::TILE_SIZE,
            attribution: None,
            format: TileFormat::Png,
        }
    }
}

impl TileLayerConfig {
    pub fn new(name: String, url_template: String) -> Self {
        Self {
            name,
            url_template,
            ..Default::default()
        }
    }

    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_attribution(mut self, attribution: String) -> Self {
        self.attribution = Some(attribution);
        self
    }

    pub fn with_format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    /// The stock OpenStreetMap raster layer
    pub fn openstreetmap() -> Self {
        Self::new(
            "OpenStreetMap".to_string(),
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        )
        .with_zoom_range(0, 19)
        .with_attribution(
            "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                .to_string(),
        )
    }

    /// IGN Plan v2 base map (Géoplateforme WMTS)
    pub fn ign_plan() -> Self {
        Self::geoportail(
            "IGNv2".to_string(),
            "GEOGRAPHICALGRIDSYSTEMS.PLANIGNV2",
            TileFormat::Png,
        )
        .with_zoom_range(0, 18)
    }

    /// IGN aerial imagery overlay (Géoplateforme WMTS)
    pub fn ign_orthophotos() -> Self {
        Self::geoportail(
            "Satellite".to_string(),
            "ORTHOIMAGERY.ORTHOPHOTOS",
            TileFormat::Jpeg,
        )
        .with_zoom_range(0, 19)
    }

    /// IGN DFCI wildfire-grid overlay (Géoplateforme WMTS)
    pub fn ign_dfci() -> Self {
        Self::geoportail(
            "DFCI".to_string(),
            "GEOGRAPHICALGRIDSYSTEM.DFCI",
            TileFormat::Png,
        )
        .with_zoom_range(0, 16)
    }

    /// Assembles a Géoplateforme WMTS GetTile template for `layer`
    fn geoportail(name: String, layer: &str, format: TileFormat) -> Self {
        let url_template = format!(
            "https://data.geopf.fr/wmts?\
             &REQUEST=GetTile&SERVICE=WMTS&VERSION=1.0.0\
             &STYLE=normal\
             &TILEMATRIXSET=PM\
             &FORMAT={}\
             &LAYER={}\
             &TILEMATRIX={{z}}\
             &TILEROW={{y}}\
             &TILECOL={{x}}",
            format.mime_type(),
            layer
        );
        Self::new(name, url_template)
            .with_attribution("IGN-F/Geoportail".to_string())
            .with_format(format)
    }

    /// Build a URL for the requested tile coordinate
    pub fn url_for(&self, z: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_url() {
        let osm = TileLayerConfig::openstreetmap();
        assert_eq!(
            osm.url_for(13, 4265, 2851),
            "https://tile.openstreetmap.org/13/4265/2851.png"
        );
        assert_eq!(osm.max_zoom, 19);
        assert_eq!(osm.tile_size, 256);
    }

    #[test]
    fn test_geoportail_url_substitution() {
        let plan = TileLayerConfig::ign_plan();
        let url = plan.url_for(13, 4265, 2851);
        assert!(url.starts_with("https://data.geopf.fr/wmts?"));
        assert!(url.contains("LAYER=GEOGRAPHICALGRIDSYSTEMS.PLANIGNV2"));
        assert!(url.contains("FORMAT=image/png"));
        assert!(url.contains("TILEMATRIX=13"));
        assert!(url.contains("TILEROW=2851"));
        assert!(url.contains("TILECOL=4265"));
        assert!(!url.contains('{'));
    }

    #[test]
    fn test_catalog_zoom_ranges() {
        assert_eq!(TileLayerConfig::ign_plan().max_zoom, 18);
        assert_eq!(TileLayerConfig::ign_orthophotos().max_zoom, 19);
        assert_eq!(TileLayerConfig::ign_dfci().max_zoom, 16);
        assert_eq!(
            TileLayerConfig::ign_orthophotos().format,
            TileFormat::Jpeg
        );
    }

    #[test]
    fn test_attributions() {
        assert_eq!(
            TileLayerConfig::ign_plan().attribution.as_deref(),
            Some("IGN-F/Geoportail")
        );
        assert!(TileLayerConfig::openstreetmap()
            .attribution
            .unwrap()
            .contains("OpenStreetMap"));
    }
}
