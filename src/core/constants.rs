//! Viewer-wide constants derived from Leaflet defaults and the stock
//! configuration of the reference deployment (a town in Alsace).
//! Keeping them in a single place makes it easier to tweak magic numbers.

use crate::core::geo::LatLng;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Initial map view before any geolocation fix arrives.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 48.260022,
    lng: 7.424172,
};

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 13.0;

/// Scale factor for coordinate display rounding (6 decimal digits).
pub const COORDINATES_PRECISION: f64 = 1_000_000.0;

/// Fixed message surfaced when the host has no geolocation capability.
pub const GEOLOCATION_UNAVAILABLE: &str = "Geolocation is not available in your browser.";

/// Marker icon default size in pixels.
pub const MARKER_ICON_SIZE: (u32, u32) = (24, 24);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 12);

/// Icon asset for the current-location marker.
pub const CURRENT_LOCATION_ICON: &str = "my_location_24dp_FF0000.svg";

/// Icon asset for the target-location marker.
pub const TARGET_LOCATION_ICON: &str = "gamepad_24dp_FF0000.svg";
