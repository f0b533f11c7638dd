use crate::core::constants::{COORDINATES_PRECISION, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Latitude bound of the Web Mercator projection
const MAX_LATITUDE: f64 = 85.0511287798;

/// Rounds a coordinate to the display precision (6 decimal digits).
pub fn round_coordinate(coord: f64) -> f64 {
    (coord * COORDINATES_PRECISION).round() / COORDINATES_PRECISION
}

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Returns a copy with both components rounded to display precision
    pub fn rounded(&self) -> LatLng {
        LatLng::new(round_coordinate(self.lat), round_coordinate(self.lng))
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to the Web Mercator usable range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Projects to pixel space at the given zoom (Web Mercator, 256px tiles)
    pub fn project(&self, zoom: f64) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom);
        let lat_rad = Self::clamp_lat(self.lat).to_radians();
        let x = (self.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * scale;
        Point::new(x, y)
    }

    /// Creates LatLng from pixel space at the given zoom (inverse of `project`)
    pub fn unproject(point: Point, zoom: f64) -> Self {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom);
        let lng = point.x / scale * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * point.y / scale)).sinh().atan().to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for LatLng {
    /// Formats as `"lat, lng"` using the shortest round-trip decimal form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

impl FromStr for LatLng {
    type Err = crate::Error;

    /// Parses `"lat, lng"` free text. Both fields must parse as finite
    /// numbers; surrounding whitespace is tolerated, trailing fields ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (lat, lng) = match (parts.next(), parts.next()) {
            (Some(lat), Some(lng)) => (lat.trim(), lng.trim()),
            _ => return Err(crate::Error::InvalidCoordinates(s.to_string())),
        };

        let lat: f64 = lat
            .parse()
            .map_err(|_| crate::Error::InvalidCoordinates(s.to_string()))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| crate::Error::InvalidCoordinates(s.to_string()))?;

        if !lat.is_finite() || !lng.is_finite() {
            return Err(crate::Error::InvalidCoordinates(s.to_string()));
        }

        Ok(LatLng::new(lat, lng))
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
