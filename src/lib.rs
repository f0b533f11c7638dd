//! # Geoscope
//!
//! The map-state coordination core of an interactive map viewer.
//!
//! This library owns the single source of truth for the map center and
//! mediates between three independent event sources (map drag, geolocation
//! fixes, manual coordinate entry), manages the current/target location
//! marker lifecycles, and routes asynchronous failures into a user-visible
//! notification queue. Rendering, tile fetching and the host geolocation
//! backend stay behind the [`widget::MapWidget`] and
//! [`geolocation::PositionSource`] contracts.

pub mod core;
pub mod geolocation;
pub mod layers;
pub mod notify;
pub mod prelude;
pub mod ui;
pub mod widget;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    coordinator::{ErrorCallback, MapCoordinator},
    geo::{round_coordinate, LatLng, Point},
    store::MapStateStore,
};

pub use layers::{
    marker::{MarkerIcon, MarkerOptions, MarkerRole},
    tile::{TileFormat, TileLayerConfig},
};

pub use widget::{
    headless::HeadlessMap, LayerControl, LayerId, MapWidget, MarkerId, MoveCallback,
};

pub use geolocation::{
    FixedPosition, ManualPosition, ManualPositionHandle, PositionOptions, PositionReply,
    PositionSource,
};

pub use notify::{Notification, NotificationId, Notifications, Severity};

pub use ui::coordinates::CoordinateInput;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ViewerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = ViewerError;
