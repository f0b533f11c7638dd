//! Prelude module for common geoscope types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use geoscope::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    constants,
    coordinator::{ErrorCallback, MapCoordinator},
    geo::{round_coordinate, LatLng, Point},
    store::MapStateStore,
};

pub use crate::layers::{
    marker::{MarkerIcon, MarkerOptions, MarkerRole},
    tile::{TileFormat, TileLayerConfig},
};

pub use crate::widget::{
    headless::HeadlessMap, LayerControl, LayerId, MapWidget, MarkerId, MoveCallback,
};

pub use crate::geolocation::{
    FixedPosition, ManualPosition, ManualPositionHandle, PositionOptions, PositionReply,
    PositionSource,
};

pub use crate::notify::{Notification, NotificationId, Notifications, Severity};

pub use crate::ui::coordinates::CoordinateInput;

pub use crate::{Error as ViewerError, Result};

pub use std::sync::{Arc, Mutex};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
