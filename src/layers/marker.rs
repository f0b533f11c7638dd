use crate::core::constants::{
    CURRENT_LOCATION_ICON, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, TARGET_LOCATION_ICON,
};
use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a marker plays on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerRole {
    CurrentLocation,
    Target,
}

impl MarkerRole {
    pub const ALL: [MarkerRole; 2] = [MarkerRole::CurrentLocation, MarkerRole::Target];
}

impl fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerRole::CurrentLocation => write!(f, "current-location"),
            MarkerRole::Target => write!(f, "target"),
        }
    }
}

/// Icon displayed for a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerIcon {
    /// Asset name resolved by the widget (SVG in the stock setup)
    pub asset: String,
    pub size: (u32, u32),
    pub anchor: (u32, u32),
}

impl MarkerIcon {
    pub fn new(asset: String) -> Self {
        Self {
            asset,
            size: MARKER_ICON_SIZE,
            anchor: MARKER_ICON_ANCHOR,
        }
    }

    pub fn current_location() -> Self {
        Self::new(CURRENT_LOCATION_ICON.to_string())
    }

    pub fn target() -> Self {
        Self::new(TARGET_LOCATION_ICON.to_string())
    }
}

/// Options used when creating a marker on the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    /// Initial position; markers start detached
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<String>,
}

impl MarkerOptions {
    pub fn new(position: LatLng, icon: MarkerIcon) -> Self {
        Self {
            position,
            icon,
            popup: None,
        }
    }

    pub fn with_popup(mut self, text: String) -> Self {
        self.popup = Some(text);
        self
    }

    /// Stock options for each role, pre-positioned at `position`
    pub fn for_role(role: MarkerRole, position: LatLng) -> Self {
        match role {
            MarkerRole::CurrentLocation => {
                Self::new(position, MarkerIcon::current_location())
                    .with_popup("Current location".to_string())
            }
            MarkerRole::Target => Self::new(position, MarkerIcon::target())
                .with_popup("Target location".to_string()),
        }
    }
}
