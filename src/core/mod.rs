pub mod config;
pub mod constants;
pub mod coordinator;
pub mod geo;
pub mod store;

// Re-exports for convenience
pub use config::MapConfig;
pub use coordinator::MapCoordinator;
pub use geo::{LatLng, Point};
pub use store::MapStateStore;
