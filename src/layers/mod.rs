pub mod marker;
pub mod tile;

// Re-exports for convenience
pub use marker::{MarkerIcon, MarkerOptions, MarkerRole};
pub use tile::{TileFormat, TileLayerConfig};
