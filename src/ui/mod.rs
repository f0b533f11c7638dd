pub mod coordinates;

#[cfg(feature = "egui")]
pub mod widgets;

pub use coordinates::CoordinateInput;
