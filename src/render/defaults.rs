//! Default values for unspecified properties

/// Font family when neither the item nor the config names one.
pub const FONT: &str = "sans-serif";

/// Font size in pixels.
pub const FONT_SIZE: f64 = 11.0;

/// Symbol area in square pixels.
pub const SYMBOL_SIZE: f64 = 100.0;

/// Symbol shape.
pub const SYMBOL_SHAPE: &str = "circle";

/// Axis layer that draws beneath a group's own marks.
pub const BACK_LAYER: &str = "back";
