//! Pixel-level compositing, blur and era overlays.

/// Gaussian blur for caption shadows and glows.
pub mod blur;
/// Premultiplied source-over and "color" blending.
pub mod composite;
/// Whole-frame overlay strategies.
pub mod overlay;
/// Year-range style tables.
pub mod style;
