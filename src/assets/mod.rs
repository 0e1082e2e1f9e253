//! Source image and font resolution.

/// Image references and parallel decoding.
pub mod decode;
/// Caption font discovery and text layout.
pub mod fonts;
/// Decoded premultiplied rasters.
pub mod raster;
