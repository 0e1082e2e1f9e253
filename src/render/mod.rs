//! CPU frame rendering.

pub(crate) mod caption;
/// Cover-fit geometry.
pub mod fit;
/// Rendered frame buffers.
pub mod frame;
/// The montage frame renderer.
pub mod renderer;
