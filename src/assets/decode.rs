use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;
use rayon::prelude::*;

use crate::assets::raster::DecodedRaster;
use crate::foundation::error::{ReelError, ReelResult};

/// Opaque handle to an image that can be resolved to pixels.
#[derive(Clone, Debug)]
pub enum ImageRef {
    /// `data:image/...;base64,...` URL, as returned by the generation service.
    DataUrl(String),
    /// Local file path.
    Path(PathBuf),
    /// Remote URL. Fetching is left to the caller, so these never resolve.
    Remote(String),
    /// Encoded image bytes (PNG, JPEG, WebP, ...).
    Bytes(Arc<[u8]>),
    /// Already-decoded raster.
    Decoded(DecodedRaster),
}

impl ImageRef {
    /// Classify a reference string.
    ///
    /// Relative paths are joined onto `root`.
    pub fn parse(reference: &str, root: &Path) -> Self {
        let trimmed = reference.trim();
        if trimmed.starts_with("data:") {
            return Self::DataUrl(trimmed.to_string());
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::Remote(trimmed.to_string());
        }
        let path = Path::new(trimmed.strip_prefix("file://").unwrap_or(trimmed));
        if path.is_absolute() {
            Self::Path(path.to_path_buf())
        } else {
            Self::Path(root.join(path))
        }
    }
}

impl From<DecodedRaster> for ImageRef {
    fn from(raster: DecodedRaster) -> Self {
        Self::Decoded(raster)
    }
}

/// Decode encoded image bytes into a premultiplied raster.
pub fn decode_image(bytes: &[u8]) -> ReelResult<DecodedRaster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedRaster::from_straight_rgba8(width, height, rgba.as_raw())
}

/// Resolve one reference to pixels.
///
/// Every failure is reported as [`ReelError::ImageDecode`] tagged with `era`.
pub fn resolve_image(era: &str, reference: &ImageRef) -> ReelResult<DecodedRaster> {
    let decoded = match reference {
        ImageRef::Decoded(raster) => return Ok(raster.clone()),
        ImageRef::Remote(url) => {
            return Err(ReelError::image_decode(
                era,
                format!("remote reference '{url}' must be fetched before rendering"),
            ));
        }
        ImageRef::Bytes(bytes) => decode_image(bytes),
        ImageRef::DataUrl(url) => {
            let bytes = decode_data_url(url).map_err(|e| ReelError::image_decode(era, e))?;
            decode_image(&bytes)
        }
        ImageRef::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| {
                ReelError::image_decode(era, format!("read '{}': {e}", path.display()))
            })?;
            decode_image(&bytes)
        }
    };
    decoded.map_err(|e| match e {
        e @ ReelError::ImageDecode { .. } => e,
        other => ReelError::image_decode(era, format!("{other:#}")),
    })
}

/// Resolve all references in parallel, preserving input order.
///
/// The first failure fails the whole set; partial results are discarded.
#[tracing::instrument(skip(refs), fields(count = refs.len()))]
pub fn resolve_all(refs: &[(&str, &ImageRef)]) -> ReelResult<Vec<DecodedRaster>> {
    refs.par_iter()
        .map(|(era, reference)| resolve_image(era, reference))
        .collect()
}

fn decode_data_url(url: &str) -> Result<Vec<u8>, String> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URL".to_string())?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| "data URL has no payload separator".to_string())?;
    if !meta.starts_with("image/") {
        return Err(format!("data URL media type '{meta}' is not an image"));
    }
    if !meta.ends_with(";base64") {
        return Err("data URL payload must be base64".to_string());
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| format!("invalid base64 payload: {e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
