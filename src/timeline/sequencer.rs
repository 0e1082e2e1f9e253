use crate::assets::decode::{ImageRef, resolve_all};
use crate::assets::raster::DecodedRaster;
use crate::foundation::error::{ReelError, ReelResult};
use crate::timeline::era::EraTag;
use crate::timeline::input::TimelineInput;

/// An era with a usable, not yet decoded, image reference.
#[derive(Clone, Debug)]
pub struct SequencedRef {
    /// Era tag.
    pub era: EraTag,
    /// Reference to resolve.
    pub image: ImageRef,
}

/// One decoded montage segment.
#[derive(Clone, Debug)]
pub struct TimelineEntry {
    /// Era tag, also the caption text.
    pub era: EraTag,
    /// Decoded source image.
    pub image: DecodedRaster,
}

/// Order the usable references chronologically.
///
/// Eras without an image are dropped, so a partially completed generation run still yields a
/// shorter montage. Fails with [`ReelError::EmptyInput`] when nothing remains.
pub fn sequence_refs(input: &TimelineInput) -> ReelResult<Vec<SequencedRef>> {
    let mut out = input
        .iter()
        .filter_map(|(tag, image)| image.map(|image| (tag, image)))
        .map(|(tag, image)| {
            Ok(SequencedRef {
                era: EraTag::parse(tag)?,
                image: image.clone(),
            })
        })
        .collect::<ReelResult<Vec<_>>>()?;

    if out.is_empty() {
        return Err(ReelError::EmptyInput);
    }
    // Keys are unique tags, so years are unique and the order is total.
    out.sort_by(|a, b| a.era.cmp(&b.era));
    Ok(out)
}

/// Decode every sequenced reference in parallel, preserving order.
pub fn decode_sequence(refs: &[SequencedRef]) -> ReelResult<Vec<TimelineEntry>> {
    let pairs: Vec<(&str, &ImageRef)> = refs.iter().map(|r| (r.era.as_str(), &r.image)).collect();
    let rasters = resolve_all(&pairs)?;
    Ok(refs
        .iter()
        .zip(rasters)
        .map(|(r, image)| TimelineEntry {
            era: r.era.clone(),
            image,
        })
        .collect())
}

/// Sequence and decode `input` in one step.
pub fn build_timeline(input: &TimelineInput) -> ReelResult<Vec<TimelineEntry>> {
    let refs = sequence_refs(input)?;
    decode_sequence(&refs)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/sequencer.rs"]
mod tests;
