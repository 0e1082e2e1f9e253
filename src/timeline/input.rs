use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;

use crate::assets::decode::ImageRef;
use crate::foundation::error::{ReelError, ReelResult};

/// Generation status of one era, as tracked by the upload/gallery front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Still being generated.
    Pending,
    /// Generated successfully.
    Done,
    /// Generation failed.
    Error,
}

/// One value of the gallery's era → image mapping.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GeneratedImage {
    /// Generation status. Missing status is treated as `done` when a URL is present.
    #[serde(default)]
    pub status: Option<GenerationStatus>,
    /// Image reference (data URL, path, or remote URL).
    #[serde(default)]
    pub url: Option<String>,
    /// Failure message for `error` entries.
    #[serde(default)]
    pub error: Option<String>,
}

impl GeneratedImage {
    /// Return the usable image reference, if any.
    pub fn usable_url(&self) -> Option<&str> {
        match self.status {
            Some(GenerationStatus::Pending | GenerationStatus::Error) => None,
            Some(GenerationStatus::Done) | None => {
                self.url.as_deref().filter(|u| !u.trim().is_empty())
            }
        }
    }
}

/// Era → optional image reference mapping handed to the montage renderer.
///
/// Keys are unvalidated era tags; they are checked when the input is sequenced.
#[derive(Clone, Debug, Default)]
pub struct TimelineInput {
    slots: BTreeMap<String, Option<ImageRef>>,
}

impl TimelineInput {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image for `era`, replacing any previous value.
    pub fn insert(&mut self, era: impl Into<String>, image: Option<ImageRef>) -> &mut Self {
        self.slots.insert(era.into(), image);
        self
    }

    /// Builder-style [`TimelineInput::insert`].
    pub fn with(mut self, era: impl Into<String>, image: impl Into<ImageRef>) -> Self {
        self.insert(era, Some(image.into()));
        self
    }

    /// Build from the gallery mapping. Relative file references resolve against `root`.
    pub fn from_generated(
        images: &BTreeMap<String, Option<GeneratedImage>>,
        root: &Path,
    ) -> Self {
        let slots = images
            .iter()
            .map(|(era, image)| {
                let reference = image
                    .as_ref()
                    .and_then(GeneratedImage::usable_url)
                    .map(|url| ImageRef::parse(url, root));
                (era.clone(), reference)
            })
            .collect();
        Self { slots }
    }

    /// Parse the gallery mapping from JSON text.
    pub fn from_json_str(json: &str, root: &Path) -> ReelResult<Self> {
        let images: BTreeMap<String, Option<GeneratedImage>> = serde_json::from_str(json)
            .map_err(|e| ReelError::validation(format!("timeline JSON: {e}")))?;
        Ok(Self::from_generated(&images, root))
    }

    /// Read the gallery mapping from a JSON file; relative references resolve next to it.
    pub fn from_json_file(path: &Path) -> ReelResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read timeline '{}'", path.display()))?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&json, root)
    }

    /// Number of eras in the mapping, usable or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when the mapping has no eras at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, Option<&ImageRef>)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/input.rs"]
mod tests;
