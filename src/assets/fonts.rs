use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};

/// Font bytes for caption text plus the face index inside them.
#[derive(Clone)]
pub struct CaptionTypeface {
    data: Arc<Vec<u8>>,
    index: u32,
    label: String,
}

impl std::fmt::Debug for CaptionTypeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionTypeface")
            .field("label", &self.label)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl CaptionTypeface {
    /// Wrap raw font bytes.
    pub fn from_bytes(data: Vec<u8>, index: u32, label: impl Into<String>) -> Self {
        Self {
            data: Arc::new(data),
            index,
            label: label.into(),
        }
    }

    /// Load a font file. Failures are [`ReelError::RenderContextUnavailable`].
    pub fn load_file(path: &Path) -> ReelResult<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("read caption font '{}'", path.display()))
            .map_err(|e| ReelError::context_unavailable(format!("{e:#}")))?;
        if data.is_empty() {
            return Err(ReelError::context_unavailable(format!(
                "caption font '{}' is empty",
                path.display()
            )));
        }
        Ok(Self::from_bytes(data, 0, path.display().to_string()))
    }

    /// Find an installed font, trying `families` first and then generic cursive and sans-serif.
    pub fn discover(families: &[String]) -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let mut query_families: Vec<usvg::fontdb::Family<'_>> = families
            .iter()
            .map(|f| usvg::fontdb::Family::Name(f.as_str()))
            .collect();
        query_families.push(usvg::fontdb::Family::Cursive);
        query_families.push(usvg::fontdb::Family::SansSerif);

        let id = db.query(&usvg::fontdb::Query {
            families: &query_families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        })?;
        let label = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "system font".to_string());
        let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(Self::from_bytes(data, index, label))
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Face index inside [`Self::bytes`].
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Family name or file path, for diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn glyph_font(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.data.as_ref().clone()),
            self.index,
        )
    }
}

/// Parley contexts bound to one registered typeface.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl TextLayoutEngine {
    pub(crate) fn new(typeface: &CaptionTypeface) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(typeface.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::context_unavailable(format!(
                "no font families registered from '{}'",
                typeface.label()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::context_unavailable("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape one unwrapped line of text.
    pub(crate) fn layout_line(&mut self, text: &str, size_px: f32) -> ReelResult<parley::Layout<()>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "caption size_px must be finite and > 0",
            ));
        }
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}
