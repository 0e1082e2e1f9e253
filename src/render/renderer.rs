use crate::assets::fonts::CaptionTypeface;
use crate::assets::raster::DecodedRaster;
use crate::config::RenderConfig;
use crate::effects::composite::{fill, over_in_place};
use crate::effects::style::EraStyleTable;
use crate::foundation::core::{Affine, Canvas, Rgba8Premul};
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::caption::CaptionPainter;
use crate::render::fit::cover_rect;
use crate::render::frame::FrameRGBA;
use crate::timeline::era::EraTag;

/// Draws montage layers onto a fixed-size premultiplied canvas.
///
/// Each [`FrameRenderer::draw_frame`] call renders one complete layer (image, overlay, caption)
/// and composites it over the canvas at the requested opacity.
pub struct FrameRenderer {
    canvas: Canvas,
    background: Rgba8Premul,
    ken_burns: f64,
    styles: EraStyleTable,
    captions: Option<CaptionPainter>,
    ctx: vello_cpu::RenderContext,
    layer: vello_cpu::Pixmap,
    surface: FrameRGBA,
}

impl FrameRenderer {
    /// Create a renderer for `config`, resolving the caption font.
    ///
    /// Fails with [`ReelError::RenderContextUnavailable`] for an unusable canvas size or an
    /// explicitly configured font that cannot be loaded.
    #[tracing::instrument(skip(config), fields(width = config.width, height = config.height))]
    pub fn new(config: &RenderConfig) -> ReelResult<Self> {
        let canvas = config.canvas();
        let captions = CaptionPainter::from_config(canvas, &config.caption)?;
        Self::with_captions(config, captions)
    }

    /// Create a renderer that paints captions with `typeface`, skipping font discovery.
    pub fn with_typeface(config: &RenderConfig, typeface: CaptionTypeface) -> ReelResult<Self> {
        let captions = CaptionPainter::new(
            config.canvas(),
            typeface,
            config.caption.size_px,
            config.caption.bottom_offset,
        )?;
        Self::with_captions(config, Some(captions))
    }

    fn with_captions(config: &RenderConfig, captions: Option<CaptionPainter>) -> ReelResult<Self> {
        let canvas = config.canvas();
        let (width, height) = backend_size(canvas)?;
        let background = config.background_premul();
        Ok(Self {
            canvas,
            background,
            ken_burns: config.ken_burns,
            styles: config.style_table()?,
            captions,
            ctx: vello_cpu::RenderContext::new(width, height),
            layer: vello_cpu::Pixmap::new(width, height),
            surface: FrameRGBA::filled(canvas, background.to_array()),
        })
    }

    /// Canvas size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Whether captions will be drawn.
    pub fn has_captions(&self) -> bool {
        self.captions.is_some()
    }

    /// Caption typeface in use, if any.
    pub fn caption_typeface(&self) -> Option<&CaptionTypeface> {
        self.captions.as_ref().map(|c| c.typeface())
    }

    /// Reset the canvas to the background color.
    pub fn clear(&mut self) {
        fill(&mut self.surface.data, self.background.to_array());
    }

    /// Draw one layer: cover-fit `image` at `zoom` progress, the era overlay and the caption,
    /// composited over the canvas at `opacity`.
    pub fn draw_frame(
        &mut self,
        image: &DecodedRaster,
        era: &EraTag,
        zoom: f64,
        opacity: f32,
    ) -> ReelResult<()> {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return Ok(());
        }
        self.paint_image(image, zoom);

        let canvas = self.canvas;
        let year = era.year();
        let layer = self.layer.data_as_u8_slice_mut();
        if let Some(effect) = self.styles.overlay_for(year) {
            effect.apply(layer, canvas);
        }
        if let Some(painter) = self.captions.as_mut() {
            let sprite = painter.sprite(era, self.styles.caption_for(year))?;
            sprite.composite_onto(layer, canvas)?;
        }

        over_in_place(
            &mut self.surface.data,
            self.layer.data_as_u8_slice(),
            opacity,
        )
    }

    /// The current canvas contents.
    pub fn surface(&self) -> &FrameRGBA {
        &self.surface
    }

    fn paint_image(&mut self, image: &DecodedRaster, zoom: f64) {
        let ctx = &mut self.ctx;
        ctx.reset();

        let dst = cover_rect(
            self.canvas,
            image.width(),
            image.height(),
            zoom,
            self.ken_burns,
        );
        let tr = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(
                dst.width() / f64::from(image.width()),
                dst.height() / f64::from(image.height()),
            );
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(image.paint());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width()),
            f64::from(image.height()),
        ));
        ctx.flush();
        ctx.render_to_pixmap(&mut self.layer);
    }
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("canvas", &self.canvas)
            .field("captions", &self.captions.is_some())
            .finish_non_exhaustive()
    }
}

fn backend_size(canvas: Canvas) -> ReelResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(ReelError::context_unavailable(format!(
            "canvas {}x{} has a zero dimension",
            canvas.width, canvas.height
        )));
    }
    let w = u16::try_from(canvas.width);
    let h = u16::try_from(canvas.height);
    match (w, h) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ReelError::context_unavailable(format!(
            "canvas {}x{} exceeds the raster backend limit",
            canvas.width, canvas.height
        ))),
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
