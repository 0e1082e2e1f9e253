use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::fonts::{CaptionTypeface, TextLayoutEngine};
use crate::config::CaptionConfig;
use crate::effects::blur::{blur_rgba8_premul, shadow_blur_params};
use crate::effects::composite::over_in_place;
use crate::effects::style::CaptionStyle;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::mul_div255_u16;
use crate::timeline::era::EraTag;

/// Pre-rasterized caption covering rows `top..top + height` at full canvas width.
#[derive(Clone, Debug)]
pub(crate) struct CaptionSprite {
    top: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CaptionSprite {
    /// Composite the sprite over a full-canvas premultiplied layer.
    pub(crate) fn composite_onto(&self, layer: &mut [u8], canvas: Canvas) -> ReelResult<()> {
        let row = canvas.width as usize * 4;
        let start = self.top as usize * row;
        let end = start + self.height as usize * row;
        let dst = layer
            .get_mut(start..end)
            .ok_or_else(|| ReelError::pipeline_msg("caption sprite outside the layer"))?;
        over_in_place(dst, &self.pixels, 1.0)
    }
}

/// Rasterizes era captions once and hands out cached sprites.
pub(crate) struct CaptionPainter {
    canvas: Canvas,
    typeface: CaptionTypeface,
    font: vello_cpu::peniko::FontData,
    engine: TextLayoutEngine,
    size_px: f32,
    bottom_offset: f32,
    sprites: HashMap<String, Arc<CaptionSprite>>,
}

impl CaptionPainter {
    /// Resolve the caption font.
    ///
    /// Returns `None` when captions are disabled, or when no font is configured and none is
    /// installed. A configured font that fails to load is an error.
    pub(crate) fn from_config(canvas: Canvas, cfg: &CaptionConfig) -> ReelResult<Option<Self>> {
        if !cfg.enabled {
            return Ok(None);
        }
        let typeface = match &cfg.font_path {
            Some(path) => CaptionTypeface::load_file(path)?,
            None => match CaptionTypeface::discover(&cfg.families) {
                Some(t) => t,
                None => {
                    tracing::warn!(
                        families = ?cfg.families,
                        "no caption font found; captions are disabled"
                    );
                    return Ok(None);
                }
            },
        };
        Self::new(canvas, typeface, cfg.size_px, cfg.bottom_offset).map(Some)
    }

    pub(crate) fn new(
        canvas: Canvas,
        typeface: CaptionTypeface,
        size_px: f32,
        bottom_offset: f32,
    ) -> ReelResult<Self> {
        let engine = TextLayoutEngine::new(&typeface)?;
        tracing::debug!(font = typeface.label(), size_px, "caption font ready");
        Ok(Self {
            canvas,
            font: typeface.glyph_font(),
            typeface,
            engine,
            size_px,
            bottom_offset,
            sprites: HashMap::new(),
        })
    }

    pub(crate) fn typeface(&self) -> &CaptionTypeface {
        &self.typeface
    }

    /// Cached sprite for `era`, rasterized on first use.
    pub(crate) fn sprite(
        &mut self,
        era: &EraTag,
        style: &CaptionStyle,
    ) -> ReelResult<Arc<CaptionSprite>> {
        if let Some(sprite) = self.sprites.get(era.as_str()) {
            return Ok(Arc::clone(sprite));
        }
        let sprite = Arc::new(self.rasterize(era.as_str(), style)?);
        self.sprites
            .insert(era.as_str().to_string(), Arc::clone(&sprite));
        Ok(sprite)
    }

    fn rasterize(&mut self, text: &str, style: &CaptionStyle) -> ReelResult<CaptionSprite> {
        let canvas = self.canvas;
        let pad = style_padding(style) as f32;
        let baseline = canvas.height as f32 - self.bottom_offset;
        let top = (baseline - self.size_px * 1.25 - pad).floor().max(0.0);
        let bottom = (baseline + self.size_px * 0.5 + pad)
            .ceil()
            .min(canvas.height as f32);
        if bottom <= top {
            return Ok(CaptionSprite {
                top: 0,
                height: 0,
                pixels: Vec::new(),
            });
        }
        let (top, height) = (top as u32, (bottom - top) as u32);

        let mask = self.glyph_mask(text, baseline - top as f32, height)?;
        let pixels = paint_style(&mask, canvas.width, height, style)?;
        Ok(CaptionSprite {
            top,
            height,
            pixels,
        })
    }

    /// Coverage mask (alpha only) of `text` centered horizontally with its baseline at `baseline`.
    fn glyph_mask(&mut self, text: &str, baseline: f32, height: u32) -> ReelResult<Vec<u8>> {
        let layout = self.engine.layout_line(text, self.size_px)?;
        let line_baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(self.size_px * 0.8);
        let x = (self.canvas.width as f32 - layout.width()) / 2.0;

        let width = u16::try_from(self.canvas.width)
            .map_err(|_| ReelError::context_unavailable("canvas width exceeds u16"))?;
        let height = u16::try_from(height)
            .map_err(|_| ReelError::context_unavailable("caption band exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let mut pixmap = vello_cpu::Pixmap::new(width, height);

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(x),
            f64::from(baseline - line_baseline),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect())
    }
}

fn style_padding(style: &CaptionStyle) -> u32 {
    match style {
        CaptionStyle::Shadow { blur, .. } => shadow_blur_params(*blur).0,
        CaptionStyle::Glow { passes, .. } => passes
            .iter()
            .map(|b| shadow_blur_params(*b).0)
            .max()
            .unwrap_or(0),
    }
}

/// Build the styled sprite from a coverage mask.
fn paint_style(mask: &[u8], width: u32, height: u32, style: &CaptionStyle) -> ReelResult<Vec<u8>> {
    let mut out = vec![0u8; mask.len() * 4];
    match style {
        CaptionStyle::Shadow { fill, shadow, blur } => {
            // Shadow strength follows the fill's own alpha, like a canvas shadow.
            let shadow_alpha = mul_div255_u16(u16::from(shadow[3]), u16::from(fill[3])) as u8;
            let halo = blurred(
                &tint(mask, [shadow[0], shadow[1], shadow[2], shadow_alpha]),
                width,
                height,
                *blur,
            )?;
            over_in_place(&mut out, &halo, 1.0)?;
            over_in_place(&mut out, &tint(mask, *fill), 1.0)?;
        }
        CaptionStyle::Glow { glow, fill, passes } => {
            let halo_src = tint(mask, [glow[0], glow[1], glow[2], 255]);
            let body = tint(mask, [fill[0], fill[1], fill[2], 255]);
            for &pass in passes {
                let halo = blurred(&halo_src, width, height, pass)?;
                over_in_place(&mut out, &halo, 1.0)?;
                over_in_place(&mut out, &body, 1.0)?;
            }
        }
    }
    Ok(out)
}

fn blurred(src: &[u8], width: u32, height: u32, blur: f32) -> ReelResult<Vec<u8>> {
    let (radius, sigma) = shadow_blur_params(blur);
    blur_rgba8_premul(src, width, height, radius, sigma)
}

/// Premultiplied RGBA of a straight color at each coverage value.
fn tint(mask: &[u8], color: [u8; 4]) -> Vec<u8> {
    let mut out = Vec::with_capacity(mask.len() * 4);
    for &m in mask {
        let a = mul_div255_u16(u16::from(color[3]), u16::from(m));
        out.extend(
            [color[0], color[1], color[2]]
                .iter()
                .map(|&c| mul_div255_u16(u16::from(c), a) as u8),
        );
        out.push(a as u8);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
