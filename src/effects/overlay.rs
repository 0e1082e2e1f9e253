use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::effects::composite::{blend_color_in_place, over};
use crate::foundation::core::Canvas;

/// A whole-frame effect applied to a premultiplied RGBA8 layer.
pub trait OverlayEffect: Debug + Send + Sync {
    /// Mutate `pixels` (`canvas.rgba_len()` bytes) in place.
    fn apply(&self, pixels: &mut [u8], canvas: Canvas);
}

/// Radial darkening, transparent inside `inner * H` and reaching `max_alpha` black at `outer * H`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vignette {
    /// Inner radius as a fraction of canvas height.
    #[serde(default = "Vignette::default_inner")]
    pub inner: f32,
    /// Outer radius as a fraction of canvas height.
    #[serde(default = "Vignette::default_outer")]
    pub outer: f32,
    /// Black alpha at the outer radius.
    #[serde(default = "Vignette::default_max_alpha")]
    pub max_alpha: f32,
}

impl Vignette {
    fn default_inner() -> f32 {
        1.0 / 3.0
    }
    fn default_outer() -> f32 {
        1.0
    }
    fn default_max_alpha() -> f32 {
        0.4
    }
}

impl Default for Vignette {
    fn default() -> Self {
        Self {
            inner: Self::default_inner(),
            outer: Self::default_outer(),
            max_alpha: Self::default_max_alpha(),
        }
    }
}

impl OverlayEffect for Vignette {
    fn apply(&self, pixels: &mut [u8], canvas: Canvas) {
        let h = canvas.height as f32;
        let cx = canvas.width as f32 / 2.0;
        let cy = h / 2.0;
        let r0 = self.inner * h;
        let r1 = self.outer * h;
        let span = (r1 - r0).max(f32::EPSILON);
        let w = canvas.width as usize;

        for (i, px) in pixels.chunks_exact_mut(4).enumerate() {
            let x = (i % w) as f32 + 0.5 - cx;
            let y = (i / w) as f32 + 0.5 - cy;
            let t = (((x * x + y * y).sqrt() - r0) / span).clamp(0.0, 1.0);
            let a = t * self.max_alpha;
            if a <= 0.0 {
                continue;
            }
            let out = over([px[0], px[1], px[2], px[3]], [0, 0, 0, 255], a);
            px.copy_from_slice(&out);
        }
    }
}

/// Flat tint composited with the "color" blend mode (backdrop luminosity, tint hue).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorTint {
    /// Tint color.
    pub rgb: [u8; 3],
    /// Tint strength.
    pub alpha: f32,
}

impl OverlayEffect for ColorTint {
    fn apply(&self, pixels: &mut [u8], _canvas: Canvas) {
        blend_color_in_place(pixels, self.rgb, self.alpha);
    }
}

/// Horizontal lines `thickness` px tall every `spacing` rows, starting at row 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scanlines {
    /// Line color.
    #[serde(default = "Scanlines::default_rgb")]
    pub rgb: [u8; 3],
    /// Line alpha.
    #[serde(default = "Scanlines::default_alpha")]
    pub alpha: f32,
    /// Row period.
    #[serde(default = "Scanlines::default_spacing")]
    pub spacing: u32,
    /// Line height in rows.
    #[serde(default = "Scanlines::default_thickness")]
    pub thickness: u32,
}

impl Scanlines {
    fn default_rgb() -> [u8; 3] {
        [255, 255, 255]
    }
    fn default_alpha() -> f32 {
        0.1
    }
    fn default_spacing() -> u32 {
        4
    }
    fn default_thickness() -> u32 {
        1
    }
}

impl Default for Scanlines {
    fn default() -> Self {
        Self {
            rgb: Self::default_rgb(),
            alpha: Self::default_alpha(),
            spacing: Self::default_spacing(),
            thickness: Self::default_thickness(),
        }
    }
}

impl OverlayEffect for Scanlines {
    fn apply(&self, pixels: &mut [u8], canvas: Canvas) {
        let spacing = self.spacing.max(1);
        let thickness = self.thickness.min(spacing);
        let row_len = canvas.width as usize * 4;
        let src = [self.rgb[0], self.rgb[1], self.rgb[2], 255];

        for (y, row) in pixels.chunks_exact_mut(row_len).enumerate() {
            if (y as u32) % spacing >= thickness {
                continue;
            }
            for px in row.chunks_exact_mut(4) {
                let out = over([px[0], px[1], px[2], px[3]], src, self.alpha);
                px.copy_from_slice(&out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlay.rs"]
mod tests;
