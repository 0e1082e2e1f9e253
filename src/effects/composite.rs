use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{mul_div255_u16 as mul_div255, unit_to_u8};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - sa;

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite a whole premultiplied buffer over another of the same size.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> ReelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    if opacity <= 0.0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Fill a premultiplied buffer with one color.
pub fn fill(dst: &mut [u8], color: PremulRgba8) {
    for px in dst.chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
}

/// Composite a flat straight-alpha color over `dst` using the non-separable "color" blend mode.
///
/// The result keeps the backdrop's luminosity and takes hue and saturation from `rgb`, then
/// mixes by `alpha` like a canvas `globalCompositeOperation = "color"` fill.
pub fn blend_color_in_place(dst: &mut [u8], rgb: [u8; 3], alpha: f32) {
    let sa = alpha.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let cs = rgb.map(|c| f32::from(c) / 255.0);

    for px in dst.chunks_exact_mut(4) {
        let ba = f32::from(px[3]) / 255.0;
        let mut out = [0.0f32; 3];
        if ba > 0.0 {
            let cb = [
                f32::from(px[0]) / 255.0 / ba,
                f32::from(px[1]) / 255.0 / ba,
                f32::from(px[2]) / 255.0 / ba,
            ];
            let mixed = set_lum(cs, lum(cb));
            for i in 0..3 {
                out[i] = sa * ba * mixed[i] + sa * (1.0 - ba) * cs[i] + (1.0 - sa) * ba * cb[i];
            }
        } else {
            for i in 0..3 {
                out[i] = sa * cs[i];
            }
        }
        let oa = sa + ba * (1.0 - sa);
        for i in 0..3 {
            px[i] = unit_to_u8(out[i].min(oa));
        }
        px[3] = unit_to_u8(oa);
    }
}

fn lum(c: [f32; 3]) -> f32 {
    0.3 * c[0] + 0.59 * c[1] + 0.11 * c[2]
}

fn set_lum(c: [f32; 3], l: f32) -> [f32; 3] {
    let d = l - lum(c);
    clip_color([c[0] + d, c[1] + d, c[2] + d])
}

fn clip_color(c: [f32; 3]) -> [f32; 3] {
    let l = lum(c);
    let n = c[0].min(c[1]).min(c[2]);
    let x = c[0].max(c[1]).max(c[2]);
    let mut out = c;
    if n < 0.0 && l - n > f32::EPSILON {
        out = out.map(|v| l + (v - l) * l / (l - n));
    }
    if x > 1.0 && x - l > f32::EPSILON {
        out = out.map(|v| l + (v - l) * (1.0 - l) / (x - l));
    }
    out.map(|v| v.clamp(0.0, 1.0))
}

fn add_sat_u8(a: u16, b: u16) -> u8 {
    (a + b).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
