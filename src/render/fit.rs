use crate::foundation::core::{Canvas, Rect};

/// Destination rectangle for a cover-fit, Ken-Burns-scaled image.
///
/// When the canvas is relatively wider than the image, width drives the fit; otherwise height
/// does. The result is then scaled by `1 + zoom * ken_burns` about the canvas center, so any
/// overflow is cropped equally on both sides.
pub fn cover_rect(canvas: Canvas, img_w: u32, img_h: u32, zoom: f64, ken_burns: f64) -> Rect {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let iw = f64::from(img_w.max(1));
    let ih = f64::from(img_h.max(1));
    let img_aspect = iw / ih;

    let (w, h) = if canvas.aspect() > img_aspect {
        (cw, cw / img_aspect)
    } else {
        (ch * img_aspect, ch)
    };
    let scale = 1.0 + zoom.clamp(0.0, 1.0) * ken_burns;
    let (w, h) = (w * scale, h * scale);
    let x = (cw - w) / 2.0;
    let y = (ch - h) / 2.0;
    Rect::new(x, y, x + w, y + h)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
