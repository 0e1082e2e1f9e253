use super::*;

const PORTRAIT: Canvas = Canvas {
    width: 720,
    height: 960,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn square_image_on_portrait_canvas_is_height_driven() {
    let r = cover_rect(PORTRAIT, 1024, 1024, 0.0, 0.1);
    assert!(approx(r.height(), 960.0));
    assert!(approx(r.width(), 960.0));
    assert!(approx(r.x0, -120.0));
    assert!(approx(r.y0, 0.0));
}

#[test]
fn tall_image_is_width_driven() {
    let r = cover_rect(PORTRAIT, 500, 1000, 0.0, 0.1);
    assert!(approx(r.width(), 720.0));
    assert!(approx(r.height(), 1440.0));
    assert!(approx(r.y0, -240.0));
}

#[test]
fn full_zoom_scales_by_factor_and_stays_centered() {
    let r = cover_rect(PORTRAIT, 1024, 1024, 1.0, 0.1);
    assert!(approx(r.height(), 1056.0));
    assert!(approx(r.center().x, 360.0));
    assert!(approx(r.center().y, 480.0));
    // Always covers the canvas.
    assert!(r.x0 <= 0.0 && r.y0 <= 0.0 && r.x1 >= 720.0 && r.y1 >= 960.0);
}
