use super::*;
use crate::config::CaptionConfig;

fn config(width: u32, height: u32) -> RenderConfig {
    RenderConfig {
        width,
        height,
        caption: CaptionConfig {
            enabled: false,
            ..CaptionConfig::default()
        },
        ..RenderConfig::default()
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> DecodedRaster {
    DecodedRaster::from_straight_rgba8(w, h, &rgba.repeat((w * h) as usize)).unwrap()
}

fn era(tag: &str) -> EraTag {
    EraTag::parse(tag).unwrap()
}

fn close(a: [u8; 4], b: [u8; 4], tol: i32) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (i32::from(*x) - i32::from(*y)).abs() <= tol)
}

#[test]
fn unusable_canvas_sizes_are_context_errors() {
    assert!(matches!(
        FrameRenderer::new(&config(0, 10)),
        Err(ReelError::RenderContextUnavailable(_))
    ));
    assert!(matches!(
        FrameRenderer::new(&config(70_000, 10)),
        Err(ReelError::RenderContextUnavailable(_))
    ));
}

#[test]
fn fresh_renderer_shows_background() {
    let r = FrameRenderer::new(&config(8, 8)).unwrap();
    assert!(!r.has_captions());
    assert_eq!(r.surface().pixel(3, 3), Some([0, 0, 0, 255]));
}

#[test]
fn opaque_layer_covers_the_canvas() {
    let mut r = FrameRenderer::new(&config(12, 16)).unwrap();
    r.draw_frame(&solid(4, 4, [200, 40, 10, 255]), &era("1950s"), 0.5, 1.0)
        .unwrap();
    for (x, y) in [(0, 0), (6, 8), (11, 15)] {
        let px = r.surface().pixel(x, y).unwrap();
        assert!(close(px, [200, 40, 10, 255], 2), "({x},{y}) = {px:?}");
    }
}

#[test]
fn crossfade_layer_blends_at_its_opacity() {
    let mut r = FrameRenderer::new(&config(12, 16)).unwrap();
    r.clear();
    r.draw_frame(&solid(3, 4, [255, 0, 0, 255]), &era("1950s"), 0.87, 1.0)
        .unwrap();
    r.draw_frame(&solid(3, 4, [0, 0, 255, 255]), &era("1980s"), 0.0, 0.2)
        .unwrap();
    let px = r.surface().pixel(6, 8).unwrap();
    assert!(close(px, [204, 0, 51, 255], 3), "{px:?}");
}

#[test]
fn clear_restores_background() {
    let mut r = FrameRenderer::new(&config(4, 4)).unwrap();
    r.draw_frame(&solid(1, 1, [255, 255, 255, 255]), &era("1990s"), 0.0, 1.0)
        .unwrap();
    r.clear();
    assert!(r.surface().data.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn zero_opacity_draw_is_a_no_op() {
    let mut r = FrameRenderer::new(&config(4, 4)).unwrap();
    r.draw_frame(&solid(1, 1, [255, 255, 255, 255]), &era("1990s"), 0.0, 0.0)
        .unwrap();
    assert!(r.surface().data.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn scanline_era_brightens_every_fourth_row() {
    let mut r = FrameRenderer::new(&config(8, 8)).unwrap();
    r.draw_frame(&solid(2, 2, [0, 0, 0, 255]), &era("2050s"), 0.0, 1.0)
        .unwrap();
    let line = r.surface().pixel(4, 4).unwrap();
    let gap = r.surface().pixel(4, 5).unwrap();
    assert!(line[0] >= 24, "{line:?}");
    assert!(gap[0] <= 1, "{gap:?}");
}
