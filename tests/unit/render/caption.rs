use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 8,
        height: 6,
    }
}

#[test]
fn disabled_captions_resolve_to_none() {
    let cfg = CaptionConfig {
        enabled: false,
        ..CaptionConfig::default()
    };
    assert!(CaptionPainter::from_config(canvas(), &cfg).unwrap().is_none());
}

#[test]
fn unreadable_configured_font_is_context_unavailable() {
    let cfg = CaptionConfig {
        font_path: Some("/no/such/font.ttf".into()),
        ..CaptionConfig::default()
    };
    assert!(matches!(
        CaptionPainter::from_config(canvas(), &cfg),
        Err(ReelError::RenderContextUnavailable(_))
    ));
}

#[test]
fn tint_premultiplies_by_coverage() {
    let px = tint(&[255, 0, 128], [255, 255, 255, 230]);
    assert_eq!(&px[0..4], &[230, 230, 230, 230]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(px[11], 115);
}

#[test]
fn padding_covers_widest_blur() {
    assert_eq!(style_padding(&CaptionStyle::default()), 23);
    assert_eq!(style_padding(&CaptionStyle::neon([255, 0, 255])), 30);
}

#[test]
fn glow_spreads_beyond_the_glyph_and_keeps_a_white_core() {
    let (w, h) = (21u32, 21u32);
    let mut mask = vec![0u8; (w * h) as usize];
    for y in 7..14 {
        for x in 7..14 {
            mask[(y * w + x) as usize] = 255;
        }
    }

    let out = paint_style(&mask, w, h, &CaptionStyle::neon([0, 255, 255])).unwrap();
    let center = ((10 * w + 10) * 4) as usize;
    assert_eq!(&out[center..center + 4], &[255, 255, 255, 255]);
    let outside = ((10 * w + 14) * 4) as usize;
    assert!(out[outside + 3] > 0, "halo should reach past the glyph");
    assert_eq!(out[outside], 0, "halo is cyan, so red stays empty");
}

#[test]
fn shadow_style_fill_is_translucent_white() {
    let out = paint_style(&[255], 1, 1, &CaptionStyle::default()).unwrap();
    // Fill alpha 230 over a blurred dark shadow.
    assert!(out[3] >= 230);
    assert!(out[0] >= 200 && out[0] <= 230);
}

#[test]
fn sprite_composites_into_its_rows_only() {
    let c = canvas();
    let sprite = CaptionSprite {
        top: 2,
        height: 1,
        pixels: [255u8, 0, 0, 255].repeat(c.width as usize),
    };
    let mut layer = [0u8, 0, 0, 255].repeat((c.width * c.height) as usize);
    sprite.composite_onto(&mut layer, c).unwrap();

    let row = (c.width * 4) as usize;
    assert!(layer[..2 * row].chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    assert!(layer[2 * row..3 * row].chunks_exact(4).all(|p| p == [255, 0, 0, 255]));
    assert!(layer[3 * row..].chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}
