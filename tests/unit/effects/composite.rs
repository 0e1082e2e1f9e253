use super::*;

#[test]
fn over_with_zero_opacity_keeps_dst() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [200, 100, 50, 255], 1.0), [200, 100, 50, 255]);
}

#[test]
fn over_partial_opacity_mixes() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.2);
    assert_eq!(out[3], 255);
    assert!((50..=52).contains(&out[0]));
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn over_in_place_blends_every_pixel() {
    let mut dst = [0u8, 0, 0, 255].repeat(3);
    let src = [255u8, 0, 0, 255].repeat(3);
    over_in_place(&mut dst, &src, 1.0).unwrap();
    assert!(dst.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
}

#[test]
fn color_blend_keeps_backdrop_luminosity() {
    // Mid-grey backdrop, fully opaque magenta color blend.
    let mut px = vec![128u8, 128, 128, 255];
    blend_color_in_place(&mut px, [255, 0, 255], 1.0);
    let l = 0.3 * f32::from(px[0]) + 0.59 * f32::from(px[1]) + 0.11 * f32::from(px[2]);
    assert!((l - 128.0).abs() <= 2.0, "luminosity drifted to {l}");
    assert!(px[0] > px[1], "hue should move toward magenta");
    assert_eq!(px[3], 255);
}

#[test]
fn color_blend_low_alpha_is_subtle() {
    let mut px = vec![100u8, 100, 100, 255];
    blend_color_in_place(&mut px, [255, 0, 255], 0.2);
    for c in &px[..3] {
        assert!((i32::from(*c) - 100).abs() <= 35);
    }
    assert_eq!(px[3], 255);
}

#[test]
fn fill_sets_all_pixels() {
    let mut buf = vec![1u8; 12];
    fill(&mut buf, [0, 0, 0, 255]);
    assert_eq!(buf, [0u8, 0, 0, 255].repeat(3));
}
