use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let raster = decode_image(&png_bytes(3, 2, [100, 50, 200, 128])).unwrap();
    assert_eq!(raster.width(), 3);
    assert_eq!(raster.height(), 2);
    assert_eq!(
        &raster.premul_bytes()[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn parse_classifies_references() {
    let root = Path::new("/tmp/reels");
    assert!(matches!(
        ImageRef::parse("data:image/png;base64,AAAA", root),
        ImageRef::DataUrl(_)
    ));
    assert!(matches!(
        ImageRef::parse("https://example.com/a.png", root),
        ImageRef::Remote(_)
    ));
    match ImageRef::parse("shots/1950s.png", root) {
        ImageRef::Path(p) => assert_eq!(p, root.join("shots/1950s.png")),
        other => panic!("unexpected {other:?}"),
    }
    match ImageRef::parse("file:///var/a.png", root) {
        ImageRef::Path(p) => assert_eq!(p, PathBuf::from("/var/a.png")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn data_url_round_trips_through_resolve() {
    let payload = base64::engine::general_purpose::STANDARD.encode(png_bytes(4, 4, [0, 255, 0, 255]));
    let url = format!("data:image/png;base64,{payload}");
    let raster = resolve_image("1960s", &ImageRef::DataUrl(url)).unwrap();
    assert_eq!((raster.width(), raster.height()), (4, 4));
    assert_eq!(&raster.premul_bytes()[..4], &[0, 255, 0, 255]);
}

#[test]
fn resolve_failures_are_tagged_with_era() {
    let cases = [
        ImageRef::DataUrl("data:text/plain;base64,AAAA".to_string()),
        ImageRef::DataUrl("data:image/png;base64,!!!".to_string()),
        ImageRef::Remote("https://example.com/a.png".to_string()),
        ImageRef::Path(PathBuf::from("/definitely/not/here.png")),
        ImageRef::Bytes(Arc::from(&b"not an image"[..])),
    ];
    for case in &cases {
        match resolve_image("1970s", case) {
            Err(ReelError::ImageDecode { era, .. }) => assert_eq!(era, "1970s"),
            other => panic!("expected ImageDecode for {case:?}, got {other:?}"),
        }
    }
}

#[test]
fn resolve_all_preserves_order_and_fails_whole_set() {
    let a = ImageRef::Bytes(Arc::from(png_bytes(2, 2, [1, 2, 3, 255])));
    let b = ImageRef::Bytes(Arc::from(png_bytes(5, 1, [4, 5, 6, 255])));
    let out = resolve_all(&[("1950s", &a), ("1960s", &b)]).unwrap();
    assert_eq!(out[0].width(), 2);
    assert_eq!(out[1].width(), 5);

    let bad = ImageRef::Path(PathBuf::from("/missing.png"));
    let err = resolve_all(&[("1950s", &a), ("1960s", &bad)]).unwrap_err();
    assert!(matches!(err, ReelError::ImageDecode { ref era, .. } if era == "1960s"));
}
