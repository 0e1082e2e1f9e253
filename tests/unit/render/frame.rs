use super::*;

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = FrameRGBA::filled(
        Canvas {
            width: 2,
            height: 3,
        },
        [1, 2, 3, 255],
    );
    assert_eq!(f.data.len(), 24);
    assert_eq!(f.pixel(1, 2), Some([1, 2, 3, 255]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 3), None);
}

#[test]
fn straight_conversion_unpremultiplies() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 0, 32, 128, 9, 9, 9, 255],
        premultiplied: true,
    };
    assert_eq!(f.to_straight_rgba8(), vec![128, 0, 64, 128, 9, 9, 9, 255]);
}
