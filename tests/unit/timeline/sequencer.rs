use super::*;

fn tiny(w: u32) -> DecodedRaster {
    DecodedRaster::from_straight_rgba8(w, 1, &vec![200u8; (w * 4) as usize]).unwrap()
}

#[test]
fn sequence_sorts_by_year_and_drops_missing() {
    let mut input = TimelineInput::new();
    input.insert("2040s", Some(tiny(1).into()));
    input.insert("1950s", Some(tiny(2).into()));
    input.insert("1970s", None);
    input.insert("2010s", Some(tiny(3).into()));

    let refs = sequence_refs(&input).unwrap();
    let years: Vec<u16> = refs.iter().map(|r| r.era.year()).collect();
    assert_eq!(years, vec![1950, 2010, 2040]);
    assert!(years.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn empty_after_filtering_is_empty_input() {
    assert!(matches!(
        sequence_refs(&TimelineInput::new()),
        Err(ReelError::EmptyInput)
    ));

    let mut input = TimelineInput::new();
    input.insert("1950s", None);
    input.insert("1960s", None);
    assert!(matches!(sequence_refs(&input), Err(ReelError::EmptyInput)));
}

#[test]
fn invalid_tag_with_image_is_rejected() {
    let input = TimelineInput::new().with("fifties", tiny(1));
    assert!(matches!(sequence_refs(&input), Err(ReelError::Validation(_))));
}

#[test]
fn build_timeline_keeps_order_and_images() {
    let input = TimelineInput::new()
        .with("1980s", tiny(8))
        .with("1950s", tiny(5));
    let entries = build_timeline(&input).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].era.as_str(), "1950s");
    assert_eq!(entries[0].image.width(), 5);
    assert_eq!(entries[1].era.as_str(), "1980s");
    assert_eq!(entries[1].image.width(), 8);
}
