use super::*;

#[test]
fn gallery_json_keeps_only_finished_images() {
    let json = r#"
{
  "1950s": { "status": "done", "url": "data:image/png;base64,AAAA" },
  "1960s": { "status": "pending" },
  "1970s": { "status": "error", "error": "model refused", "url": "stale.png" },
  "1980s": null,
  "1990s": { "url": "shots/1990s.png" },
  "2000s": { "status": "done", "url": "   " }
}
"#;
    let input = TimelineInput::from_json_str(json, Path::new("/gallery")).unwrap();
    assert_eq!(input.len(), 6);

    let usable: Vec<&str> = input
        .iter()
        .filter_map(|(era, r)| r.map(|_| era))
        .collect();
    assert_eq!(usable, vec!["1950s", "1990s"]);

    let (_, r) = input.iter().find(|(era, _)| *era == "1990s").unwrap();
    match r {
        Some(ImageRef::Path(p)) => assert_eq!(p, Path::new("/gallery/shots/1990s.png")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = TimelineInput::from_json_str("[1, 2]", Path::new(".")).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn builder_inserts_and_replaces() {
    let mut input = TimelineInput::new();
    assert!(input.is_empty());
    input.insert("1950s", None);
    input.insert("1950s", Some(ImageRef::Remote("https://x/y.png".into())));
    assert_eq!(input.len(), 1);
    assert!(input.iter().all(|(_, r)| r.is_some()));
}
