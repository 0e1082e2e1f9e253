use super::*;

#[test]
fn defaults_match_portrait_30fps_layout() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas(), Canvas { width: 720, height: 960 });
    assert_eq!(cfg.fps().unwrap().num, 30);
    let t = cfg.timing().unwrap();
    assert_eq!(t.display, Duration::from_millis(3000));
    assert_eq!(t.transition, Duration::from_millis(500));
    assert_eq!(cfg.background_premul().to_array(), [0, 0, 0, 255]);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = RenderConfig::from_json_str(
        r#"{ "width": 64, "height": 48, "caption": { "enabled": false } }"#,
    )
    .unwrap();
    assert_eq!(cfg.width, 64);
    assert_eq!(cfg.fps, 30);
    assert!(!cfg.caption.enabled);
    assert_eq!(cfg.caption.size_px, 80.0);
    assert!(cfg.style_table().unwrap().overlay_for(2050).is_some());
}

#[test]
fn transition_longer_than_display_is_rejected() {
    let err =
        RenderConfig::from_json_str(r#"{ "display_ms": 100, "transition_ms": 200 }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn zero_fps_and_bad_zoom_are_rejected() {
    assert!(RenderConfig::from_json_str(r#"{ "fps": 0 }"#).is_err());
    assert!(RenderConfig::from_json_str(r#"{ "ken_burns": -1.0 }"#).is_err());
}

#[test]
fn overlapping_style_rules_are_rejected() {
    let json = r#"{ "styles": { "overlays": [
        { "from": 2000, "to": 2010, "overlay": { "kind": "vignette" } },
        { "from": 2010, "to": 2020, "overlay": { "kind": "scanlines" } }
    ] } }"#;
    assert!(matches!(
        RenderConfig::from_json_str(json),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = RenderConfig::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, ReelError::Other(_)));
}
