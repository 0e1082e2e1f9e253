use super::*;

#[test]
fn messages_render_exact_text() {
    assert_eq!(
        ProgressMessage::Initializing.to_string(),
        "Initializing video renderer..."
    );
    assert_eq!(ProgressMessage::Loading.to_string(), "Loading images...");
    assert_eq!(
        ProgressMessage::Rendering("1950s".into()).to_string(),
        "Rendering 1950s..."
    );
    assert_eq!(ProgressMessage::Finalizing.to_string(), "Finalizing video...");
}

#[test]
fn closures_are_progress_sinks() {
    let mut seen = Vec::new();
    {
        let mut sink = |m: &str| seen.push(m.to_string());
        sink.report("a").unwrap();
        sink.report("b").unwrap();
    }
    assert_eq!(seen, ["a", "b"]);
    NoProgress.report("ignored").unwrap();
}
