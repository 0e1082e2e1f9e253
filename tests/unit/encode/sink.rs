use super::*;
use crate::foundation::core::Canvas;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
        background: [0, 0, 0, 255],
    }
}

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA::filled(
        Canvas {
            width: 2,
            height: 2,
        },
        [v, v, v, 255],
    )
}

#[test]
fn records_one_digest_chunk_per_frame() {
    let mut sink = InMemorySink::new();
    sink.start(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(2), &frame(2)).unwrap();

    let chunks = sink.stop().unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], chunks[1]);
    assert_ne!(chunks[1], chunks[2]);
    assert_eq!(chunks[0], frame_digest(&frame(1)).to_le_bytes().to_vec());
    assert!(sink.was_stopped());
    assert_eq!(sink.mime_type(), DIGEST_MIME_TYPE);
}

#[test]
fn rejects_out_of_order_and_unstarted_pushes() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(0)).is_err());
    sink.start(cfg()).unwrap();
    sink.push_frame(FrameIndex(3), &frame(0)).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &frame(0)).is_err());
}

#[test]
fn silent_sink_stops_with_no_chunks() {
    let mut sink = InMemorySink::silent();
    sink.start(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(0)).unwrap();
    assert!(sink.stop().unwrap().is_empty());
}

#[test]
fn failing_sink_errors_at_configured_frame() {
    let mut sink = InMemorySink::failing_at(1);
    sink.start(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(0)).unwrap();
    assert!(matches!(
        sink.push_frame(FrameIndex(1), &frame(0)),
        Err(ReelError::RenderPipeline(_))
    ));
}

#[test]
fn abort_prevents_stop() {
    let mut sink = InMemorySink::new();
    sink.start(cfg()).unwrap();
    sink.abort();
    assert!(sink.was_aborted());
    assert!(sink.stop().is_err());
}
