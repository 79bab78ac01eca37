use super::*;
use crate::placement::DropPayload;

const SCRIPT: &str = r#"{
    "viewport": { "width": 1024, "height": 768 },
    "events": [
        { "frame": 3, "type": "toggle_grid" },
        { "frame": 1, "type": "drop", "x": 512, "y": 384,
          "payload": { "kind": "crane", "duration_months": 6 } }
    ]
}"#;

#[test]
fn parses_viewport_and_events() {
    let script = SessionScript::from_json(SCRIPT).unwrap();
    assert_eq!(script.viewport, ViewportSize { width: 1024.0, height: 768.0 });
    assert_eq!(script.events.len(), 2);
    assert_eq!(script.frames_needed(), 4);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let script = SessionScript::from_json("{}").unwrap();
    assert_eq!(script, SessionScript::default());
    assert_eq!(script.viewport, ViewportSize { width: 800.0, height: 600.0 });
    assert_eq!(script.frames_needed(), 1);
}

#[test]
fn queue_opens_with_resize() {
    let mut queue = SessionScript::from_json(SCRIPT).unwrap().into_queue();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.drain_due(0), vec![HostEvent::Resize { width: 1024.0, height: 768.0 }]);
    assert_eq!(
        queue.drain_due(1),
        vec![HostEvent::Drop { x: 512.0, y: 384.0, payload: DropPayload::new("crane", 6) }]
    );
    assert_eq!(queue.drain_due(3), vec![HostEvent::ToggleGrid]);
}

#[test]
fn rejects_bad_input() {
    let err = SessionScript::from_json("{ \"events\": 3 }").unwrap_err();
    assert_eq!(err.error_code(), "E_SESSION_JSON");

    let err = SessionScript::from_json(r#"{ "viewport": { "width": 0, "height": 600 } }"#).unwrap_err();
    assert_eq!(err.error_code(), "E_SESSION_VIEWPORT");
}

#[test]
fn missing_file_is_io_error() {
    let err = SessionScript::load(Path::new("/nonexistent/siteplan/session.json")).unwrap_err();
    assert_eq!(err.error_code(), "E_SESSION_IO");
}

#[test]
fn last_possible_frame_does_not_overflow() {
    let script = SessionScript::from_json(r#"{ "events": [{ "frame": 18446744073709551615, "type": "reset_view" }] }"#).unwrap();
    assert_eq!(script.frames_needed(), u64::MAX);
}
