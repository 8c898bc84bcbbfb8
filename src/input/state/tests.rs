use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::*;
use crate::controller::{ControllerMessage, MessageKind, controller_channel};
use crate::draw::{BLACK, CanvasRegion, CanvasSurface, Color, GREEN, Point, RED, StrokeSegment};
use crate::export::{CanvasExporter, ExportError, ExportOutcome};
use crate::input::PointerEvent;

#[derive(Debug, Clone, PartialEq)]
enum SurfaceCall {
    Render(StrokeSegment),
    Erase,
}

#[derive(Clone, Default)]
struct MockSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl CanvasSurface for MockSurface {
    fn render_segment(&mut self, segment: &StrokeSegment) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Render(segment.clone()));
    }

    fn erase_all(&mut self) {
        self.calls.lock().unwrap().push(SurfaceCall::Erase);
    }
}

#[derive(Clone, Default)]
struct MockExporter {
    fail_with: Option<String>,
    exports: Arc<Mutex<Vec<(PathBuf, CanvasRegion, usize)>>>,
}

impl CanvasExporter for MockExporter {
    fn capture_and_save(
        &mut self,
        target: &Path,
        region: CanvasRegion,
        segments: &[StrokeSegment],
    ) -> Result<PathBuf, ExportError> {
        if let Some(reason) = &self.fail_with {
            return Err(ExportError::InvalidPath(reason.clone()));
        }
        self.exports
            .lock()
            .unwrap()
            .push((target.to_path_buf(), region, segments.len()));
        Ok(target.to_path_buf())
    }
}

fn create_test_session() -> (DrawingSession, MockSurface, MockExporter) {
    create_session_with(SessionSettings::default(), MockExporter::default())
}

fn create_session_with(
    settings: SessionSettings,
    exporter: MockExporter,
) -> (DrawingSession, MockSurface, MockExporter) {
    let surface = MockSurface::default();
    let session = DrawingSession::with_defaults(
        Box::new(surface.clone()),
        Box::new(exporter.clone()),
        settings,
    );
    (session, surface, exporter)
}

fn pressure(value: u8) -> ControllerMessage {
    ControllerMessage::new(MessageKind::Aftertouch, 4, value)
}

fn render_calls(surface: &MockSurface) -> usize {
    surface
        .calls
        .lock()
        .unwrap()
        .iter()
        .filter(|call| matches!(call, SurfaceCall::Render(_)))
        .count()
}

#[test]
fn test_new_session_is_idle_with_defaults() {
    let (session, _, _) = create_test_session();
    assert_eq!(session.state(), DrawingState::Idle);
    assert_eq!(session.tool().color, BLACK);
    assert_eq!(session.tool().width, 5.0);
    assert!(session.tool().last_point.is_none());
    assert!(session.segments().is_empty());
}

#[test]
fn test_initial_width_is_clamped() {
    let settings = SessionSettings {
        width: 45.0,
        ..SessionSettings::default()
    };
    let (session, _, _) = create_session_with(settings, MockExporter::default());
    assert_eq!(session.tool().width, 30.0);
}

#[test]
fn test_down_move_move_up_emits_two_segments_in_order() {
    let (mut session, surface, _) = create_test_session();

    session.handle_pointer(PointerEvent::down((0, 0)));
    assert!(session.is_drawing());
    assert!(session.segments().is_empty());

    session.handle_pointer(PointerEvent::moved((10, 10)));
    session.handle_controller(&pressure(127));
    session.handle_pointer(PointerEvent::moved((20, 5)));
    session.handle_pointer(PointerEvent::up((20, 5)));

    assert_eq!(session.state(), DrawingState::Idle);
    let segments = session.segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].start, Point::new(0.0, 0.0));
    assert_eq!(segments[0].end, Point::new(10.0, 10.0));
    assert_eq!(segments[0].width, 5.0);
    assert_eq!(segments[1].start, Point::new(10.0, 10.0));
    assert_eq!(segments[1].end, Point::new(20.0, 5.0));
    assert_eq!(segments[1].width, 30.0);

    let calls = surface.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            SurfaceCall::Render(segments[0].clone()),
            SurfaceCall::Render(segments[1].clone()),
        ]
    );
}

#[test]
fn test_move_while_idle_is_ignored() {
    let (mut session, surface, _) = create_test_session();
    session.pointer_move(Point::new(5.0, 5.0));
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_up(Point::new(0.0, 0.0));
    session.pointer_move(Point::new(8.0, 8.0));

    assert!(session.segments().is_empty());
    assert_eq!(render_calls(&surface), 0);
}

#[test]
fn test_up_does_not_emit_segment() {
    let (mut session, _, _) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_up(Point::new(50.0, 50.0));
    assert!(session.segments().is_empty());
    assert!(!session.tool().pen_down);
}

#[test]
fn test_new_stroke_starts_at_new_down_point() {
    let (mut session, _, _) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_move(Point::new(10.0, 0.0));
    session.pointer_up(Point::new(10.0, 0.0));

    session.pointer_down(Point::new(100.0, 100.0));
    session.pointer_move(Point::new(110.0, 100.0));

    assert_eq!(session.segments()[1].start, Point::new(100.0, 100.0));
}

#[test]
fn test_clear_empties_segments_and_stops_rendering() {
    let (mut session, surface, _) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    for x in 1..=4 {
        session.pointer_move(Point::new(x as f64 * 10.0, 0.0));
    }
    session.pointer_up(Point::new(40.0, 0.0));
    assert_eq!(session.segments().len(), 4);

    session.clear();
    assert!(session.segments().is_empty());
    assert_eq!(
        surface.calls.lock().unwrap().last(),
        Some(&SurfaceCall::Erase)
    );

    let renders_before = render_calls(&surface);
    session.pointer_move(Point::new(99.0, 99.0));
    session.handle_controller(&pressure(64));
    assert_eq!(render_calls(&surface), renders_before);

    session.pointer_down(Point::new(1.0, 1.0));
    session.pointer_move(Point::new(2.0, 2.0));
    assert_eq!(render_calls(&surface), renders_before + 1);
    assert_eq!(session.segments().len(), 1);
}

#[test]
fn test_clear_keeps_pen_state() {
    let (mut session, _, _) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    session.clear();
    assert!(session.is_drawing());

    session.pointer_move(Point::new(3.0, 4.0));
    assert_eq!(session.segments().len(), 1);
}

#[test]
fn test_set_color_applies_to_next_segment_only() {
    let (mut session, _, _) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_move(Point::new(10.0, 0.0));
    session.set_color(RED);
    session.pointer_move(Point::new(20.0, 0.0));

    assert_eq!(session.segments()[0].color, BLACK);
    assert_eq!(session.segments()[1].color, RED);
}

#[test]
fn test_select_swatch_uses_palette_order() {
    let (mut session, _, _) = create_test_session();
    assert!(session.select_swatch(2));
    assert_eq!(session.tool().color, GREEN);
    assert!(!session.select_swatch(7));
    assert_eq!(session.tool().color, GREEN);
}

#[test]
fn test_choose_color_requires_picker() {
    let (mut session, _, _) = create_test_session();
    assert!(!session.choose_color(Some("#336699")));
    assert_eq!(session.tool().color, BLACK);

    let settings = SessionSettings {
        color_picker: true,
        ..SessionSettings::default()
    };
    let (mut session, _, _) = create_session_with(settings, MockExporter::default());
    assert!(session.choose_color(Some("#336699")));
    assert_eq!(session.tool().color, Color::from_rgb8(0x33, 0x66, 0x99));
    assert!(!session.choose_color(None));
    assert!(!session.choose_color(Some("not a color")));
    assert_eq!(session.tool().color, Color::from_rgb8(0x33, 0x66, 0x99));
}

#[test]
fn test_controller_filter_leaves_width_alone() {
    let (mut session, _, _) = create_test_session();
    assert!(!session.handle_controller(&ControllerMessage::new(
        MessageKind::Aftertouch,
        0,
        127
    )));
    assert!(!session.handle_controller(&ControllerMessage::new(
        MessageKind::ControlChange,
        4,
        127
    )));
    assert_eq!(session.tool().width, 5.0);
}

#[test]
fn test_controller_channel_is_configurable() {
    let settings = SessionSettings {
        controller_channel: 0,
        ..SessionSettings::default()
    };
    let (mut session, _, _) = create_session_with(settings, MockExporter::default());
    assert!(session.handle_controller(&ControllerMessage::new(
        MessageKind::Aftertouch,
        0,
        0
    )));
    assert_eq!(session.tool().width, 1.0);
}

#[test]
fn test_pump_controller_applies_latest_value() {
    let (mut session, _, _) = create_test_session();
    let (tx, mut inbox) = controller_channel(8);
    tx.offer(pressure(20));
    tx.offer(ControllerMessage::new(MessageKind::NoteOn, 4, 100));
    tx.offer(pressure(127));

    assert_eq!(session.pump_controller(&mut inbox), 2);
    assert_eq!(session.tool().width, 30.0);
    assert_eq!(session.pump_controller(&mut inbox), 0);
}

#[test]
fn test_export_delegates_with_region_and_segments() {
    let (mut session, _, exporter) = create_test_session();
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_move(Point::new(5.0, 5.0));

    let outcome = session.export(Some(Path::new("/tmp/out.png")));
    assert_eq!(outcome, ExportOutcome::Saved(PathBuf::from("/tmp/out.png")));

    let exports = exporter.exports.lock().unwrap();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].1, CanvasRegion::new(800, 600));
    assert_eq!(exports[0].2, 1);
}

#[test]
fn test_export_without_path_is_cancelled() {
    let (mut session, _, exporter) = create_test_session();
    assert!(matches!(session.export(None), ExportOutcome::Cancelled(_)));
    assert!(matches!(
        session.export(Some(Path::new(""))),
        ExportOutcome::Cancelled(_)
    ));
    assert!(exporter.exports.lock().unwrap().is_empty());
}

#[test]
fn test_failed_export_leaves_session_untouched() {
    let exporter = MockExporter {
        fail_with: Some("read-only".to_string()),
        ..MockExporter::default()
    };
    let (mut session, _, _) = create_session_with(SessionSettings::default(), exporter);
    session.pointer_down(Point::new(0.0, 0.0));
    session.pointer_move(Point::new(5.0, 5.0));
    let tool_before = session.tool().clone();

    let outcome = session.export(Some(Path::new("/readonly/out.png")));
    assert!(matches!(outcome, ExportOutcome::Failed(_)));
    assert_eq!(session.tool(), &tool_before);
    assert_eq!(session.segments().len(), 1);
    assert!(session.is_drawing());
}
