//! Drawing state machine and tool state.

use crate::controller::{
    ControllerInbox, ControllerMessage, DEFAULT_CHANNEL, DEFAULT_WIDTH, WidthController,
    clamp_width,
};
use crate::draw::{BLACK, CanvasRegion, CanvasSurface, Color, Point, StrokeSegment};
use crate::export::CanvasExporter;

/// Whether the pen is currently on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingState {
    /// Pen up, waiting for a press
    Idle,
    /// Pen down; every move emits a segment
    Drawing,
}

/// The live drawing parameters shared by every handler of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// Color applied to the next emitted segment
    pub color: Color,
    /// Line width in pixels, always within [1, 30]
    pub width: f64,
    /// Set between pointer down and pointer up
    pub pen_down: bool,
    /// Where the previous segment ended (or where the pen went down)
    pub last_point: Option<Point>,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            color: BLACK,
            width: DEFAULT_WIDTH,
            pen_down: false,
            last_point: None,
        }
    }
}

/// Startup parameters for a [`DrawingSession`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub color: Color,
    pub width: f64,
    /// Zero-based channel whose aftertouch drives the width
    pub controller_channel: u8,
    pub region: CanvasRegion,
    /// Whether free-form colors (the chooser dialog) are offered
    pub color_picker: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            color: BLACK,
            width: DEFAULT_WIDTH,
            controller_channel: DEFAULT_CHANNEL,
            region: CanvasRegion::new(800, 600),
            color_picker: false,
        }
    }
}

/// One drawing session: tool state, emitted segments and the collaborators
/// they are rendered and exported through.
///
/// Pointer and controller input both mutate the session, so it must be owned
/// by a single thread; controller messages from other threads go through a
/// [`ControllerInbox`] and [`DrawingSession::pump_controller`].
pub struct DrawingSession {
    pub(super) tool: ToolState,
    /// Emitted segments in draw order (first = bottom layer)
    pub(super) segments: Vec<StrokeSegment>,
    pub(super) width_controller: WidthController,
    pub(super) surface: Box<dyn CanvasSurface>,
    pub(super) exporter: Box<dyn CanvasExporter>,
    pub(super) region: CanvasRegion,
    pub(super) color_picker: bool,
}

impl DrawingSession {
    /// Creates an idle session with an empty canvas.
    pub fn with_defaults(
        surface: Box<dyn CanvasSurface>,
        exporter: Box<dyn CanvasExporter>,
        settings: SessionSettings,
    ) -> Self {
        let width = clamp_width(settings.width);
        if width != settings.width {
            log::warn!(
                "Initial width {:.1} outside 1-30, using {:.1}",
                settings.width,
                width
            );
        }

        Self {
            tool: ToolState {
                color: settings.color,
                width,
                ..ToolState::default()
            },
            segments: Vec::new(),
            width_controller: WidthController::new(settings.controller_channel),
            surface,
            exporter,
            region: settings.region,
            color_picker: settings.color_picker,
        }
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn state(&self) -> DrawingState {
        if self.tool.pen_down {
            DrawingState::Drawing
        } else {
            DrawingState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.state() == DrawingState::Drawing
    }

    /// Segments emitted since the last clear, in draw order.
    pub fn segments(&self) -> &[StrokeSegment] {
        &self.segments
    }

    pub fn region(&self) -> CanvasRegion {
        self.region
    }

    pub fn width_controller(&self) -> &WidthController {
        &self.width_controller
    }

    /// Applies one controller message to the tool width.
    ///
    /// Messages of the wrong kind or channel are ignored.
    pub fn handle_controller(&mut self, message: &ControllerMessage) -> bool {
        let accepted = self.width_controller.apply(message, &mut self.tool);
        if accepted {
            log::trace!("Width {:.2} from {:?}", self.tool.width, message);
        } else {
            log::trace!("Ignoring controller message {:?}", message);
        }
        accepted
    }

    /// Drains queued controller messages, returning how many changed the width.
    pub fn pump_controller(&mut self, inbox: &mut ControllerInbox) -> usize {
        inbox
            .drain()
            .iter()
            .filter(|message| self.handle_controller(message))
            .count()
    }
}
