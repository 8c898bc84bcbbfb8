//! MIDI controller input: decoding, width mapping and thread hand-off.
//!
//! Controller messages arrive on a backend-owned thread. They are decoded
//! there, queued through a bounded channel, and applied to the tool state by
//! the thread that owns the drawing session.

pub mod device;
pub mod message;
pub mod queue;
pub mod width;

pub use device::{ControllerConnection, DeviceError, connect, list_input_ports};
pub use message::{ControllerMessage, MessageKind};
pub use queue::{ControllerInbox, ControllerSender, DEFAULT_QUEUE_CAPACITY, controller_channel};
pub use width::{
    DEFAULT_CHANNEL, DEFAULT_WIDTH, MAX_WIDTH, MIN_WIDTH, WidthController, clamp_width,
    width_for_value,
};
