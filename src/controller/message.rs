//! Decoded controller messages.

use midly::{MidiMessage, live::LiveEvent};
use serde::{Deserialize, Serialize};

/// Kind of channel message, named after the wire-level status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Channel pressure (status 0xD0): one continuous value for the whole channel
    Aftertouch,
    /// Polyphonic key pressure (status 0xA0)
    PolyAftertouch,
    ControlChange,
    NoteOn,
    NoteOff,
    ProgramChange,
    PitchBend,
}

/// A controller message as delivered to the width controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerMessage {
    pub kind: MessageKind,
    /// Zero-based MIDI channel (0-15)
    pub channel: u8,
    /// Data value (0-127); for pitch bend, the most significant 7 bits
    pub value: u8,
}

impl ControllerMessage {
    pub fn new(kind: MessageKind, channel: u8, value: u8) -> Self {
        Self {
            kind,
            channel,
            value,
        }
    }

    /// Decodes one raw MIDI message.
    ///
    /// System, realtime and malformed messages yield `None`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let event = match LiveEvent::parse(bytes) {
            Ok(event) => event,
            Err(err) => {
                log::debug!("Ignoring undecodable MIDI bytes {bytes:02x?}: {err}");
                return None;
            }
        };
        let LiveEvent::Midi { channel, message } = event else {
            return None;
        };

        let (kind, value) = match message {
            MidiMessage::ChannelAftertouch { vel } => (MessageKind::Aftertouch, vel.as_int()),
            MidiMessage::Aftertouch { vel, .. } => (MessageKind::PolyAftertouch, vel.as_int()),
            MidiMessage::Controller { value, .. } => (MessageKind::ControlChange, value.as_int()),
            MidiMessage::NoteOn { vel, .. } => (MessageKind::NoteOn, vel.as_int()),
            MidiMessage::NoteOff { vel, .. } => (MessageKind::NoteOff, vel.as_int()),
            MidiMessage::ProgramChange { program } => {
                (MessageKind::ProgramChange, program.as_int())
            }
            MidiMessage::PitchBend { bend } => {
                (MessageKind::PitchBend, (bend.0.as_int() >> 7) as u8)
            }
        };

        Some(Self::new(kind, channel.as_int(), value))
    }
}
