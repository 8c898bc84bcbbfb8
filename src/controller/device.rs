//! MIDI input ports via `midir`.
//!
//! Only two things are needed from the device layer: the names of the input
//! ports, and a connection that pushes decoded messages into a
//! [`ControllerSender`]. Reconnecting and hot-plug are left to the caller.

use super::message::ControllerMessage;
use super::queue::ControllerSender;
use midir::{Ignore, MidiInput, MidiInputConnection};
use thiserror::Error;

const CLIENT_NAME: &str = "midisketch";
const PORT_NAME: &str = "midisketch-width";

/// Errors raised while talking to the MIDI backend.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("MIDI backend unavailable: {0}")]
    Backend(String),

    #[error("No MIDI input found")]
    NoInput,

    #[error("MIDI input port '{0}' not found")]
    PortNotFound(String),

    #[error("Failed to open MIDI input '{port}': {reason}")]
    Connect { port: String, reason: String },
}

fn open_client() -> Result<MidiInput, DeviceError> {
    let mut input =
        MidiInput::new(CLIENT_NAME).map_err(|err| DeviceError::Backend(err.to_string()))?;
    // Pressure is a channel message; sysex, timing and active sensing are noise here.
    input.ignore(Ignore::All);
    Ok(input)
}

/// Returns the human-readable names of all currently available input ports.
pub fn list_input_ports() -> Result<Vec<String>, DeviceError> {
    let input = open_client()?;
    Ok(input
        .ports()
        .iter()
        .filter_map(|port| input.port_name(port).ok())
        .collect())
}

/// An open input port. Messages stop flowing when this is dropped.
pub struct ControllerConnection {
    port_name: String,
    _connection: MidiInputConnection<()>,
}

impl ControllerConnection {
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

/// Opens the port called `device_name`, or the first port when `None`.
///
/// Every decodable message is offered to `sender`; undecodable ones are
/// dropped inside the callback.
pub fn connect(
    device_name: Option<&str>,
    sender: ControllerSender,
) -> Result<ControllerConnection, DeviceError> {
    let input = open_client()?;
    let ports = input.ports();

    let port = match device_name {
        Some(wanted) => ports
            .iter()
            .find(|port| input.port_name(port).is_ok_and(|name| name == wanted))
            .ok_or_else(|| DeviceError::PortNotFound(wanted.to_string()))?,
        None => ports.first().ok_or(DeviceError::NoInput)?,
    };
    let port_name = input
        .port_name(port)
        .map_err(|err| DeviceError::Backend(err.to_string()))?;

    log::info!("Opening MIDI input '{port_name}'");
    let connection = input
        .connect(
            port,
            PORT_NAME,
            move |_timestamp, bytes, _| {
                if let Some(message) = ControllerMessage::decode(bytes)
                    && !sender.offer(message)
                {
                    log::trace!("Controller queue full; dropped {message:?}");
                }
            },
            (),
        )
        .map_err(|err| DeviceError::Connect {
            port: port_name.clone(),
            reason: err.to_string(),
        })?;

    Ok(ControllerConnection {
        port_name,
        _connection: connection,
    })
}
