//! Bounded hand-off from the MIDI callback thread to the session thread.
//!
//! The MIDI backend delivers messages on its own thread. Rather than sharing
//! tool state across threads, messages are queued here and applied by the
//! session between pointer events.

use super::message::ControllerMessage;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

/// Default number of messages buffered before new ones are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Creates a connected sender/inbox pair with room for `capacity` messages.
pub fn controller_channel(capacity: usize) -> (ControllerSender, ControllerInbox) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    let dropped = Arc::new(AtomicU64::new(0));
    (
        ControllerSender {
            tx,
            dropped: dropped.clone(),
        },
        ControllerInbox {
            rx,
            dropped,
            disconnected: false,
        },
    )
}

/// Producer side; cheap to clone and safe to move into a MIDI callback.
#[derive(Clone)]
pub struct ControllerSender {
    tx: SyncSender<ControllerMessage>,
    dropped: Arc<AtomicU64>,
}

impl ControllerSender {
    /// Queues a message without blocking.
    ///
    /// Returns `false` if the queue was full or the inbox is gone; the message
    /// is discarded in both cases.
    pub fn offer(&self, message: ControllerMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer side, owned by whoever owns the session.
pub struct ControllerInbox {
    rx: Receiver<ControllerMessage>,
    dropped: Arc<AtomicU64>,
    disconnected: bool,
}

impl ControllerInbox {
    /// Takes every queued message in arrival order without blocking.
    pub fn drain(&mut self) -> Vec<ControllerMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log::debug!("Controller source disconnected");
                    }
                    self.disconnected = true;
                    break;
                }
            }
        }
        messages
    }

    /// True once every sender has been dropped and the queue ran dry.
    pub fn disconnected(&self) -> bool {
        self.disconnected
    }

    /// Messages discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
