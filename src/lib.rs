//! Library exports for midisketch.
//!
//! The drawing session, stroke smoothing, MIDI width control and PNG export
//! live here so that the binaries and integration tests share one
//! implementation.

pub mod config;
pub mod controller;
pub mod draw;
pub mod export;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
