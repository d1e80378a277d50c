//! Core types and utilities shared by every pipeline stage

pub mod types;
pub mod error;
pub mod logging;
pub mod time;
pub mod camera;

pub use types::*;
pub use error::Error;
pub use camera::Camera;
pub use time::{Cadence, FrameClock};
