//! AirMenu Common Utilities
//!
//! Shared infrastructure for all AirMenu crates:
//! - Error types and result aliases
//! - Frame clock, frame pacing, and FPS measurement
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
