//! AirMenu Screen Engine
//!
//! Everything between the interaction core and a display:
//! - **Surface:** Drawing primitives and the recording [`DrawList`]
//! - **Widgets / Screens:** Buttons, cards and hotspots composed into the
//!   five kiosk screens
//! - **Provider:** Hand-pose sources and the producer task that feeds the loop
//! - **Kiosk:** The per-frame interaction loop
//!
//! The loop is single-threaded. Frames from a live provider reach it through
//! a bounded channel; no state is shared between the two sides.

pub mod kiosk;
pub mod provider;
pub mod screens;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use kiosk::{FrameInput, FrameReport, InputSource, Kiosk, KioskCommand, ReplaySummary};
pub use provider::{spawn_provider, HandPoseProvider, ProviderHandle, ScriptedHandProvider};
pub use screens::{KioskContext, Screen, ScreenBehavior, ScreenMetrics};
pub use surface::{DrawCommand, DrawList, Surface};
