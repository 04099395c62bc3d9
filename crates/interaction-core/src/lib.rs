//! AirMenu Interaction Core
//!
//! Turns noisy fingertip input into reliable UI events:
//! - **Animation:** Time-driven tweens with easing and completion callbacks
//! - **Smoothing / Gesture:** EMA cursor with deadband, pinch edges, cooldown
//! - **Dwell:** Hover state and dwell-to-select timers for widgets
//! - **Navigation:** Screen state machine with back-history and transitions
//!
//! This crate is pure computation driven by explicit timestamps: no I/O, no
//! clocks, no threads. All inputs are data; all outputs are data.

pub mod animation;
pub mod dwell;
pub mod gesture;
pub mod navigation;
pub mod smoothing;

pub use animation::{AnimationEngine, AnimationId, Easing, Tween};
pub use dwell::{DwellTarget, DwellTimer, HoverState, WidgetState};
pub use gesture::{GestureProcessor, GestureSample};
pub use navigation::{ScreenData, ScreenId, ScreenStateMachine, TransitionPayload};
pub use smoothing::{CursorSmoother, SmoothingAlgorithm};
