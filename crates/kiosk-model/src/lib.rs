//! AirMenu Kiosk Model
//!
//! Defines the data contracts shared by the interaction core and the screens:
//! - **Geometry:** Pixel-space points and widget hit rectangles
//! - **Hand:** Normalized hand landmarks as delivered by the hand-pose provider
//! - **Menu / Cart / Billing:** The ordering collaborators the screens read from
//!
//! Hand landmark coordinates are normalized to `[0.0, 1.0]` relative to the
//! camera frame; everything on screen is in pixels.

pub mod billing;
pub mod cart;
pub mod geometry;
pub mod hand;
pub mod menu;

pub use billing::*;
pub use cart::*;
pub use geometry::*;
pub use hand::*;
pub use menu::*;
