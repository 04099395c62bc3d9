//! Palette and layout constants shared by all screens.

use crate::surface::Color;

pub const PRIMARY: Color = Color::bgr(255, 140, 50);
pub const SECONDARY: Color = Color::bgr(100, 200, 255);
pub const ACCENT: Color = Color::bgr(180, 100, 255);
pub const SUCCESS: Color = Color::bgr(100, 255, 100);
pub const WARNING: Color = Color::bgr(80, 180, 255);
pub const ERROR: Color = Color::bgr(80, 80, 255);
pub const TEXT: Color = Color::rgb(255, 255, 255);
pub const TEXT_DIM: Color = Color::rgb(180, 180, 180);
pub const BACKGROUND: Color = Color::bgr(20, 20, 30);

/// Translucency of glass panels.
pub const GLASS_ALPHA: f64 = 0.15;

pub const BUTTON_HEIGHT: f64 = 60.0;
pub const BUTTON_RADIUS: f64 = 12.0;
pub const CARD_PADDING: f64 = 25.0;
pub const CARD_RADIUS: f64 = 15.0;
pub const ITEM_HEIGHT: f64 = 120.0;
pub const HEADER_Y: f64 = 80.0;

/// Frame rate below which the FPS readout turns to the warning color.
pub const FPS_WARN_BELOW: f64 = 25.0;

/// Cursor disc radius.
pub const CURSOR_RADIUS: f64 = 15.0;
