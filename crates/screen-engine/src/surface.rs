//! Drawing surface abstraction.
//!
//! Screens never touch pixels. They describe each frame through the
//! [`Surface`] primitives; a presenter (window, video encoder, or the
//! recording [`DrawList`]) decides what those primitives look like.

use airmenu_kiosk_model::geometry::{Point2D, Rect};
use airmenu_kiosk_model::menu::CategoryIcon;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from blue-green-red channel order.
    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { r, g, b }
    }
}

/// Relative text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSize {
    Tiny,
    Small,
    Medium,
    Large,
    Title,
}

impl TextSize {
    /// Font scale relative to the base font.
    pub fn scale(self) -> f64 {
        match self {
            TextSize::Tiny => 0.5,
            TextSize::Small => 0.7,
            TextSize::Medium => 0.9,
            TextSize::Large => 1.2,
            TextSize::Title => 2.5,
        }
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: TextSize,
    pub align: Align,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(color: Color, size: TextSize) -> Self {
        Self {
            color,
            size,
            align: Align::Left,
            bold: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Glyphs the presenter knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    BackArrow,
    Cart,
    Plus,
    Minus,
    Checkmark,
    Category(CategoryIcon),
}

/// Drawing primitives a screen may use.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Filled rounded rectangle blended at `alpha`.
    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64, radius: f64);

    /// Rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f64, radius: f64);

    /// Blurred translucent panel tinted with `tint`.
    fn glass_panel(&mut self, rect: Rect, tint: Color, alpha: f64);

    /// A run of text. `at` is the baseline anchor.
    fn text(&mut self, text: &str, at: Point2D, style: TextStyle);

    /// A circle; `thickness` of `None` fills it.
    fn circle(&mut self, center: Point2D, radius: f64, color: Color, thickness: Option<f64>);

    fn icon(&mut self, icon: Icon, rect: Rect, color: Color);

    /// Left-to-right fill of `rect` proportional to `progress` in [0, 1].
    fn progress_bar(&mut self, rect: Rect, progress: f64, color: Color);
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
        alpha: f64,
        radius: f64,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        thickness: f64,
        radius: f64,
    },
    GlassPanel {
        rect: Rect,
        tint: Color,
        alpha: f64,
    },
    Text {
        text: String,
        at: Point2D,
        style: TextStyle,
    },
    Circle {
        center: Point2D,
        radius: f64,
        color: Color,
        thickness: Option<f64>,
    },
    Icon {
        icon: Icon,
        rect: Rect,
        color: Color,
    },
    ProgressBar {
        rect: Rect,
        progress: f64,
        color: Color,
    },
}

/// A surface that records commands instead of drawing them.
///
/// Used for headless runs and for asserting on what a screen drew.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text runs in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn progress_bars(&self) -> impl Iterator<Item = f64> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::ProgressBar { progress, .. } => Some(*progress),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color, alpha: f64, radius: f64) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            alpha,
            radius,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f64, radius: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            thickness,
            radius,
        });
    }

    fn glass_panel(&mut self, rect: Rect, tint: Color, alpha: f64) {
        self.commands
            .push(DrawCommand::GlassPanel { rect, tint, alpha });
    }

    fn text(&mut self, text: &str, at: Point2D, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style,
        });
    }

    fn circle(&mut self, center: Point2D, radius: f64, color: Color, thickness: Option<f64>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            thickness,
        });
    }

    fn icon(&mut self, icon: Icon, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Icon { icon, rect, color });
    }

    fn progress_bar(&mut self, rect: Rect, progress: f64, color: Color) {
        self.commands.push(DrawCommand::ProgressBar {
            rect,
            progress: progress.clamp(0.0, 1.0),
            color,
        });
    }
}
