//! Reusable interactive widgets.
//!
//! Each widget is a plain record that embeds the shared [`HoverState`]
//! (and a [`DwellTimer`](airmenu_interaction_core::DwellTimer) when it can
//! be dwell-selected) and knows how to draw itself.

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::dwell::{DwellTarget, HoverState, WidgetState};
use airmenu_kiosk_model::geometry::{Point2D, Rect};

use crate::surface::{Color, Icon, Surface, TextSize, TextStyle};
use crate::theme;

/// A labelled glass button selectable by dwell or pinch.
#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub color: Color,
    pub target: DwellTarget,
}

impl Button {
    pub fn new(label: impl Into<String>, bounds: Rect, color: Color, dwell_secs: Seconds) -> Self {
        Self {
            label: label.into(),
            color,
            target: DwellTarget::new(bounds, dwell_secs),
        }
    }

    /// Per-frame hover and dwell update. Returns true when the dwell fires.
    pub fn update(&mut self, cursor: Option<Point2D>, now: Seconds, dwell_armed: bool) -> bool {
        self.target.update(cursor, now, dwell_armed)
    }

    pub fn hit(&self, point: Point2D) -> bool {
        self.target.hover.is_inside(point)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.target.hover.set_enabled(enabled);
    }

    pub fn bounds(&self) -> Rect {
        self.target.hover.bounds()
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let hover = &self.target.hover;
        if !hover.is_visible() {
            return;
        }
        let rect = hover.bounds();
        let (color, fill_alpha, border) = match hover.state() {
            WidgetState::Active => (self.color, 0.6, 4.0),
            WidgetState::Hover => (self.color, 0.4, 3.0),
            WidgetState::Disabled => (theme::TEXT_DIM, 0.1, 2.0),
            WidgetState::Normal => (self.color, 0.25, 2.0),
        };

        surface.glass_panel(rect, color, theme::GLASS_ALPHA);
        surface.fill_rect(rect, color, fill_alpha, theme::BUTTON_RADIUS);
        surface.stroke_rect(rect, color, border, theme::BUTTON_RADIUS);

        let progress = self.target.progress();
        if progress > 0.0 {
            surface.progress_bar(rect, progress, theme::SUCCESS);
        }

        surface.text(
            &self.label,
            Point2D::new(rect.center().x, rect.center().y + 8.0),
            TextStyle::new(theme::TEXT, TextSize::Small).centered(),
        );
    }
}

/// A glass card. Cards highlight on hover and are selected by pinch only.
#[derive(Debug, Clone)]
pub struct Card {
    pub hover: HoverState,
    pub border: Color,
}

impl Card {
    pub fn new(bounds: Rect, border: Color) -> Self {
        Self {
            hover: HoverState::new(bounds),
            border,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.hover.bounds()
    }

    /// Area inside the card padding.
    pub fn content_area(&self) -> Rect {
        self.bounds().inset(theme::CARD_PADDING)
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.hover.is_visible() {
            return;
        }
        let rect = self.bounds();
        let thickness = if self.hover.is_hovered() { 3.0 } else { 2.0 };
        surface.glass_panel(rect, theme::BACKGROUND, theme::GLASS_ALPHA);
        if self.hover.is_hovered() {
            surface.fill_rect(rect, self.border, 0.15, theme::CARD_RADIUS);
        }
        surface.stroke_rect(rect, self.border, thickness, theme::CARD_RADIUS);
    }
}

/// A small pinch target drawn as an outlined icon (back, cart, +, -).
#[derive(Debug, Clone)]
pub struct Hotspot {
    pub hover: HoverState,
    pub icon: Icon,
    pub color: Color,
}

impl Hotspot {
    pub fn new(bounds: Rect, icon: Icon, color: Color) -> Self {
        Self {
            hover: HoverState::new(bounds),
            icon,
            color,
        }
    }

    /// Outlined hotspot with the icon at its left.
    pub fn render_outlined(&self, surface: &mut dyn Surface) {
        let rect = self.hover.bounds();
        let thickness = if self.hover.is_hovered() { 3.0 } else { 2.0 };
        surface.stroke_rect(rect, self.color, thickness, 10.0);
        surface.icon(self.icon, Rect::new(rect.x + 10.0, rect.y + 10.0, 30.0, 30.0), self.color);
    }

    /// Solid hotspot with the icon centered.
    pub fn render_filled(&self, surface: &mut dyn Surface) {
        let rect = self.hover.bounds();
        let alpha = if self.hover.is_hovered() { 0.9 } else { 0.6 };
        surface.fill_rect(rect, self.color, alpha, 8.0);
        let size = rect.h.min(rect.w) - 10.0;
        let icon_rect = Rect::new(
            rect.center().x - size / 2.0,
            rect.center().y - size / 2.0,
            size,
            size,
        );
        surface.icon(self.icon, icon_rect, theme::TEXT);
    }
}
