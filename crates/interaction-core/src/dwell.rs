//! Hover tracking and dwell-to-select.
//!
//! Every interactive widget embeds a [`HoverState`] (hit region, visibility,
//! enablement, visual state). Widgets that can be selected by holding the
//! cursor still also carry a [`DwellTimer`]. [`DwellTarget`] bundles both for
//! the common case.

use serde::{Deserialize, Serialize};

use airmenu_common::clock::Seconds;
use airmenu_kiosk_model::geometry::{Point2D, Rect};

/// Visual state of an interactive widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    #[default]
    Normal,
    Hover,
    Active,
    Disabled,
}

/// Hit region plus hover bookkeeping shared by all interactive widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    bounds: Rect,
    visible: bool,
    enabled: bool,
    state: WidgetState,
}

impl HoverState {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            visible: true,
            enabled: true,
            state: WidgetState::Normal,
        }
    }

    /// Whether `point` hits the widget. Hidden or disabled widgets are never
    /// hit. Edges are inclusive.
    pub fn is_inside(&self, point: Point2D) -> bool {
        self.visible && self.enabled && self.bounds.contains(point)
    }

    /// Refresh hover from the current cursor. Returns whether the cursor is
    /// over the widget.
    ///
    /// Normal becomes Hover on entry and Hover returns to Normal on exit.
    /// Active and Disabled are left alone.
    pub fn update_hover(&mut self, cursor: Option<Point2D>) -> bool {
        let hovering = cursor.is_some_and(|p| self.is_inside(p));
        match (self.state, hovering) {
            (WidgetState::Normal, true) => self.state = WidgetState::Hover,
            (WidgetState::Hover, false) => self.state = WidgetState::Normal,
            _ => {}
        }
        hovering
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.state = if enabled {
            WidgetState::Normal
        } else {
            WidgetState::Disabled
        };
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Enter the Active (pressed) state. Ignored while disabled.
    pub fn press(&mut self) {
        if self.enabled {
            self.state = WidgetState::Active;
        }
    }

    /// Leave the Active state.
    pub fn release(&mut self) {
        if self.state == WidgetState::Active {
            self.state = WidgetState::Normal;
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hovered(&self) -> bool {
        self.state == WidgetState::Hover
    }
}

/// Continuous-hover selection timer.
///
/// Progress ramps from 0 to 1 over `duration` while hovering. The timer fires
/// once when progress reaches 1, then stays latched until hover is lost, so
/// holding the cursor still never repeats a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellTimer {
    duration: Seconds,
    started_at: Option<Seconds>,
    progress: f64,
    latched: bool,
}

impl DwellTimer {
    pub fn new(duration: Seconds) -> Self {
        Self {
            duration,
            started_at: None,
            progress: 0.0,
            latched: false,
        }
    }

    /// Advance the timer. Returns true exactly once per hover session, on
    /// the frame the dwell completes.
    pub fn update(&mut self, hovering: bool, now: Seconds) -> bool {
        if !hovering {
            self.reset();
            return false;
        }
        if self.latched {
            return false;
        }

        let started_at = *self.started_at.get_or_insert(now);
        let elapsed = (now - started_at).max(0.0);
        self.progress = if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).min(1.0)
        };

        if self.progress >= 1.0 {
            self.latched = true;
            self.progress = 0.0;
            return true;
        }
        false
    }

    /// End the current hover session without firing. Used when another
    /// input already selected the widget.
    pub fn consume(&mut self) {
        self.latched = true;
        self.progress = 0.0;
    }

    pub fn reset(&mut self) {
        self.started_at = None;
        self.progress = 0.0;
        self.latched = false;
    }

    /// Fraction of the dwell completed, in [0, 1).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn duration(&self) -> Seconds {
        self.duration
    }
}

/// A hover region that selects on dwell.
#[derive(Debug, Clone, PartialEq)]
pub struct DwellTarget {
    pub hover: HoverState,
    pub dwell: DwellTimer,
}

impl DwellTarget {
    pub fn new(bounds: Rect, dwell_secs: Seconds) -> Self {
        Self {
            hover: HoverState::new(bounds),
            dwell: DwellTimer::new(dwell_secs),
        }
    }

    /// Update hover and dwell for this frame. Returns true when the dwell
    /// fires.
    ///
    /// With `armed` false (a pinch is being handled this frame) a hovered
    /// target is pressed for the frame and its hover session is consumed
    /// instead of firing.
    pub fn update(&mut self, cursor: Option<Point2D>, now: Seconds, armed: bool) -> bool {
        self.hover.release();
        let hovering = self.hover.update_hover(cursor);
        if hovering && !armed {
            self.hover.press();
            self.dwell.consume();
            return false;
        }
        self.dwell.update(hovering, now)
    }

    pub fn progress(&self) -> f64 {
        self.dwell.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Rect = Rect::new(490.0, 410.0, 300.0, 60.0);

    #[test]
    fn test_is_inside_respects_visibility_and_enablement() {
        let mut hover = HoverState::new(BUTTON);
        let center = Point2D::new(640.0, 440.0);
        assert!(hover.is_inside(center));
        assert!(hover.is_inside(Point2D::new(490.0, 410.0)));
        assert!(hover.is_inside(Point2D::new(790.0, 470.0)));

        hover.set_visible(false);
        assert!(!hover.is_inside(center));
        hover.set_visible(true);
        hover.set_enabled(false);
        assert!(!hover.is_inside(center));
        assert_eq!(hover.state(), WidgetState::Disabled);
    }

    #[test]
    fn test_hover_transitions() {
        let mut hover = HoverState::new(BUTTON);
        assert!(hover.update_hover(Some(Point2D::new(600.0, 430.0))));
        assert_eq!(hover.state(), WidgetState::Hover);
        assert!(!hover.update_hover(None));
        assert_eq!(hover.state(), WidgetState::Normal);
    }

    #[test]
    fn test_active_survives_hover_updates() {
        let mut hover = HoverState::new(BUTTON);
        hover.press();
        hover.update_hover(None);
        assert_eq!(hover.state(), WidgetState::Active);
        hover.release();
        assert_eq!(hover.state(), WidgetState::Normal);
    }

    #[test]
    fn test_dwell_fires_once_per_session() {
        let mut dwell = DwellTimer::new(0.8);
        assert!(!dwell.update(true, 0.0));
        assert!(!dwell.update(true, 0.4));
        assert!((dwell.progress() - 0.5).abs() < 1e-9);
        assert!(dwell.update(true, 0.8));
        assert_eq!(dwell.progress(), 0.0);

        for i in 1..20 {
            assert!(!dwell.update(true, 0.8 + i as f64 * 0.1));
        }

        assert!(!dwell.update(false, 3.0));
        assert!(!dwell.update(true, 3.1));
        assert!(dwell.update(true, 4.0));
    }

    #[test]
    fn test_dwell_resets_when_hover_lost() {
        let mut dwell = DwellTimer::new(0.8);
        dwell.update(true, 0.0);
        dwell.update(true, 0.7);
        dwell.update(false, 0.75);
        assert_eq!(dwell.progress(), 0.0);
        assert!(!dwell.update(true, 0.8));
        assert!(!dwell.update(true, 1.5));
        assert!(dwell.update(true, 1.6));
    }

    #[test]
    fn test_consume_suppresses_dwell_until_exit() {
        let mut target = DwellTarget::new(BUTTON, 0.8);
        let inside = Some(Point2D::new(640.0, 440.0));
        assert!(!target.update(inside, 0.0, true));
        assert!(!target.update(inside, 0.5, false));
        assert!(!target.update(inside, 2.0, true));

        target.update(None, 2.1, true);
        assert!(!target.update(inside, 2.2, true));
        assert!(target.update(inside, 3.1, true));
    }

    #[test]
    fn test_pinch_frame_presses_hovered_target() {
        let mut target = DwellTarget::new(BUTTON, 0.8);
        let inside = Some(Point2D::new(640.0, 440.0));
        target.update(inside, 0.0, true);
        assert_eq!(target.hover.state(), WidgetState::Hover);

        target.update(inside, 0.1, false);
        assert_eq!(target.hover.state(), WidgetState::Active);

        target.update(inside, 0.2, true);
        assert_eq!(target.hover.state(), WidgetState::Hover);

        target.update(None, 0.3, false);
        assert_eq!(target.hover.state(), WidgetState::Normal);
    }

    #[test]
    fn test_disabled_target_never_fires() {
        let mut target = DwellTarget::new(BUTTON, 0.8);
        target.hover.set_enabled(false);
        let inside = Some(Point2D::new(640.0, 440.0));
        for i in 0..30 {
            assert!(!target.update(inside, i as f64 * 0.1, true));
        }
    }
}
