use tracing::debug;

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::{ScreenId, TransitionPayload};
use airmenu_kiosk_model::geometry::{Point2D, Rect};

use super::{backdrop, KioskContext, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, Surface, TextSize, TextStyle};
use crate::theme;
use crate::widgets::Button;

/// Welcome screen with a single "START ORDERING" button.
#[derive(Debug)]
pub struct HomeScreen {
    metrics: ScreenMetrics,
    start: Button,
}

impl HomeScreen {
    pub fn new(metrics: ScreenMetrics) -> Self {
        let bounds = Rect::centered_h(
            metrics.width,
            metrics.height / 2.0 + 50.0,
            300.0,
            theme::BUTTON_HEIGHT,
        );
        Self {
            metrics,
            start: Button::new("START ORDERING", bounds, theme::PRIMARY, metrics.dwell_secs),
        }
    }

    fn start_order(ctx: &mut KioskContext<'_>) {
        ctx.nav
            .transition_to(ScreenId::Category, TransitionPayload::none());
    }
}

impl ScreenBehavior for HomeScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Home
    }

    fn update(
        &mut self,
        ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        now: Seconds,
        dwell_armed: bool,
    ) {
        if self.start.update(cursor, now, dwell_armed) {
            debug!("Start button dwell-selected");
            Self::start_order(ctx);
        }
    }

    fn render(&self, _ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        backdrop(surface, m, Color::bgr(40, 25, 15));

        let center_x = m.width / 2.0;
        let title_y = m.height / 2.0 - 100.0;
        surface.text(
            "AirMenu",
            Point2D::new(center_x, title_y),
            TextStyle::new(theme::TEXT, TextSize::Title).centered().bold(),
        );
        surface.text(
            "Touchless AR Restaurant Menu",
            Point2D::new(center_x, title_y + 60.0),
            TextStyle::new(theme::TEXT_DIM, TextSize::Medium).centered(),
        );
        surface.text(
            "Hover and hold to select",
            Point2D::new(center_x, m.height / 2.0 + 150.0),
            TextStyle::new(theme::TEXT_DIM, TextSize::Small).centered(),
        );

        self.start.render(surface);
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, _now: Seconds) -> bool {
        if self.start.hit(cursor) {
            Self::start_order(ctx);
            return true;
        }
        false
    }
}
