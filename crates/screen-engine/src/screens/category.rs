use tracing::debug;

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::{ScreenId, TransitionPayload};
use airmenu_kiosk_model::geometry::{Point2D, Rect};
use airmenu_kiosk_model::menu::{Category, Menu};

use super::{back_hotspot, backdrop, KioskContext, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, Icon, Surface, TextSize, TextStyle};
use crate::theme;
use crate::widgets::{Card, Hotspot};

const CARD_W: f64 = 250.0;
const CARD_H: f64 = 180.0;
const SPACING: f64 = 30.0;
const GRID_TOP: f64 = 150.0;
const ICON_SIZE: f64 = 60.0;

/// 2x2 grid of category cards. Cards highlight on hover; a pinch opens the
/// category.
#[derive(Debug)]
pub struct CategoryScreen {
    metrics: ScreenMetrics,
    cards: Vec<(Card, Category)>,
    back: Hotspot,
}

impl CategoryScreen {
    pub fn new(metrics: ScreenMetrics, menu: &Menu) -> Self {
        let start_x = (metrics.width - (2.0 * CARD_W + SPACING)) / 2.0;
        let cards = menu
            .categories()
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let (row, col) = ((i / 2) as f64, (i % 2) as f64);
                let bounds = Rect::new(
                    start_x + col * (CARD_W + SPACING),
                    GRID_TOP + row * (CARD_H + SPACING),
                    CARD_W,
                    CARD_H,
                );
                (Card::new(bounds, theme::PRIMARY), category.clone())
            })
            .collect();

        Self {
            metrics,
            cards,
            back: back_hotspot(),
        }
    }
}

impl ScreenBehavior for CategoryScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Category
    }

    fn update(
        &mut self,
        _ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        _now: Seconds,
        _dwell_armed: bool,
    ) {
        for (card, _) in &mut self.cards {
            card.hover.update_hover(cursor);
        }
        self.back.hover.update_hover(cursor);
    }

    fn render(&self, _ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        backdrop(surface, m, Color::bgr(30, 20, 20));

        surface.text(
            "Select Category",
            Point2D::new(m.width / 2.0, theme::HEADER_Y),
            TextStyle::new(theme::TEXT, TextSize::Large).centered(),
        );

        for (card, category) in &self.cards {
            card.render(surface);
            let bounds = card.bounds();
            let icon_top = card.content_area().y + 10.0;
            surface.icon(
                Icon::Category(category.icon),
                Rect::new(
                    bounds.center().x - ICON_SIZE / 2.0,
                    icon_top,
                    ICON_SIZE,
                    ICON_SIZE,
                ),
                theme::PRIMARY,
            );
            surface.text(
                &category.name,
                Point2D::new(bounds.center().x, icon_top + ICON_SIZE + 30.0),
                TextStyle::new(theme::TEXT, TextSize::Medium).centered(),
            );
        }

        self.back.render_outlined(surface);
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, _now: Seconds) -> bool {
        if self.back.hover.is_inside(cursor) {
            ctx.nav.go_back();
            return true;
        }

        let Some((_, category)) = self
            .cards
            .iter()
            .find(|(card, _)| card.hover.is_inside(cursor))
        else {
            return false;
        };

        debug!(category = %category.id, "Category selected");
        ctx.nav.transition_to(
            ScreenId::Items,
            TransitionPayload::category(category.clone()),
        );
        true
    }
}
