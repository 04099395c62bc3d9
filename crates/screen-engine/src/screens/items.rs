use tracing::debug;

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::{ScreenId, TransitionPayload};
use airmenu_kiosk_model::geometry::{Point2D, Rect};
use airmenu_kiosk_model::menu::MenuItem;

use super::{back_hotspot, backdrop, KioskContext, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, Icon, Surface, TextSize, TextStyle};
use crate::theme;
use crate::widgets::{Card, Hotspot};

const LIST_LEFT: f64 = 50.0;
const LIST_TOP: f64 = 120.0;
const ROW_SPACING: f64 = 15.0;

#[derive(Debug)]
struct ItemRow {
    card: Card,
    add: Hotspot,
    item: MenuItem,
}

/// The items of the selected category, one card per item with a "+" button.
#[derive(Debug)]
pub struct ItemsScreen {
    metrics: ScreenMetrics,
    rows: Vec<ItemRow>,
    back: Hotspot,
    cart: Hotspot,
}

impl ItemsScreen {
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            rows: Vec::new(),
            back: back_hotspot(),
            cart: Hotspot::new(
                Rect::new(metrics.width - 200.0, 20.0, 180.0, 50.0),
                Icon::Cart,
                theme::PRIMARY,
            ),
        }
    }

    fn build_rows(&mut self, items: Vec<&MenuItem>) {
        let card_w = self.metrics.width - 2.0 * LIST_LEFT;
        self.rows = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let y = LIST_TOP + i as f64 * (theme::ITEM_HEIGHT + ROW_SPACING);
                let add_bounds = Rect::new(
                    LIST_LEFT + card_w - 60.0,
                    y + (theme::ITEM_HEIGHT - 40.0) / 2.0,
                    50.0,
                    40.0,
                );
                ItemRow {
                    card: Card::new(
                        Rect::new(LIST_LEFT, y, card_w, theme::ITEM_HEIGHT),
                        theme::PRIMARY,
                    ),
                    add: Hotspot::new(add_bounds, Icon::Plus, theme::SUCCESS),
                    item: item.clone(),
                }
            })
            .collect();
    }
}

impl ScreenBehavior for ItemsScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Items
    }

    fn on_enter(&mut self, ctx: &mut KioskContext<'_>) {
        let Some(category) = ctx.nav.selected_category() else {
            debug!("Items screen entered without a selected category");
            self.rows.clear();
            return;
        };
        let items = ctx.menu.items_in(&category.id);
        debug!(category = %category.id, items = items.len(), "Loaded category items");
        self.build_rows(items);
    }

    fn update(
        &mut self,
        _ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        _now: Seconds,
        _dwell_armed: bool,
    ) {
        for row in &mut self.rows {
            row.card.hover.update_hover(cursor);
            row.add.hover.update_hover(cursor);
        }
        self.back.hover.update_hover(cursor);
        self.cart.hover.update_hover(cursor);
    }

    fn render(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        backdrop(surface, m, Color::bgr(25, 20, 30));

        if let Some(category) = ctx.nav.selected_category() {
            surface.text(
                &category.name,
                Point2D::new(m.width / 2.0, theme::HEADER_Y),
                TextStyle::new(theme::TEXT, TextSize::Large).centered(),
            );
        }

        for row in self.rows.iter().filter(|r| r.card.bounds().y <= m.height) {
            row.card.render(surface);
            let content = row.card.content_area();
            surface.text(
                &row.item.name,
                Point2D::new(content.x, content.y + 25.0),
                TextStyle::new(theme::TEXT, TextSize::Medium),
            );
            surface.text(
                &row.item.description,
                Point2D::new(content.x, content.y + 50.0),
                TextStyle::new(theme::TEXT_DIM, TextSize::Small),
            );
            surface.text(
                &format!("{}{}", ctx.billing.currency_symbol, row.item.price),
                Point2D::new(content.x, content.y + 80.0),
                TextStyle::new(theme::ACCENT, TextSize::Medium).bold(),
            );
            row.add.render_filled(surface);
        }

        self.back.render_outlined(surface);
        self.cart.render_outlined(surface);
        let cart_rect = self.cart.hover.bounds();
        surface.text(
            &format!("Cart ({})", ctx.cart.item_count()),
            Point2D::new(cart_rect.x + 50.0, cart_rect.y + 33.0),
            TextStyle::new(theme::TEXT, TextSize::Small),
        );
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, _now: Seconds) -> bool {
        if self.back.hover.is_inside(cursor) {
            ctx.nav.go_back();
            return true;
        }
        if self.cart.hover.is_inside(cursor) {
            ctx.nav
                .transition_to(ScreenId::Cart, TransitionPayload::none());
            return true;
        }

        match self.rows.iter().find(|row| row.add.hover.is_inside(cursor)) {
            Some(row) => {
                ctx.cart.add_item(row.item.id, 1);
                debug!(
                    item = row.item.id,
                    quantity = ctx.cart.quantity(row.item.id),
                    "Added item to cart"
                );
                true
            }
            None => false,
        }
    }
}
