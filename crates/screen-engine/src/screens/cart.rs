use tracing::{debug, info};

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::{ScreenId, TransitionPayload};
use airmenu_kiosk_model::billing::{self, format_price};
use airmenu_kiosk_model::cart::CartLine;
use airmenu_kiosk_model::geometry::{Point2D, Rect};

use super::{back_hotspot, backdrop, KioskContext, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, Icon, Surface, TextSize, TextStyle};
use crate::theme;
use crate::widgets::{Button, Card, Hotspot};

const LIST_LEFT: f64 = 50.0;
const LIST_TOP: f64 = 120.0;
const ROW_H: f64 = 100.0;
const ROW_SPACING: f64 = 15.0;

#[derive(Debug)]
struct CartRow {
    card: Card,
    minus: Hotspot,
    plus: Hotspot,
    line: CartLine,
}

/// Cart review with per-line quantity controls, a billing summary, and the
/// checkout button.
#[derive(Debug)]
pub struct CartScreen {
    metrics: ScreenMetrics,
    rows: Vec<CartRow>,
    checkout: Button,
    back: Hotspot,
}

impl CartScreen {
    pub fn new(metrics: ScreenMetrics) -> Self {
        let checkout_bounds = Rect::centered_h(
            metrics.width,
            metrics.height - 100.0,
            300.0,
            theme::BUTTON_HEIGHT,
        );
        Self {
            metrics,
            rows: Vec::new(),
            checkout: Button::new("CHECKOUT", checkout_bounds, theme::SUCCESS, metrics.dwell_secs),
            back: back_hotspot(),
        }
    }

    fn rebuild(&mut self, ctx: &KioskContext<'_>) {
        let card_w = self.metrics.width - 2.0 * LIST_LEFT;
        self.rows = ctx
            .cart
            .lines(ctx.menu)
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let y = LIST_TOP + i as f64 * (ROW_H + ROW_SPACING);
                let controls_x = LIST_LEFT + card_w - 150.0;
                let controls_y = y + (ROW_H - 40.0) / 2.0;
                let minus = Rect::new(controls_x, controls_y, 40.0, 40.0);
                CartRow {
                    card: Card::new(Rect::new(LIST_LEFT, y, card_w, ROW_H), theme::SECONDARY),
                    minus: Hotspot::new(minus, Icon::Minus, theme::WARNING),
                    plus: Hotspot::new(minus.translate(85.0, 0.0), Icon::Plus, theme::SUCCESS),
                    line,
                }
            })
            .collect();
        self.checkout.set_enabled(!ctx.cart.is_empty());
    }

    fn checkout(ctx: &mut KioskContext<'_>) {
        if ctx.cart.is_empty() {
            return;
        }
        let receipt = billing::generate_receipt(ctx.cart.lines(ctx.menu), ctx.billing, ctx.wall_time);
        info!(
            lines = receipt.lines.len(),
            total = receipt.total,
            "Order checked out"
        );
        ctx.nav
            .transition_to(ScreenId::Receipt, TransitionPayload::receipt(receipt));
    }

    fn render_summary(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        let currency = &ctx.billing.currency_symbol;
        let subtotal = ctx.cart.subtotal(ctx.menu) as f64;
        let gst = billing::gst(subtotal, ctx.billing.gst_rate);
        let total = billing::total(subtotal, gst);

        let x = m.width - 350.0;
        let y = m.height - 220.0;
        let panel = Card::new(Rect::new(x - 20.0, y - 20.0, 320.0, 100.0), theme::ACCENT);
        panel.render(surface);

        let dim = TextStyle::new(theme::TEXT_DIM, TextSize::Small);
        surface.text(
            &format!("Subtotal: {}", format_price(subtotal, currency)),
            Point2D::new(x, y + 10.0),
            dim,
        );
        surface.text(
            &format!(
                "GST ({:.0}%): {}",
                ctx.billing.gst_rate * 100.0,
                format_price(gst, currency)
            ),
            Point2D::new(x, y + 35.0),
            dim,
        );
        surface.text(
            &format!("Total: {}", format_price(total, currency)),
            Point2D::new(x, y + 65.0),
            TextStyle::new(theme::ACCENT, TextSize::Medium).bold(),
        );
    }
}

impl ScreenBehavior for CartScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Cart
    }

    fn on_enter(&mut self, ctx: &mut KioskContext<'_>) {
        self.rebuild(ctx);
    }

    fn update(
        &mut self,
        ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        now: Seconds,
        dwell_armed: bool,
    ) {
        self.checkout.set_enabled(!ctx.cart.is_empty());
        if self.checkout.update(cursor, now, dwell_armed) {
            debug!("Checkout dwell-selected");
            Self::checkout(ctx);
        }

        for row in &mut self.rows {
            row.card.hover.update_hover(cursor);
            row.minus.hover.update_hover(cursor);
            row.plus.hover.update_hover(cursor);
        }
        self.back.hover.update_hover(cursor);
    }

    fn render(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        backdrop(surface, m, Color::bgr(30, 25, 20));

        surface.text(
            "Your Cart",
            Point2D::new(m.width / 2.0, theme::HEADER_Y),
            TextStyle::new(theme::TEXT, TextSize::Large).centered(),
        );

        if ctx.cart.is_empty() {
            surface.text(
                "Cart is empty",
                Point2D::new(m.width / 2.0, m.height / 2.0),
                TextStyle::new(theme::TEXT_DIM, TextSize::Medium).centered(),
            );
        } else {
            let currency = &ctx.billing.currency_symbol;
            for row in &self.rows {
                row.card.render(surface);
                let content = row.card.content_area();
                surface.text(
                    &row.line.item.name,
                    Point2D::new(content.x, content.y + 20.0),
                    TextStyle::new(theme::TEXT, TextSize::Small),
                );
                surface.text(
                    &format!("{currency}{} each", row.line.item.price),
                    Point2D::new(content.x, content.y + 45.0),
                    TextStyle::new(theme::TEXT_DIM, TextSize::Small),
                );

                row.minus.render_filled(surface);
                let minus = row.minus.hover.bounds();
                surface.text(
                    &row.line.quantity.to_string(),
                    Point2D::new(minus.right() + 15.0, minus.y + 28.0),
                    TextStyle::new(theme::TEXT, TextSize::Medium).bold(),
                );
                row.plus.render_filled(surface);
            }

            self.render_summary(ctx, surface);
            self.checkout.render(surface);
        }

        self.back.render_outlined(surface);
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, _now: Seconds) -> bool {
        if self.back.hover.is_inside(cursor) {
            ctx.nav.go_back();
            return true;
        }
        if self.checkout.hit(cursor) {
            Self::checkout(ctx);
            return true;
        }

        let change = self.rows.iter().find_map(|row| {
            let id = row.line.item.id;
            if row.minus.hover.is_inside(cursor) {
                Some((id, row.line.quantity.saturating_sub(1)))
            } else if row.plus.hover.is_inside(cursor) {
                Some((id, row.line.quantity.saturating_add(1)))
            } else {
                None
            }
        });

        match change {
            Some((item_id, quantity)) => {
                ctx.cart.update_quantity(item_id, quantity);
                debug!(item = item_id, quantity, "Cart quantity changed");
                self.rebuild(ctx);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::Fixture;
    use crate::surface::DrawList;

    fn entered(fx: &mut Fixture) -> CartScreen {
        let mut ctx = fx.ctx();
        ctx.nav.transition_to(ScreenId::Cart, TransitionPayload::none());
        let mut screen = CartScreen::new(ctx.metrics);
        screen.on_enter(&mut ctx);
        screen
    }

    #[test]
    fn test_controls_layout() {
        let mut fx = Fixture::new();
        fx.cart.add_item(6, 1);
        fx.cart.add_item(16, 2);
        let screen = entered(&mut fx);
        assert_eq!(screen.checkout.bounds(), Rect::new(490.0, 620.0, 300.0, 60.0));
        assert_eq!(screen.rows[1].minus.hover.bounds(), Rect::new(1080.0, 265.0, 40.0, 40.0));
        assert_eq!(screen.rows[1].plus.hover.bounds(), Rect::new(1165.0, 265.0, 40.0, 40.0));
    }

    #[test]
    fn test_quantity_controls() {
        let mut fx = Fixture::new();
        fx.cart.add_item(6, 1);
        let mut screen = entered(&mut fx);
        let mut ctx = fx.ctx();

        assert!(screen.handle_click(&mut ctx, Point2D::new(1185.0, 170.0), 1.0));
        assert_eq!(ctx.cart.quantity(6), 2);

        assert!(screen.handle_click(&mut ctx, Point2D::new(1100.0, 170.0), 2.0));
        assert!(screen.handle_click(&mut ctx, Point2D::new(1100.0, 170.0), 3.0));
        assert!(ctx.cart.is_empty());
        assert!(screen.rows.is_empty());
    }

    #[test]
    fn test_checkout_disabled_when_empty() {
        let mut fx = Fixture::new();
        let mut screen = entered(&mut fx);
        let mut ctx = fx.ctx();
        let on_checkout = Some(Point2D::new(640.0, 650.0));
        for i in 0..30 {
            screen.update(&mut ctx, on_checkout, i as f64 * 0.1, true);
        }
        assert!(!screen.handle_click(&mut ctx, Point2D::new(640.0, 650.0), 4.0));
        assert_eq!(ctx.nav.current(), ScreenId::Cart);

        let mut list = DrawList::new(1280, 720);
        screen.render(&ctx, &mut list);
        assert!(list.contains_text("Cart is empty"));
    }

    #[test]
    fn test_dwell_checkout_carries_receipt() {
        let mut fx = Fixture::new();
        fx.cart.add_item(6, 1);
        fx.cart.add_item(16, 2);
        let mut screen = entered(&mut fx);
        let mut ctx = fx.ctx();
        let on_checkout = Some(Point2D::new(640.0, 650.0));

        screen.update(&mut ctx, on_checkout, 1.0, true);
        screen.update(&mut ctx, on_checkout, 2.0, true);

        assert_eq!(ctx.nav.current(), ScreenId::Receipt);
        let receipt = ctx.nav.receipt().expect("receipt payload");
        assert!((receipt.total - 472.0).abs() < 1e-9);
        assert_eq!(receipt.date, "07/03/2026");
        assert_eq!(receipt.time, "07:30 PM");
    }

    #[test]
    fn test_summary_text() {
        let mut fx = Fixture::new();
        fx.cart.add_item(6, 1);
        fx.cart.add_item(16, 2);
        let screen = entered(&mut fx);
        let ctx = fx.ctx();

        let mut list = DrawList::new(1280, 720);
        screen.render(&ctx, &mut list);
        assert!(list.contains_text("Subtotal: ₹400.00"));
        assert!(list.contains_text("GST (18%): ₹72.00"));
        assert!(list.contains_text("Total: ₹472.00"));
        assert!(list.contains_text("₹60 each"));
    }
}
