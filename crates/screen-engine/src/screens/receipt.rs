use tracing::info;

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::ScreenId;
use airmenu_kiosk_model::billing::{format_price, Receipt};
use airmenu_kiosk_model::geometry::{Point2D, Rect};

use super::{backdrop, KioskContext, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, Icon, Surface, TextSize, TextStyle};
use crate::theme;
use crate::widgets::{Button, Card};

/// Lines listed on the receipt card before the "... and N more" summary.
const MAX_LISTED_LINES: usize = 5;
const CARD_W: f64 = 700.0;
const CARD_TOP: f64 = 150.0;
const CARD_H: f64 = 420.0;

/// Order confirmation showing the receipt snapshot carried by the
/// transition, plus a button that starts a new order.
#[derive(Debug)]
pub struct ReceiptScreen {
    metrics: ScreenMetrics,
    new_order: Button,
}

impl ReceiptScreen {
    pub fn new(metrics: ScreenMetrics) -> Self {
        let bounds = Rect::centered_h(
            metrics.width,
            metrics.height - 80.0,
            300.0,
            theme::BUTTON_HEIGHT,
        );
        Self {
            metrics,
            new_order: Button::new("START NEW ORDER", bounds, theme::PRIMARY, metrics.dwell_secs),
        }
    }

    fn start_new_order(ctx: &mut KioskContext<'_>) {
        info!("Starting a new order");
        ctx.cart.clear();
        ctx.nav.reset();
    }

    fn render_receipt(&self, receipt: &Receipt, surface: &mut dyn Surface) {
        let m = &self.metrics;
        let card = Card::new(
            Rect::new((m.width - CARD_W) / 2.0, CARD_TOP, CARD_W, CARD_H),
            theme::SUCCESS,
        );
        card.render(surface);

        let content = card.content_area();
        let left = content.x;
        let right = content.right();
        let center_x = card.bounds().center().x;
        let currency = receipt.currency.as_str();

        surface.text(
            &receipt.restaurant,
            Point2D::new(center_x, content.y + 10.0),
            TextStyle::new(theme::TEXT, TextSize::Medium).centered().bold(),
        );
        surface.text(
            &format!("{} {}", receipt.date, receipt.time),
            Point2D::new(center_x, content.y + 40.0),
            TextStyle::new(theme::TEXT_DIM, TextSize::Small).centered(),
        );

        let line_style = TextStyle::new(theme::TEXT, TextSize::Small);
        let mut y = content.y + 80.0;
        for line in receipt.lines.iter().take(MAX_LISTED_LINES) {
            surface.text(
                &format!("{}x {}", line.quantity, line.item.name),
                Point2D::new(left, y),
                line_style,
            );
            surface.text(
                &format_price(line.line_total() as f64, currency),
                Point2D::new(right, y),
                line_style.right(),
            );
            y += 28.0;
        }
        if receipt.lines.len() > MAX_LISTED_LINES {
            surface.text(
                &format!("... and {} more items", receipt.lines.len() - MAX_LISTED_LINES),
                Point2D::new(left, y),
                TextStyle::new(theme::TEXT_DIM, TextSize::Tiny),
            );
        }

        let dim = TextStyle::new(theme::TEXT_DIM, TextSize::Small);
        let totals_y = card.bounds().bottom() - 110.0;
        surface.fill_rect(
            Rect::new(left, totals_y - 20.0, right - left, 1.0),
            theme::TEXT_DIM,
            0.5,
            0.0,
        );
        let rows = [
            ("Subtotal:".to_string(), receipt.subtotal, dim),
            (
                format!("GST ({:.0}%):", receipt.gst_rate_percent),
                receipt.gst_amount,
                dim,
            ),
            (
                "TOTAL:".to_string(),
                receipt.total,
                TextStyle::new(theme::ACCENT, TextSize::Medium).bold(),
            ),
        ];
        for (i, (label, amount, style)) in rows.into_iter().enumerate() {
            let row_y = totals_y + i as f64 * 30.0;
            surface.text(&label, Point2D::new(left, row_y), style);
            surface.text(&format_price(amount, currency), Point2D::new(right, row_y), style.right());
        }
    }
}

impl ScreenBehavior for ReceiptScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Receipt
    }

    fn update(
        &mut self,
        ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        now: Seconds,
        dwell_armed: bool,
    ) {
        if self.new_order.update(cursor, now, dwell_armed) {
            Self::start_new_order(ctx);
        }
    }

    fn render(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        let m = &self.metrics;
        backdrop(surface, m, Color::bgr(20, 35, 20));

        let center_x = m.width / 2.0;
        surface.icon(
            Icon::Checkmark,
            Rect::new(center_x - 30.0, 30.0, 60.0, 60.0),
            theme::SUCCESS,
        );
        surface.text(
            "Order Complete!",
            Point2D::new(center_x, 125.0),
            TextStyle::new(theme::SUCCESS, TextSize::Large).centered().bold(),
        );

        if let Some(receipt) = ctx.nav.receipt() {
            self.render_receipt(receipt, surface);
        }

        surface.text(
            "Thank you for your order!",
            Point2D::new(center_x, m.height - 100.0),
            TextStyle::new(theme::TEXT_DIM, TextSize::Small).centered(),
        );
        self.new_order.render(surface);
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, _now: Seconds) -> bool {
        if self.new_order.hit(cursor) {
            Self::start_new_order(ctx);
            return true;
        }
        false
    }
}
