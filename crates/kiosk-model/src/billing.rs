//! Billing: subtotal, GST, total, and the receipt snapshot.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// Tax and branding applied to every receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// GST as a fraction (0.18 = 18%).
    pub gst_rate: f64,
    pub restaurant_name: String,
    pub currency_symbol: String,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            gst_rate: 0.18,
            restaurant_name: "AirMenu Restaurant".to_string(),
            currency_symbol: "₹".to_string(),
        }
    }
}

/// An immutable snapshot of a completed order, carried to the receipt screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub restaurant: String,
    /// `dd/mm/YYYY`
    pub date: String,
    /// `hh:mm AM`
    pub time: String,
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    /// GST rate as a percentage (18.0 = 18%).
    pub gst_rate_percent: f64,
    pub gst_amount: f64,
    pub total: f64,
    pub currency: String,
}

pub fn subtotal(lines: &[CartLine]) -> f64 {
    lines.iter().map(|l| l.line_total() as f64).sum()
}

pub fn gst(subtotal: f64, gst_rate: f64) -> f64 {
    subtotal * gst_rate
}

pub fn total(subtotal: f64, gst_amount: f64) -> f64 {
    subtotal + gst_amount
}

/// Build the receipt snapshot for `lines` issued at `issued_at`.
pub fn generate_receipt<Tz>(
    lines: Vec<CartLine>,
    policy: &BillingPolicy,
    issued_at: DateTime<Tz>,
) -> Receipt
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let sub = subtotal(&lines);
    let tax = gst(sub, policy.gst_rate);
    Receipt {
        restaurant: policy.restaurant_name.clone(),
        date: issued_at.format("%d/%m/%Y").to_string(),
        time: issued_at.format("%I:%M %p").to_string(),
        lines,
        subtotal: sub,
        gst_rate_percent: policy.gst_rate * 100.0,
        gst_amount: tax,
        total: total(sub, tax),
        currency: policy.currency_symbol.clone(),
    }
}

/// Format an amount with two decimals, e.g. `₹472.00`.
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::menu::Menu;
    use chrono::Utc;

    fn sample_lines() -> Vec<CartLine> {
        let menu = Menu::builtin();
        let mut cart = Cart::new();
        cart.add_item(6, 1); // 280
        cart.add_item(16, 2); // 60 each
        cart.lines(&menu)
    }

    #[test]
    fn test_totals() {
        let lines = sample_lines();
        let sub = subtotal(&lines);
        assert_eq!(sub, 400.0);
        let tax = gst(sub, 0.18);
        assert!((tax - 72.0).abs() < 1e-9);
        assert!((total(sub, tax) - 472.0).abs() < 1e-9);
    }

    #[test]
    fn test_generate_receipt() {
        let issued_at = Utc.with_ymd_and_hms(2026, 3, 7, 14, 5, 0).unwrap();
        let receipt = generate_receipt(sample_lines(), &BillingPolicy::default(), issued_at);

        assert_eq!(receipt.date, "07/03/2026");
        assert_eq!(receipt.time, "02:05 PM");
        assert_eq!(receipt.lines.len(), 2);
        assert!((receipt.gst_rate_percent - 18.0).abs() < 1e-9);
        assert!((receipt.total - 472.0).abs() < 1e-9);
        assert_eq!(receipt.restaurant, "AirMenu Restaurant");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(472.0, "₹"), "₹472.00");
        assert_eq!(format_price(72.456, "$"), "$72.46");
    }
}
