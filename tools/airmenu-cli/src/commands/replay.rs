//! Replay a hand script headless on the script's own timeline.

use std::path::PathBuf;

use chrono::Local;

use airmenu_common::config::AppConfig;
use airmenu_kiosk_model::billing::format_price;
use airmenu_screen_engine::{Kiosk, ScriptedHandProvider};

pub fn run(config: AppConfig, script: PathBuf, catalog: Option<PathBuf>) -> anyhow::Result<()> {
    let menu = super::load_menu(catalog.as_deref())?;
    let mut provider = ScriptedHandProvider::from_path(&script)?;
    let fps = config.display.fps;
    let mut kiosk = Kiosk::new(config, menu, Local::now());

    println!("Replaying {} at {fps} fps", script.display());
    println!("  Keyframes: {}", provider.keyframes().len());
    println!("  Duration: {:.2}s", provider.duration());
    println!();

    let summary = kiosk.replay(&mut provider)?;

    println!("Screens:");
    for (t, screen) in &summary.visited {
        println!("  {t:>6.2}s  {screen}");
    }
    println!();

    for receipt in &summary.receipts {
        let currency = receipt.currency.as_str();
        println!("Receipt ({} {}):", receipt.date, receipt.time);
        for line in &receipt.lines {
            println!(
                "  {}x {:<24} {}",
                line.quantity,
                line.item.name,
                format_price(line.line_total() as f64, currency)
            );
        }
        println!("  Subtotal: {}", format_price(receipt.subtotal, currency));
        println!(
            "  GST ({:.0}%): {}",
            receipt.gst_rate_percent,
            format_price(receipt.gst_amount, currency)
        );
        println!("  Total: {}", format_price(receipt.total, currency));
        println!();
    }

    println!(
        "Frames: {}  Clicks: {}  Final screen: {}",
        summary.frames, summary.clicks, summary.final_screen
    );
    Ok(())
}
