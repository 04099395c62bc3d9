use std::path::PathBuf;

use chrono::{Local, TimeZone};

use airmenu_common::config::AppConfig;
use airmenu_interaction_core::navigation::ScreenId;
use airmenu_kiosk_model::menu::Menu;
use airmenu_screen_engine::provider::{HandPoseProvider, ScriptedHandProvider};
use airmenu_screen_engine::{FrameInput, Kiosk, ReplaySummary};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("scripts")
        .join("start-order.jsonl")
}

fn new_kiosk() -> Kiosk {
    let started_at = Local.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
    Kiosk::new(AppConfig::default(), Menu::builtin(), started_at)
}

fn replay_fixture() -> (Kiosk, ReplaySummary) {
    let mut provider =
        ScriptedHandProvider::from_path(&fixture_path()).expect("fixture script should load");
    let mut kiosk = new_kiosk();
    let summary = kiosk.replay(&mut provider).expect("replay should succeed");
    (kiosk, summary)
}

#[test]
fn scripted_order_visits_every_screen_in_order() {
    let (_, summary) = replay_fixture();
    let screens: Vec<ScreenId> = summary.visited.iter().map(|(_, s)| *s).collect();
    assert_eq!(
        screens,
        vec![
            ScreenId::Home,
            ScreenId::Category,
            ScreenId::Items,
            ScreenId::Cart,
            ScreenId::Receipt,
            ScreenId::Home,
        ]
    );
    assert_eq!(summary.final_screen, ScreenId::Home);
    assert!(!summary.quit);
}

#[test]
fn scripted_order_bills_two_paneer_tikka() {
    let (kiosk, summary) = replay_fixture();
    assert_eq!(summary.receipts.len(), 1);

    let receipt = &summary.receipts[0];
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.lines[0].item.name, "Paneer Tikka");
    assert_eq!(receipt.lines[0].quantity, 2);
    assert!((receipt.subtotal - 360.0).abs() < 1e-9);
    assert!((receipt.gst_amount - 64.8).abs() < 1e-9);
    assert!((receipt.total - 424.8).abs() < 1e-9);
    assert_eq!(receipt.date, "07/03/2026");

    // Starting a new order empties the cart and the history.
    assert!(kiosk.cart().is_empty());
    assert!(kiosk.navigation().history().is_empty());
}

#[test]
fn scripted_order_uses_dwell_and_pinch() {
    let (_, summary) = replay_fixture();
    // Starters card, two "+" pinches, cart hotspot, new order.
    assert_eq!(summary.clicks, 5);

    let home_left_at = summary.visited[1].0;
    assert!(
        (1.2..1.4).contains(&home_left_at),
        "start dwell fired at {home_left_at}"
    );
}

#[test]
fn frame_timeline_is_driven_by_the_script() {
    let mut provider =
        ScriptedHandProvider::from_path(&fixture_path()).expect("fixture script should load");
    let mut kiosk = new_kiosk();
    let mut surface = airmenu_screen_engine::DrawList::new(1280, 720);

    let mut cursor_seen = false;
    for i in 0..30 {
        let now = i as f64 / 30.0;
        let hands = provider.detect(now).unwrap();
        surface.clear();
        let report = kiosk.tick(FrameInput::hands(now, hands), &mut surface);
        cursor_seen |= report.cursor.is_some();
    }

    // The hand appears at 0.5s.
    assert!(cursor_seen);
    assert!(surface.contains_text("Hand Detected"));
    assert!(surface.contains_text("START ORDERING"));
    assert!(!provider.is_exhausted());
}
