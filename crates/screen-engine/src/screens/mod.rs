//! The kiosk screens.
//!
//! The screen set is closed, so screens are a tagged [`Screen`] enum whose
//! variants all implement [`ScreenBehavior`]. The interaction loop builds a
//! fresh screen whenever the state machine's current screen changes.

mod cart;
mod category;
mod home;
mod items;
mod receipt;

pub use cart::CartScreen;
pub use category::CategoryScreen;
pub use home::HomeScreen;
pub use items::ItemsScreen;
pub use receipt::ReceiptScreen;

use chrono::{DateTime, Local};

use airmenu_common::clock::Seconds;
use airmenu_interaction_core::navigation::{ScreenId, ScreenStateMachine};
use airmenu_kiosk_model::billing::BillingPolicy;
use airmenu_kiosk_model::cart::Cart;
use airmenu_kiosk_model::geometry::{Point2D, Rect};
use airmenu_kiosk_model::menu::Menu;

use crate::surface::{Color, Icon, Surface};
use crate::theme;
use crate::widgets::Hotspot;

/// Surface size and interaction timing the screens lay themselves out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f64,
    pub height: f64,
    pub dwell_secs: Seconds,
}

/// Everything a screen may read or change during a frame.
pub struct KioskContext<'a> {
    pub nav: &'a mut ScreenStateMachine,
    pub cart: &'a mut Cart,
    pub menu: &'a Menu,
    pub billing: &'a BillingPolicy,
    pub metrics: ScreenMetrics,
    /// Wall-clock time of this frame, stamped on receipts.
    pub wall_time: DateTime<Local>,
}

/// Capabilities every screen provides.
pub trait ScreenBehavior {
    fn id(&self) -> ScreenId;

    /// Called once when the screen becomes active.
    fn on_enter(&mut self, _ctx: &mut KioskContext<'_>) {}

    /// Called once when the screen is replaced.
    fn on_exit(&mut self, _ctx: &mut KioskContext<'_>) {}

    /// Per-frame hover and dwell handling. `dwell_armed` is false on frames
    /// where a pinch click is about to be dispatched.
    fn update(
        &mut self,
        ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        now: Seconds,
        dwell_armed: bool,
    );

    fn render(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface);

    /// Handle a pinch click at `cursor`. Returns whether anything was hit.
    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, now: Seconds) -> bool;
}

/// The active screen.
#[derive(Debug)]
pub enum Screen {
    Home(HomeScreen),
    Category(CategoryScreen),
    Items(ItemsScreen),
    Cart(CartScreen),
    Receipt(ReceiptScreen),
}

impl Screen {
    /// A fresh screen for `id`, not yet entered.
    pub fn build(id: ScreenId, ctx: &KioskContext<'_>) -> Self {
        let metrics = ctx.metrics;
        match id {
            ScreenId::Home => Screen::Home(HomeScreen::new(metrics)),
            ScreenId::Category => Screen::Category(CategoryScreen::new(metrics, ctx.menu)),
            ScreenId::Items => Screen::Items(ItemsScreen::new(metrics)),
            ScreenId::Cart => Screen::Cart(CartScreen::new(metrics)),
            ScreenId::Receipt => Screen::Receipt(ReceiptScreen::new(metrics)),
        }
    }

    fn behavior(&self) -> &dyn ScreenBehavior {
        match self {
            Screen::Home(s) => s,
            Screen::Category(s) => s,
            Screen::Items(s) => s,
            Screen::Cart(s) => s,
            Screen::Receipt(s) => s,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn ScreenBehavior {
        match self {
            Screen::Home(s) => s,
            Screen::Category(s) => s,
            Screen::Items(s) => s,
            Screen::Cart(s) => s,
            Screen::Receipt(s) => s,
        }
    }
}

impl ScreenBehavior for Screen {
    fn id(&self) -> ScreenId {
        self.behavior().id()
    }

    fn on_enter(&mut self, ctx: &mut KioskContext<'_>) {
        self.behavior_mut().on_enter(ctx)
    }

    fn on_exit(&mut self, ctx: &mut KioskContext<'_>) {
        self.behavior_mut().on_exit(ctx)
    }

    fn update(
        &mut self,
        ctx: &mut KioskContext<'_>,
        cursor: Option<Point2D>,
        now: Seconds,
        dwell_armed: bool,
    ) {
        self.behavior_mut().update(ctx, cursor, now, dwell_armed)
    }

    fn render(&self, ctx: &KioskContext<'_>, surface: &mut dyn Surface) {
        self.behavior().render(ctx, surface)
    }

    fn handle_click(&mut self, ctx: &mut KioskContext<'_>, cursor: Point2D, now: Seconds) -> bool {
        self.behavior_mut().handle_click(ctx, cursor, now)
    }
}

/// The top-left back hotspot shared by the inner screens.
fn back_hotspot() -> Hotspot {
    Hotspot::new(Rect::new(20.0, 20.0, 100.0, 50.0), Icon::BackArrow, theme::SECONDARY)
}

/// Full-screen tinted backdrop.
fn backdrop(surface: &mut dyn Surface, metrics: &ScreenMetrics, tint: Color) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, metrics.width, metrics.height),
        tint,
        0.6,
        0.0,
    );
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub struct Fixture {
        pub nav: ScreenStateMachine,
        pub cart: Cart,
        pub menu: Menu,
        pub billing: BillingPolicy,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                nav: ScreenStateMachine::new(0.5),
                cart: Cart::new(),
                menu: Menu::builtin(),
                billing: BillingPolicy::default(),
            }
        }

        pub fn ctx(&mut self) -> KioskContext<'_> {
            KioskContext {
                nav: &mut self.nav,
                cart: &mut self.cart,
                menu: &self.menu,
                billing: &self.billing,
                metrics: ScreenMetrics {
                    width: 1280.0,
                    height: 720.0,
                    dwell_secs: 0.8,
                },
                wall_time: Local.with_ymd_and_hms(2026, 3, 7, 19, 30, 0).unwrap(),
            }
        }
    }
}
