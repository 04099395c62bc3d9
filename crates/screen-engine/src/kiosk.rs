//! The per-frame interaction loop.
//!
//! One [`Kiosk::tick`] is one frame: apply the optional command, turn the
//! input into a cursor and a click, advance the screen state machine, swap
//! the active screen when navigation moved, update and render it, then
//! dispatch at most one click.

use chrono::{DateTime, Local};
use tracing::{debug, error, info, warn};

use airmenu_common::clock::{FpsCounter, Seconds};
use airmenu_common::config::AppConfig;
use airmenu_common::error::AirmenuResult;
use airmenu_interaction_core::gesture::GestureProcessor;
use airmenu_interaction_core::navigation::{ScreenId, ScreenStateMachine};
use airmenu_kiosk_model::billing::{BillingPolicy, Receipt};
use airmenu_kiosk_model::cart::Cart;
use airmenu_kiosk_model::geometry::{Point2D, Rect};
use airmenu_kiosk_model::hand::HandLandmarks;
use airmenu_kiosk_model::menu::Menu;

use crate::provider::HandPoseProvider;
use crate::screens::{KioskContext, Screen, ScreenBehavior, ScreenMetrics};
use crate::surface::{Color, DrawList, Surface, TextSize, TextStyle};
use crate::theme;

/// Where this frame's cursor comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Hands reported by the hand-pose provider; the first one drives the
    /// cursor. An empty list means no hand.
    Hands(Vec<HandLandmarks>),

    /// Mouse-style pointer. A press edge counts as a click.
    Pointer {
        position: Option<Point2D>,
        pressed: bool,
    },
}

/// Operator commands outside the gesture path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskCommand {
    /// Abandon the order and return to Home.
    Reset,
    /// Stop the loop.
    Quit,
}

/// Everything the loop consumes for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInput {
    pub now: Seconds,
    pub source: InputSource,
    pub command: Option<KioskCommand>,
}

impl FrameInput {
    pub fn hands(now: Seconds, hands: Vec<HandLandmarks>) -> Self {
        Self {
            now,
            source: InputSource::Hands(hands),
            command: None,
        }
    }

    pub fn pointer(now: Seconds, position: Option<Point2D>, pressed: bool) -> Self {
        Self {
            now,
            source: InputSource::Pointer { position, pressed },
            command: None,
        }
    }

    pub fn with_command(mut self, command: KioskCommand) -> Self {
        self.command = Some(command);
        self
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Current screen after the frame.
    pub screen: ScreenId,
    pub cursor: Option<Point2D>,
    pub pinching: bool,
    /// A click passed the cooldown gate and was dispatched.
    pub clicked: bool,
    pub transition_progress: f64,
    pub quit: bool,
}

/// Outcome of [`Kiosk::replay`].
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub frames: u64,
    pub clicks: u64,
    /// Screens in the order they became current, with the frame time.
    pub visited: Vec<(Seconds, ScreenId)>,
    /// Receipts shown during the run.
    pub receipts: Vec<Receipt>,
    pub final_screen: ScreenId,
    pub quit: bool,
}

/// Billing policy described by the `billing` config section.
pub fn billing_policy(config: &AppConfig) -> BillingPolicy {
    BillingPolicy {
        gst_rate: config.billing.gst_rate,
        restaurant_name: config.billing.restaurant_name.clone(),
        currency_symbol: config.billing.currency_symbol.clone(),
    }
}

/// The kiosk: collaborators, interaction state and the active screen.
pub struct Kiosk {
    config: AppConfig,
    menu: Menu,
    billing: BillingPolicy,
    cart: Cart,
    nav: ScreenStateMachine,
    gesture: GestureProcessor,
    screen: Screen,
    metrics: ScreenMetrics,
    started_at: DateTime<Local>,
    fps: FpsCounter,
    hand_present: bool,
    pointer_down: bool,
    frames: u64,
}

impl Kiosk {
    /// `started_at` is the wall-clock time of `now == 0`.
    pub fn new(config: AppConfig, menu: Menu, started_at: DateTime<Local>) -> Self {
        let billing = billing_policy(&config);
        let metrics = ScreenMetrics {
            width: config.display.width as f64,
            height: config.display.height as f64,
            dwell_secs: config.interaction.dwell_secs,
        };
        let gesture = GestureProcessor::new(
            config.gesture.clone(),
            config.display.width,
            config.display.height,
        );

        let mut nav = ScreenStateMachine::new(config.interaction.transition_secs);
        let mut cart = Cart::new();
        let screen = {
            let mut ctx = KioskContext {
                nav: &mut nav,
                cart: &mut cart,
                menu: &menu,
                billing: &billing,
                metrics,
                wall_time: started_at,
            };
            let mut screen = Screen::build(ScreenId::Home, &ctx);
            screen.on_enter(&mut ctx);
            screen
        };

        info!(
            width = config.display.width,
            height = config.display.height,
            categories = menu.categories().len(),
            items = menu.items.len(),
            "Kiosk ready"
        );

        Self {
            config,
            menu,
            billing,
            cart,
            nav,
            gesture,
            screen,
            metrics,
            started_at,
            fps: FpsCounter::new(),
            hand_present: false,
            pointer_down: false,
            frames: 0,
        }
    }

    /// Run one frame, drawing it onto `surface`.
    pub fn tick(&mut self, input: FrameInput, surface: &mut dyn Surface) -> FrameReport {
        let now = input.now;

        match input.command {
            Some(KioskCommand::Quit) => {
                info!(frames = self.frames, "Quit requested");
                return FrameReport {
                    screen: self.nav.current(),
                    cursor: None,
                    pinching: false,
                    clicked: false,
                    transition_progress: self.nav.transition_progress(),
                    quit: true,
                };
            }
            Some(KioskCommand::Reset) => {
                info!("Operator reset");
                self.nav.reset();
                self.cart.clear();
            }
            None => {}
        }

        let show_hand_status = matches!(input.source, InputSource::Hands(_));
        let (cursor, pinching, press_edge) = self.read_input(input.source);
        let click = press_edge && cursor.is_some() && self.accept_click(now);

        self.nav.update(now);

        let wall_time = self.wall_time(now);
        let mut ctx = KioskContext {
            nav: &mut self.nav,
            cart: &mut self.cart,
            menu: &self.menu,
            billing: &self.billing,
            metrics: self.metrics,
            wall_time,
        };

        let target = ctx.nav.current();
        if self.screen.id() != target {
            debug!(from = %self.screen.id(), to = %target, "Swapping active screen");
            self.screen.on_exit(&mut ctx);
            let mut next = Screen::build(target, &ctx);
            next.on_enter(&mut ctx);
            self.screen = next;
        }

        self.screen.update(&mut ctx, cursor, now, !click);
        self.screen.render(&ctx, surface);

        if ctx.nav.is_transitioning() {
            let fade = (1.0 - ctx.nav.transition_progress()).clamp(0.0, 1.0);
            surface.fill_rect(
                Rect::new(0.0, 0.0, self.metrics.width, self.metrics.height),
                Color::rgb(0, 0, 0),
                fade,
                0.0,
            );
        }

        if let (true, Some(point)) = (click, cursor) {
            let handled = self.screen.handle_click(&mut ctx, point, now);
            debug!(x = point.x, y = point.y, handled, "Click dispatched");
        }

        self.fps.tick(now);
        self.frames += 1;
        self.render_overlays(surface, cursor, pinching, show_hand_status);

        FrameReport {
            screen: self.nav.current(),
            cursor,
            pinching,
            clicked: click,
            transition_progress: self.nav.transition_progress(),
            quit: false,
        }
    }

    /// Drive the loop from `provider` at the configured frame rate until the
    /// provider is exhausted, recording onto a headless surface.
    ///
    /// Provider errors other than acquisition failures are logged and the
    /// frame is treated as having no hand.
    pub fn replay<P>(&mut self, provider: &mut P) -> AirmenuResult<ReplaySummary>
    where
        P: HandPoseProvider + ?Sized,
    {
        let fps = self.config.display.fps.max(1) as f64;
        let mut surface = DrawList::new(self.config.display.width, self.config.display.height);
        let mut summary = ReplaySummary {
            visited: vec![(0.0, self.nav.current())],
            final_screen: self.nav.current(),
            ..ReplaySummary::default()
        };

        info!(provider = %provider.name(), fps = self.config.display.fps, "Replay started");
        loop {
            let now = summary.frames as f64 / fps;
            let hands = match provider.detect(now) {
                Ok(hands) => hands,
                Err(e) if e.is_acquisition_failure() => {
                    error!(error = %e, t = now, "Hand-pose provider failed");
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, t = now, "Hand-pose detection failed");
                    Vec::new()
                }
            };

            surface.clear();
            let report = self.tick(FrameInput::hands(now, hands), &mut surface);
            summary.frames += 1;
            if report.clicked {
                summary.clicks += 1;
            }
            if summary.visited.last().map(|(_, s)| *s) != Some(report.screen) {
                summary.visited.push((now, report.screen));
                if report.screen == ScreenId::Receipt {
                    summary.receipts.extend(self.nav.receipt().cloned());
                }
            }
            if report.quit {
                summary.quit = true;
                break;
            }
            if provider.is_exhausted() {
                break;
            }
        }

        summary.final_screen = self.nav.current();
        info!(
            frames = summary.frames,
            clicks = summary.clicks,
            screens = summary.visited.len(),
            final_screen = %summary.final_screen,
            "Replay finished"
        );
        Ok(summary)
    }

    fn read_input(&mut self, source: InputSource) -> (Option<Point2D>, bool, bool) {
        match source {
            InputSource::Hands(hands) => {
                let sample = self.gesture.process(hands.first());
                let present = sample.hand_present();
                if present != self.hand_present {
                    self.hand_present = present;
                    if present {
                        debug!(cursor = ?sample.cursor, "Hand acquired");
                    } else {
                        debug!("Hand lost");
                    }
                }
                (sample.cursor, sample.pinching, sample.pinch_started)
            }
            InputSource::Pointer { position, pressed } => {
                let edge = pressed && !self.pointer_down;
                self.pointer_down = pressed;
                (position, pressed, edge)
            }
        }
    }

    fn accept_click(&mut self, now: Seconds) -> bool {
        if self.gesture.try_accept_interaction(now) {
            debug!(t = now, "Pinch accepted");
            true
        } else {
            debug!(t = now, "Pinch ignored during cooldown");
            false
        }
    }

    fn wall_time(&self, now: Seconds) -> DateTime<Local> {
        self.started_at + chrono::Duration::milliseconds((now * 1000.0) as i64)
    }

    fn render_overlays(
        &self,
        surface: &mut dyn Surface,
        cursor: Option<Point2D>,
        pinching: bool,
        show_hand_status: bool,
    ) {
        let display = &self.config.display;

        if let (true, Some(c)) = (display.show_cursor, cursor) {
            surface.circle(c, theme::CURSOR_RADIUS + 10.0, theme::PRIMARY, Some(2.0));
            surface.circle(c, theme::CURSOR_RADIUS + 5.0, theme::PRIMARY, Some(2.0));
            surface.circle(c, theme::CURSOR_RADIUS, theme::PRIMARY, None);
            surface.circle(c, 5.0, theme::TEXT, None);
            if pinching {
                surface.circle(c, theme::CURSOR_RADIUS + 15.0, theme::SUCCESS, Some(3.0));
            }
        }

        if display.show_fps {
            let fps = self.fps.fps();
            let color = if fps >= theme::FPS_WARN_BELOW {
                theme::SUCCESS
            } else {
                theme::WARNING
            };
            surface.text(
                &format!("FPS: {fps:.1}"),
                Point2D::new(10.0, self.metrics.height - 20.0),
                TextStyle::new(color, TextSize::Tiny),
            );
        }

        if display.show_hand_status && show_hand_status {
            let (label, color) = if self.hand_present {
                ("Hand Detected", theme::SUCCESS)
            } else {
                ("No Hand", theme::ERROR)
            };
            surface.text(
                label,
                Point2D::new(10.0, 30.0),
                TextStyle::new(color, TextSize::Tiny),
            );
        }
    }

    pub fn current_screen(&self) -> ScreenId {
        self.nav.current()
    }

    /// The screen instance currently driving input and rendering.
    pub fn active_screen(&self) -> ScreenId {
        self.screen.id()
    }

    pub fn navigation(&self) -> &ScreenStateMachine {
        &self.nav
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kiosk() -> Kiosk {
        let started_at = Local.with_ymd_and_hms(2026, 3, 7, 19, 30, 0).unwrap();
        Kiosk::new(AppConfig::default(), Menu::builtin(), started_at)
    }

    fn run_pointer(
        kiosk: &mut Kiosk,
        from: Seconds,
        frames: usize,
        position: Point2D,
        pressed: bool,
    ) -> FrameReport {
        let mut surface = DrawList::new(1280, 720);
        let mut report = None;
        for i in 0..frames {
            surface.clear();
            let now = from + i as f64 / 30.0;
            report = Some(kiosk.tick(FrameInput::pointer(now, Some(position), pressed), &mut surface));
        }
        report.unwrap()
    }

    #[test]
    fn test_pointer_press_edge_clicks_once() {
        let mut kiosk = kiosk();
        let start = Point2D::new(640.0, 440.0);
        let mut surface = DrawList::new(1280, 720);

        let report = kiosk.tick(FrameInput::pointer(0.0, Some(start), true), &mut surface);
        assert!(report.clicked);
        assert_eq!(report.screen, ScreenId::Category);

        let report = kiosk.tick(FrameInput::pointer(0.5, Some(start), true), &mut surface);
        assert!(!report.clicked);
    }

    #[test]
    fn test_press_inside_cooldown_is_not_a_click() {
        let mut kiosk = kiosk();
        let card = Point2D::new(500.0, 240.0);
        let mut surface = DrawList::new(1280, 720);

        kiosk.tick(
            FrameInput::pointer(0.0, Some(Point2D::new(640.0, 440.0)), true),
            &mut surface,
        );
        kiosk.tick(FrameInput::pointer(0.1, Some(card), false), &mut surface);

        let early = kiosk.tick(FrameInput::pointer(0.2, Some(card), true), &mut surface);
        assert!(!early.clicked);
        assert_eq!(early.screen, ScreenId::Category);

        kiosk.tick(FrameInput::pointer(0.3, Some(card), false), &mut surface);
        let late = kiosk.tick(FrameInput::pointer(0.4, Some(card), true), &mut surface);
        assert!(late.clicked);
        assert_eq!(late.screen, ScreenId::Items);
        assert_eq!(
            kiosk.navigation().selected_category().map(|c| c.id.as_str()),
            Some("starters")
        );
    }

    #[test]
    fn test_screen_swaps_on_following_frame() {
        let mut kiosk = kiosk();
        let mut surface = DrawList::new(1280, 720);
        kiosk.tick(
            FrameInput::pointer(0.0, Some(Point2D::new(640.0, 440.0)), true),
            &mut surface,
        );
        assert_eq!(kiosk.current_screen(), ScreenId::Category);
        assert_eq!(kiosk.active_screen(), ScreenId::Home);

        surface.clear();
        kiosk.tick(FrameInput::pointer(0.1, None, false), &mut surface);
        assert_eq!(kiosk.active_screen(), ScreenId::Category);
        assert!(surface.contains_text("Select Category"));
    }

    #[test]
    fn test_transition_fades_in() {
        let mut kiosk = kiosk();
        run_pointer(&mut kiosk, 0.0, 1, Point2D::new(640.0, 440.0), true);
        let mid = run_pointer(&mut kiosk, 0.25, 1, Point2D::new(10.0, 10.0), false);
        assert!(mid.transition_progress > 0.0 && mid.transition_progress < 1.0);

        let done = run_pointer(&mut kiosk, 0.5, 1, Point2D::new(10.0, 10.0), false);
        assert_eq!(done.transition_progress, 1.0);
        assert!(!kiosk.navigation().is_transitioning());

        let after = run_pointer(&mut kiosk, 0.6, 1, Point2D::new(10.0, 10.0), false);
        assert_eq!(after.transition_progress, 0.0);
    }

    #[test]
    fn test_reset_command_clears_order() {
        let mut kiosk = kiosk();
        let mut surface = DrawList::new(1280, 720);
        kiosk.tick(
            FrameInput::pointer(0.0, Some(Point2D::new(640.0, 440.0)), true),
            &mut surface,
        );
        let report = kiosk.tick(
            FrameInput::pointer(1.0, None, false).with_command(KioskCommand::Reset),
            &mut surface,
        );
        assert_eq!(report.screen, ScreenId::Home);
        assert!(kiosk.navigation().history().is_empty());
        assert!(kiosk.cart().is_empty());
    }

    #[test]
    fn test_quit_command() {
        let mut kiosk = kiosk();
        let mut surface = DrawList::new(1280, 720);
        let report = kiosk.tick(
            FrameInput::pointer(0.0, None, false).with_command(KioskCommand::Quit),
            &mut surface,
        );
        assert!(report.quit);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_overlays() {
        let mut kiosk = kiosk();
        let mut surface = DrawList::new(1280, 720);
        kiosk.tick(FrameInput::hands(0.0, vec![]), &mut surface);
        assert!(surface.contains_text("No Hand"));
        assert!(surface.contains_text("FPS: 0.0"));

        surface.clear();
        kiosk.tick(
            FrameInput::pointer(0.1, Some(Point2D::new(100.0, 100.0)), false),
            &mut surface,
        );
        assert!(!surface.contains_text("No Hand"));
        let circles = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, crate::surface::DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 4);
    }
}
