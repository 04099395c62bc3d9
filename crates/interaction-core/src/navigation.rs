//! Screen state machine.
//!
//! Owns which screen is active, the back-history, the data carried between
//! screens, and the single transition animation that screens read to draw
//! enter/exit motion.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use airmenu_common::clock::Seconds;
use airmenu_kiosk_model::billing::Receipt;
use airmenu_kiosk_model::menu::Category;

use crate::animation::{AnimationEngine, AnimationId, Easing, Tween};

/// The closed set of kiosk screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreenId {
    #[default]
    Home,
    Category,
    Items,
    Cart,
    Receipt,
}

impl ScreenId {
    pub const ALL: [ScreenId; 5] = [
        ScreenId::Home,
        ScreenId::Category,
        ScreenId::Items,
        ScreenId::Cart,
        ScreenId::Receipt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScreenId::Home => "home",
            ScreenId::Category => "category",
            ScreenId::Items => "items",
            ScreenId::Cart => "cart",
            ScreenId::Receipt => "receipt",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data handed to the target screen. Present fields overwrite the stored
/// cross-screen data; absent fields leave it untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionPayload {
    pub category: Option<Category>,
    pub receipt: Option<Receipt>,
}

impl TransitionPayload {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            receipt: None,
        }
    }

    pub fn receipt(receipt: Receipt) -> Self {
        Self {
            category: None,
            receipt: Some(receipt),
        }
    }
}

/// Cross-screen data accumulated from transition payloads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenData {
    pub selected_category: Option<Category>,
    pub receipt: Option<Receipt>,
}

impl ScreenData {
    fn merge(&mut self, payload: TransitionPayload) {
        if let Some(category) = payload.category {
            self.selected_category = Some(category);
        }
        if let Some(receipt) = payload.receipt {
            self.receipt = Some(receipt);
        }
    }
}

/// Current screen, back-history and transition progress.
///
/// Invariants:
/// - history only grows in [`transition_to`](Self::transition_to) and only
///   shrinks in [`go_back`](Self::go_back); [`reset`](Self::reset) clears it
///   together with the current screen.
/// - at most one transition animation is alive at a time.
pub struct ScreenStateMachine {
    current: ScreenId,
    previous: Option<ScreenId>,
    history: Vec<ScreenId>,
    data: ScreenData,

    animator: AnimationEngine,
    transition: Option<AnimationId>,
    transitioning: Rc<Cell<bool>>,
    transition_progress: f64,
    transition_secs: Seconds,

    /// Timestamp of the most recent update; new transitions start here.
    now: Seconds,
}

impl ScreenStateMachine {
    pub fn new(transition_secs: Seconds) -> Self {
        Self {
            current: ScreenId::Home,
            previous: None,
            history: Vec::new(),
            data: ScreenData::default(),
            animator: AnimationEngine::new(),
            transition: None,
            transitioning: Rc::new(Cell::new(false)),
            transition_progress: 0.0,
            transition_secs,
            now: 0.0,
        }
    }

    /// Navigate forward to `target`. Returns false (and does nothing) when
    /// `target` is already current.
    pub fn transition_to(&mut self, target: ScreenId, payload: TransitionPayload) -> bool {
        if target == self.current {
            debug!(screen = %target, "Ignoring transition to current screen");
            return false;
        }

        info!(from = %self.current, to = %target, "Screen transition");
        self.history.push(self.current);
        self.previous = Some(self.current);
        self.current = target;
        self.data.merge(payload);
        self.start_transition();
        true
    }

    /// Return to the most recent history entry. Returns false when history
    /// is empty. Cross-screen data is not restored.
    pub fn go_back(&mut self) -> bool {
        let Some(target) = self.history.pop() else {
            debug!(screen = %self.current, "Back requested with empty history");
            return false;
        };

        info!(from = %self.current, to = %target, "Screen back");
        self.previous = Some(self.current);
        self.current = target;
        self.start_transition();
        true
    }

    /// Return to Home with empty history and no cross-screen data. Any
    /// in-flight transition is dropped without completing.
    pub fn reset(&mut self) {
        info!(from = %self.current, "Screen state reset");
        self.animator.clear_all();
        self.transition = None;
        self.transitioning.set(false);
        self.transition_progress = 0.0;
        self.current = ScreenId::Home;
        self.previous = None;
        self.history.clear();
        self.data = ScreenData::default();
    }

    /// Advance the transition animation and republish its progress.
    pub fn update(&mut self, now: Seconds) {
        self.now = now;
        self.animator.update(now);

        self.transition_progress = match self.transition {
            Some(id) => match self.animator.value_of(id) {
                Some(value) => value,
                None => {
                    self.transition = None;
                    0.0
                }
            },
            None => 0.0,
        };
    }

    fn start_transition(&mut self) {
        self.animator.clear_all();
        self.transitioning.set(true);
        self.transition_progress = 0.0;

        let flag = Rc::clone(&self.transitioning);
        let id = self.animator.create(
            self.now,
            Tween::new(0.0, 1.0, self.transition_secs).with_easing(Easing::EaseInOutCubic),
            Some(Box::new(move |_| flag.set(false))),
        );
        self.transition = Some(id);
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn previous(&self) -> Option<ScreenId> {
        self.previous
    }

    pub fn history(&self) -> &[ScreenId] {
        &self.history
    }

    pub fn data(&self) -> &ScreenData {
        &self.data
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.data.selected_category.as_ref()
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.data.receipt.as_ref()
    }

    /// Whether a transition animation is still running.
    pub fn is_transitioning(&self) -> bool {
        self.transitioning.get()
    }

    /// Eased transition progress in [0, 1]; 0 when no transition is alive.
    pub fn transition_progress(&self) -> f64 {
        self.transition_progress
    }

    pub fn transition_secs(&self) -> Seconds {
        self.transition_secs
    }
}

impl fmt::Debug for ScreenStateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenStateMachine")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("history", &self.history)
            .field("transitioning", &self.transitioning.get())
            .field("transition_progress", &self.transition_progress)
            .finish()
    }
}
