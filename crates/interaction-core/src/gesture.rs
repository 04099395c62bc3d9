//! Gesture signal processing.
//!
//! Turns the primary hand's landmarks into a smoothed on-screen cursor and a
//! pinch signal, and gates pinch "clicks" with a cooldown so one physical
//! pinch cannot register twice.

use tracing::trace;

use airmenu_common::clock::Seconds;
use airmenu_common::config::GestureConfig;
use airmenu_kiosk_model::geometry::Point2D;
use airmenu_kiosk_model::hand::HandLandmarks;

use crate::smoothing::CursorSmoother;

/// Per-frame output of [`GestureProcessor::process`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    /// Index fingertip in frame pixels before smoothing.
    pub raw: Option<Point2D>,

    /// Smoothed cursor; `None` when no hand is present.
    pub cursor: Option<Point2D>,

    /// Whether the thumb and index tips are currently closed.
    pub pinching: bool,

    /// True only on the frame where `pinching` went from false to true.
    pub pinch_started: bool,
}

impl GestureSample {
    pub fn hand_present(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Stateful landmark-to-cursor pipeline.
#[derive(Debug, Clone)]
pub struct GestureProcessor {
    config: GestureConfig,
    frame_width: u32,
    frame_height: u32,
    smoother: CursorSmoother,
    pinching: bool,
    last_interaction: Option<Seconds>,
}

impl GestureProcessor {
    /// `frame_width` x `frame_height` is the pixel size landmarks are scaled to.
    pub fn new(config: GestureConfig, frame_width: u32, frame_height: u32) -> Self {
        Self {
            smoother: CursorSmoother::from_config(&config),
            config,
            frame_width,
            frame_height,
            pinching: false,
            last_interaction: None,
        }
    }

    /// Process one frame's primary hand (or its absence).
    ///
    /// No hand, or a hand missing the thumb or index tip, clears the cursor,
    /// resets smoothing and forces the pinch state to false.
    pub fn process(&mut self, hand: Option<&HandLandmarks>) -> GestureSample {
        let tips = hand.and_then(|h| match (h.thumb_tip(), h.index_tip()) {
            (Some(thumb), Some(index)) => Some((thumb, index)),
            _ => {
                trace!(landmarks = h.len(), "Hand is missing fingertip landmarks");
                None
            }
        });

        let Some((thumb, index)) = tips else {
            self.smoother.reset();
            self.pinching = false;
            return GestureSample::default();
        };

        let raw = index.to_pixels(self.frame_width, self.frame_height);
        let cursor = self.smoother.push(raw);

        let pinching = thumb.distance_to(&index) < self.config.pinch_threshold;
        let pinch_started = pinching && !self.pinching;
        self.pinching = pinching;

        GestureSample {
            raw: Some(raw),
            cursor: Some(cursor),
            pinching,
            pinch_started,
        }
    }

    /// Whether enough time has passed since the last accepted interaction.
    /// Always true before the first one.
    pub fn cooldown_elapsed(&self, now: Seconds) -> bool {
        self.last_interaction
            .map_or(true, |last| now - last >= self.config.interaction_cooldown_secs)
    }

    /// Record an accepted interaction at `now`.
    pub fn mark_interaction(&mut self, now: Seconds) {
        self.last_interaction = Some(now);
    }

    /// Accept an interaction if the cooldown has elapsed, recording it.
    pub fn try_accept_interaction(&mut self, now: Seconds) -> bool {
        if self.cooldown_elapsed(now) {
            self.mark_interaction(now);
            true
        } else {
            false
        }
    }

    pub fn last_interaction(&self) -> Option<Seconds> {
        self.last_interaction
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}
