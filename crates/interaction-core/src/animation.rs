//! Time-driven tween engine.
//!
//! The engine owns every live interpolation and is advanced once per frame
//! with [`AnimationEngine::update`]. Values are plain `f64`s; callers map
//! them onto whatever they animate (offsets, alpha, progress).
//!
//! # Lifecycle
//!
//! 1. [`AnimationEngine::create`] registers a [`Tween`] starting at `now`.
//! 2. Each `update(now)` recomputes the value from elapsed time. When
//!    progress reaches 1 the value snaps to the end value, the animation is
//!    marked completed, and its completion callback fires exactly once.
//! 3. A completed animation stays observable (value == end) until the next
//!    `update`, which sweeps it. After that its handle reports "not found".
//!
//! Completion callbacks run after the value pass and before the sweep, so a
//! callback may create new animations without disturbing the iteration.

use serde::{Deserialize, Serialize};

use airmenu_common::clock::Seconds;

/// Shaping function applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInCubic,
    EaseOutCubic,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] to shaped progress.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Opaque handle to an animation owned by an [`AnimationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Callback fired once when an animation completes. It receives the engine
/// so it can chain follow-up animations.
pub type Completion = Box<dyn FnOnce(&mut AnimationEngine)>;

/// What to interpolate and how.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    /// Length in seconds. Zero completes on the first update.
    pub duration: Seconds,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Seconds) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Value at linear `progress` in [0, 1].
    pub fn value_at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}

/// A single live interpolation.
pub struct Animation {
    id: AnimationId,
    started_at: Seconds,
    tween: Tween,
    value: f64,
    completed: bool,
    /// Engine tick on which the animation completed.
    completed_tick: Option<u64>,
    on_complete: Option<Completion>,
}

impl Animation {
    pub fn id(&self) -> AnimationId {
        self.id
    }

    pub fn started_at(&self) -> Seconds {
        self.started_at
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Last computed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Linear progress in [0, 1] at `now`.
    pub fn progress_at(&self, now: Seconds) -> f64 {
        if self.tween.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.tween.duration).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("started_at", &self.started_at)
            .field("tween", &self.tween)
            .field("value", &self.value)
            .field("completed", &self.completed)
            .field("has_callback", &self.on_complete.is_some())
            .finish()
    }
}

/// Owner of all live animations.
#[derive(Debug, Default)]
pub struct AnimationEngine {
    animations: Vec<Animation>,
    next_id: u64,
    tick: u64,
}

impl AnimationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new animation at `now`. Its value is `tween.from` until the
    /// first update.
    pub fn create(
        &mut self,
        now: Seconds,
        tween: Tween,
        on_complete: Option<Completion>,
    ) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.animations.push(Animation {
            id,
            started_at: now,
            tween,
            value: tween.from,
            completed: false,
            completed_tick: None,
            on_complete,
        });
        id
    }

    /// Advance every live animation to `now`, fire completion callbacks, then
    /// sweep animations that completed on an earlier update.
    pub fn update(&mut self, now: Seconds) {
        self.tick += 1;
        let tick = self.tick;

        let mut finished: Vec<Completion> = Vec::new();
        for anim in self.animations.iter_mut().filter(|a| !a.completed) {
            let progress = anim.progress_at(now);
            if progress >= 1.0 {
                anim.value = anim.tween.to;
                anim.completed = true;
                anim.completed_tick = Some(tick);
                if let Some(callback) = anim.on_complete.take() {
                    finished.push(callback);
                }
            } else {
                anim.value = anim.tween.value_at(progress);
            }
        }

        for callback in finished {
            callback(self);
        }

        self.animations
            .retain(|a| a.completed_tick.map_or(true, |t| t == tick));
    }

    /// Last computed value, or `None` for an unknown or swept handle.
    pub fn value_of(&self, id: AnimationId) -> Option<f64> {
        self.get(id).map(Animation::value)
    }

    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.iter().find(|a| a.id == id)
    }

    /// Whether the animation has finished. Unknown handles count as finished.
    pub fn is_complete(&self, id: AnimationId) -> bool {
        self.get(id).map_or(true, Animation::is_completed)
    }

    /// Drop every animation without firing callbacks.
    pub fn clear_all(&mut self) {
        self.animations.clear();
    }

    /// Number of animations still held (live or awaiting sweep).
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseInCubic,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
        assert_eq!(Easing::EaseInOutCubic.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInCubic.apply(0.5), 0.125);
        assert_eq!(Easing::EaseOutCubic.apply(0.5), 0.875);
    }

    #[test]
    fn test_ease_in_out_derivative_continuous_at_midpoint() {
        let h = 1e-6;
        let f = |t| Easing::EaseInOutCubic.apply(t);
        let left = (f(0.5) - f(0.5 - h)) / h;
        let right = (f(0.5 + h) - f(0.5)) / h;
        // Both halves have slope 3 at the joint.
        assert!((left - 3.0).abs() < 1e-3);
        assert!((right - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_value_snaps_to_end_and_callback_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let mut engine = AnimationEngine::new();
        let counter = fired.clone();
        let id = engine.create(
            0.0,
            Tween::new(0.1, 0.7, 0.3).with_easing(Easing::EaseOutCubic),
            Some(Box::new(move |_| counter.set(counter.get() + 1))),
        );

        engine.update(0.15);
        let mid = engine.value_of(id).unwrap();
        assert!(mid > 0.1 && mid < 0.7);
        assert_eq!(fired.get(), 0);

        engine.update(0.3);
        assert_eq!(engine.value_of(id), Some(0.7));
        assert!(engine.get(id).unwrap().is_completed());
        assert_eq!(fired.get(), 1);

        for i in 0..5 {
            engine.update(1.0 + i as f64);
        }
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_completed_animation_is_swept_on_next_update() {
        let mut engine = AnimationEngine::new();
        let id = engine.create(0.0, Tween::new(0.0, 1.0, 0.5), None);

        engine.update(0.6);
        assert_eq!(engine.value_of(id), Some(1.0));
        assert!(engine.is_complete(id));

        engine.update(0.7);
        assert_eq!(engine.value_of(id), None);
        assert!(engine.is_complete(id));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_unknown_handle_is_not_found() {
        let mut other = AnimationEngine::new();
        let foreign = other.create(0.0, Tween::new(0.0, 1.0, 1.0), None);
        other.create(0.0, Tween::new(0.0, 1.0, 1.0), None);
        let stranger = other.create(0.0, Tween::new(0.0, 1.0, 1.0), None);

        let engine = AnimationEngine::new();
        assert_eq!(engine.value_of(foreign), None);
        assert_eq!(engine.value_of(stranger), None);
    }

    #[test]
    fn test_value_before_first_update_is_start() {
        let mut engine = AnimationEngine::new();
        let id = engine.create(2.0, Tween::new(10.0, 20.0, 1.0), None);
        assert_eq!(engine.value_of(id), Some(10.0));
        engine.update(1.0); // before start: clamped to progress 0
        assert_eq!(engine.value_of(id), Some(10.0));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut engine = AnimationEngine::new();
        let id = engine.create(0.0, Tween::new(3.0, 4.0, 0.0), None);
        engine.update(0.0);
        assert_eq!(engine.value_of(id), Some(4.0));
        assert!(engine.is_complete(id));
    }

    #[test]
    fn test_many_concurrent_animations() {
        let mut engine = AnimationEngine::new();
        let ids: Vec<_> = (1..=50)
            .map(|i| engine.create(0.0, Tween::new(0.0, i as f64, i as f64 * 0.1), None))
            .collect();

        engine.update(2.5);
        for (i, id) in ids.iter().enumerate() {
            let duration = (i + 1) as f64 * 0.1;
            let value = engine.value_of(*id).unwrap();
            if duration <= 2.5 {
                assert_eq!(value, (i + 1) as f64);
            } else {
                assert!(value < (i + 1) as f64);
            }
        }
    }

    #[test]
    fn test_callback_can_chain_new_animation() {
        let chained = Rc::new(Cell::new(None));
        let slot = chained.clone();
        let mut engine = AnimationEngine::new();
        engine.create(
            0.0,
            Tween::new(0.0, 1.0, 0.2),
            Some(Box::new(move |engine: &mut AnimationEngine| {
                slot.set(Some(engine.create(0.2, Tween::new(1.0, 0.0, 0.2), None)));
            })),
        );

        engine.update(0.25);
        let next = chained.get().expect("callback should have run");
        assert_eq!(engine.value_of(next), Some(1.0));
        assert_eq!(engine.len(), 2);

        engine.update(0.3);
        assert_eq!(engine.len(), 1);
        assert!(engine.value_of(next).unwrap() < 1.0);

        engine.update(0.5);
        assert_eq!(engine.value_of(next), Some(0.0));
    }

    #[test]
    fn test_clear_all_drops_callbacks() {
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let mut engine = AnimationEngine::new();
        let id = engine.create(
            0.0,
            Tween::new(0.0, 1.0, 0.1),
            Some(Box::new(move |_| flag.set(true))),
        );
        engine.clear_all();
        engine.update(1.0);
        assert!(!fired.get());
        assert_eq!(engine.value_of(id), None);
    }

    proptest! {
        #[test]
        fn prop_ease_in_out_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(Easing::EaseInOutCubic.apply(lo) <= Easing::EaseInOutCubic.apply(hi));
        }

        #[test]
        fn prop_easing_stays_in_unit_range(t in 0.0f64..=1.0) {
            for easing in [Easing::Linear, Easing::EaseInCubic, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
                let v = easing.apply(t);
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }

        #[test]
        fn prop_ease_in_out_continuous(t in 0.0f64..0.999) {
            let step = 1e-4;
            let delta = Easing::EaseInOutCubic.apply(t + step) - Easing::EaseInOutCubic.apply(t);
            // Max slope of the curve is 3.
            prop_assert!(delta.abs() <= 3.0 * step + 1e-12);
        }

        #[test]
        fn prop_end_value_is_exact(
            from in -1000.0f64..1000.0,
            to in -1000.0f64..1000.0,
            duration in 0.0f64..5.0,
            overshoot in 0.0f64..10.0,
        ) {
            let mut engine = AnimationEngine::new();
            let id = engine.create(1.0, Tween::new(from, to, duration), None);
            engine.update(1.0 + duration + overshoot);
            prop_assert_eq!(engine.value_of(id), Some(to));
        }
    }
}
