//! Fingertip cursor smoothing.
//!
//! A streaming filter: each raw pixel-space position is folded into the
//! previous smoothed position. A deadband holds the cursor still while the
//! hand trembles in place.

use airmenu_common::config::GestureConfig;
use airmenu_kiosk_model::geometry::Point2D;

/// Available smoothing algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingAlgorithm {
    /// Exponential moving average.
    ///
    /// `alpha` is in (0.0, 1.0]; larger values follow the raw input more
    /// closely. `smoothed = alpha * raw + (1 - alpha) * previous`.
    Ema { alpha: f64 },

    /// Pass raw positions through (the deadband still applies).
    None,
}

/// Streaming cursor smoother with a jitter deadband.
#[derive(Debug, Clone)]
pub struct CursorSmoother {
    algorithm: SmoothingAlgorithm,
    jitter_threshold: f64,
    previous: Option<Point2D>,
}

impl CursorSmoother {
    pub fn new(algorithm: SmoothingAlgorithm, jitter_threshold: f64) -> Self {
        Self {
            algorithm,
            jitter_threshold: jitter_threshold.max(0.0),
            previous: None,
        }
    }

    /// EMA smoother using the gesture configuration.
    pub fn from_config(config: &GestureConfig) -> Self {
        Self::new(
            SmoothingAlgorithm::Ema {
                alpha: config.smoothing_factor.clamp(f64::EPSILON, 1.0),
            },
            config.jitter_threshold_px,
        )
    }

    /// Fold a raw position into the filter and return the new smoothed
    /// position.
    ///
    /// The first sample after a reset is returned unchanged. Afterwards, a
    /// candidate whose offset from the previous output is below the jitter
    /// threshold on both axes is discarded and the previous output is held.
    pub fn push(&mut self, raw: Point2D) -> Point2D {
        let Some(prev) = self.previous else {
            self.previous = Some(raw);
            return raw;
        };

        let candidate = match self.algorithm {
            SmoothingAlgorithm::Ema { alpha } => Point2D::new(
                alpha * raw.x + (1.0 - alpha) * prev.x,
                alpha * raw.y + (1.0 - alpha) * prev.y,
            ),
            SmoothingAlgorithm::None => raw,
        };

        let dx = (candidate.x - prev.x).abs();
        let dy = (candidate.y - prev.y).abs();
        if dx < self.jitter_threshold && dy < self.jitter_threshold {
            return prev;
        }

        self.previous = Some(candidate);
        candidate
    }

    /// Forget history; the next sample is taken as-is.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Last smoothed output, if any.
    pub fn previous(&self) -> Option<Point2D> {
        self.previous
    }

    pub fn algorithm(&self) -> SmoothingAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jittery_path() -> Vec<Point2D> {
        // Hovering around (640, 360) with a few pixels of tremor.
        vec![
            Point2D::new(640.0, 360.0),
            Point2D::new(643.0, 358.0),
            Point2D::new(638.0, 362.0),
            Point2D::new(642.0, 359.0),
            Point2D::new(639.0, 361.0),
        ]
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha: 0.7 }, 5.0);
        let out = smoother.push(Point2D::new(100.0, 200.0));
        assert_eq!(out, Point2D::new(100.0, 200.0));
    }

    #[test]
    fn test_deadband_holds_tremor() {
        let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha: 0.7 }, 5.0);
        for p in jittery_path() {
            assert_eq!(smoother.push(p), Point2D::new(640.0, 360.0));
        }
    }

    #[test]
    fn test_ema_moves_toward_target() {
        let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha: 0.7 }, 5.0);
        smoother.push(Point2D::new(0.0, 0.0));
        let out = smoother.push(Point2D::new(100.0, 0.0));
        assert!((out.x - 70.0).abs() < 1e-9);
        assert_eq!(out.y, 0.0);

        let out = smoother.push(Point2D::new(100.0, 0.0));
        assert!((out.x - 91.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_axis_motion_beats_deadband() {
        let mut smoother = CursorSmoother::new(SmoothingAlgorithm::None, 5.0);
        smoother.push(Point2D::new(0.0, 0.0));
        // dy is tiny but dx is not, so the move is accepted.
        let out = smoother.push(Point2D::new(20.0, 1.0));
        assert_eq!(out, Point2D::new(20.0, 1.0));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha: 0.5 }, 5.0);
        smoother.push(Point2D::new(0.0, 0.0));
        smoother.reset();
        assert!(smoother.previous().is_none());
        assert_eq!(
            smoother.push(Point2D::new(500.0, 500.0)),
            Point2D::new(500.0, 500.0)
        );
    }

    #[test]
    fn test_from_config_uses_alpha() {
        let smoother = CursorSmoother::from_config(&GestureConfig::default());
        assert_eq!(smoother.algorithm(), SmoothingAlgorithm::Ema { alpha: 0.7 });
    }

    proptest! {
        #[test]
        fn prop_tremor_inside_deadband_is_held(
            alpha in 0.05f64..=1.0,
            dx in -4.9f64..4.9,
            dy in -4.9f64..4.9,
        ) {
            let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha }, 5.0);
            let anchor = Point2D::new(400.0, 300.0);
            smoother.push(anchor);
            prop_assert_eq!(smoother.push(Point2D::new(400.0 + dx, 300.0 + dy)), anchor);
        }

        #[test]
        fn prop_output_stays_between_previous_and_raw(
            alpha in 0.05f64..=1.0,
            x in 0.0f64..1280.0,
            y in 0.0f64..720.0,
        ) {
            let mut smoother = CursorSmoother::new(SmoothingAlgorithm::Ema { alpha }, 5.0);
            smoother.push(Point2D::new(640.0, 360.0));
            let out = smoother.push(Point2D::new(x, y));
            prop_assert!(out.x >= x.min(640.0) - 1e-9 && out.x <= x.max(640.0) + 1e-9);
            prop_assert!(out.y >= y.min(360.0) - 1e-9 && out.y <= y.max(360.0) + 1e-9);
        }
    }
}
