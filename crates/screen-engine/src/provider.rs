//! Hand-pose providers.
//!
//! A provider answers "which hands are visible at time `now`". The kiosk loop
//! either polls one directly (headless replay) or receives its frames from a
//! producer task through a bounded channel ([`spawn_provider`]).

use std::path::Path;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use airmenu_common::clock::{FrameClock, Seconds};
use airmenu_common::error::{AirmenuError, AirmenuResult};
use airmenu_kiosk_model::hand::{parse_hand_frames, HandFrame, HandLandmarks};

/// Frames buffered between the producer task and the loop. While the buffer
/// is full, newly produced frames are dropped.
pub const FRAME_CHANNEL_CAPACITY: usize = 4;

/// Trait for hand-pose sources.
pub trait HandPoseProvider: Send {
    /// Hands visible at `now`. An empty list means no hand.
    fn detect(&mut self, now: Seconds) -> AirmenuResult<Vec<HandLandmarks>>;

    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Whether the provider has nothing more to report.
    fn is_exhausted(&self) -> bool;
}

/// Replays a recorded hand script.
///
/// Keyframes use sample-and-hold: a query at `now` returns the hands of the
/// latest keyframe with `t <= now`, or no hand before the first keyframe.
#[derive(Debug, Clone)]
pub struct ScriptedHandProvider {
    name: String,
    frames: Vec<HandFrame>,
    cursor: usize,
    exhausted: bool,
}

impl ScriptedHandProvider {
    pub fn from_frames(name: impl Into<String>, mut frames: Vec<HandFrame>) -> Self {
        frames.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self {
            name: name.into(),
            frames,
            cursor: 0,
            exhausted: false,
        }
    }

    /// Parse a JSONL hand script.
    pub fn from_jsonl(name: impl Into<String>, jsonl: &str) -> AirmenuResult<Self> {
        let frames = parse_hand_frames(jsonl)
            .map_err(|e| AirmenuError::script(e.line, e.source.to_string()))?;
        Ok(Self::from_frames(name, frames))
    }

    /// Load a JSONL hand script from disk.
    pub fn from_path(path: &Path) -> AirmenuResult<Self> {
        if !path.exists() {
            return Err(AirmenuError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "script".to_string());
        let provider = Self::from_jsonl(name, &content)?;
        info!(
            path = %path.display(),
            keyframes = provider.frames.len(),
            duration = provider.duration(),
            "Loaded hand script"
        );
        Ok(provider)
    }

    /// Timestamp of the last keyframe.
    pub fn duration(&self) -> Seconds {
        self.frames.last().map_or(0.0, |f| f.t)
    }

    pub fn keyframes(&self) -> &[HandFrame] {
        &self.frames
    }
}

impl HandPoseProvider for ScriptedHandProvider {
    fn detect(&mut self, now: Seconds) -> AirmenuResult<Vec<HandLandmarks>> {
        if self.frames.get(self.cursor).is_some_and(|f| f.t > now) {
            self.cursor = 0;
        }
        while self
            .frames
            .get(self.cursor + 1)
            .is_some_and(|next| next.t <= now)
        {
            self.cursor += 1;
        }
        self.exhausted = now >= self.duration();

        Ok(match self.frames.get(self.cursor) {
            Some(frame) if frame.t <= now => frame.hands.clone(),
            _ => Vec::new(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Producer side of the provider-to-loop handoff.
pub struct ProviderHandle {
    /// Frames in production order.
    pub frames: mpsc::Receiver<HandFrame>,

    /// Resolves to the number of frames delivered once the provider is
    /// exhausted or the receiver is dropped.
    pub task: JoinHandle<AirmenuResult<u64>>,
}

/// Run `provider` on a producer task, sampling it at `fps` against `clock`.
///
/// Non-acquisition errors are logged and the frame is skipped. Acquisition
/// failures end the task with that error.
pub fn spawn_provider<P>(mut provider: P, fps: u32, clock: FrameClock) -> ProviderHandle
where
    P: HandPoseProvider + 'static,
{
    let (tx, rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
    let period = std::time::Duration::from_secs_f64(1.0 / fps.max(1) as f64);

    let task = tokio::spawn(async move {
        info!(provider = %provider.name(), fps, "Hand-pose provider started");
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut delivered = 0u64;

        loop {
            interval.tick().await;
            let now = clock.now();
            let hands = match provider.detect(now) {
                Ok(hands) => hands,
                Err(e) if e.is_acquisition_failure() => {
                    error!(provider = %provider.name(), error = %e, "Hand-pose provider failed");
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, "Hand-pose detection failed");
                    continue;
                }
            };

            match tx.try_send(HandFrame { t: now, hands }) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    trace!(t = now, "Frame channel full, dropping frame");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    debug!("Frame receiver dropped");
                    break;
                }
            }

            if provider.is_exhausted() {
                break;
            }
        }

        info!(provider = %provider.name(), delivered, "Hand-pose provider stopped");
        Ok(delivered)
    });

    ProviderHandle { frames: rx, task }
}
