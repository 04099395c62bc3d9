//! Hand-pose data as delivered by the external landmark provider.
//!
//! A provider reports zero or more hands per camera frame. Each hand is the
//! 21-point landmark layout used by common hand-pose models; the kiosk only
//! reads the thumb tip and the index fingertip. Coordinates are normalized to
//! `[0.0, 1.0]` relative to the camera frame.
//!
//! Recorded or hand-authored sessions are stored as JSONL, one [`HandFrame`]
//! per line, so they can be replayed through the interaction loop.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;

/// Landmark index of the thumb tip.
pub const THUMB_TIP: usize = 4;

/// Landmark index of the index fingertip.
pub const INDEX_TIP: usize = 8;

/// Number of landmarks in a full hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// A single normalized landmark. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in normalized space.
    pub fn distance_to(&self, other: &Landmark) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Scale to pixel coordinates of a `width` x `height` frame.
    pub fn to_pixels(&self, width: u32, height: u32) -> Point2D {
        Point2D::new(self.x * width as f64, self.y * height as f64)
    }
}

impl From<[f64; 2]> for Landmark {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Landmark> for [f64; 2] {
    fn from(l: Landmark) -> Self {
        [l.x, l.y]
    }
}

/// One detected hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Build a full skeleton where only the thumb tip and index fingertip
    /// carry meaningful positions; the remaining joints sit at the midpoint.
    pub fn from_tips(thumb: Landmark, index: Landmark) -> Self {
        let mid = Landmark::new((thumb.x + index.x) / 2.0, (thumb.y + index.y) / 2.0);
        let mut points = vec![mid; LANDMARK_COUNT];
        points[THUMB_TIP] = thumb;
        points[INDEX_TIP] = index;
        Self { points }
    }

    /// Landmark by index, if the provider reported it.
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    pub fn thumb_tip(&self) -> Option<Landmark> {
        self.get(THUMB_TIP)
    }

    pub fn index_tip(&self) -> Option<Landmark> {
        self.get(INDEX_TIP)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One provider result: the hands seen at time `t`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Seconds since the session started.
    pub t: f64,

    /// Detected hands; empty means "no hand".
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

impl HandFrame {
    pub fn no_hand(t: f64) -> Self {
        Self { t, hands: vec![] }
    }

    pub fn with_hand(t: f64, hand: HandLandmarks) -> Self {
        Self {
            t,
            hands: vec![hand],
        }
    }

    /// The hand the kiosk follows (the first one reported).
    pub fn primary(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}

/// A hand-frame script line that failed to parse.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptParseError {
    /// 1-based line number.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse hand frames from JSONL content (one JSON object per line).
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_hand_frames(jsonl: &str) -> Result<Vec<HandFrame>, ScriptParseError> {
    jsonl
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            serde_json::from_str(content).map_err(|source| ScriptParseError { line, source })
        })
        .collect()
}

/// Serialize hand frames to JSONL format.
pub fn serialize_hand_frames(frames: &[HandFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_serializes_as_pair() {
        let json = serde_json::to_string(&Landmark::new(0.25, 0.5)).unwrap();
        assert_eq!(json, "[0.25,0.5]");
    }

    #[test]
    fn test_from_tips_places_thumb_and_index() {
        let hand = HandLandmarks::from_tips(Landmark::new(0.1, 0.2), Landmark::new(0.3, 0.4));
        assert_eq!(hand.len(), LANDMARK_COUNT);
        assert_eq!(hand.thumb_tip(), Some(Landmark::new(0.1, 0.2)));
        assert_eq!(hand.index_tip(), Some(Landmark::new(0.3, 0.4)));
    }

    #[test]
    fn test_short_skeleton_has_no_index_tip() {
        let hand = HandLandmarks::new(vec![Landmark::default(); 5]);
        assert!(hand.thumb_tip().is_some());
        assert!(hand.index_tip().is_none());
    }

    #[test]
    fn test_to_pixels() {
        let p = Landmark::new(0.5, 0.25).to_pixels(1280, 720);
        assert_eq!(p, Point2D::new(640.0, 180.0));
    }

    #[test]
    fn test_parse_skips_comments_and_defaults_hands() {
        let jsonl = "# kiosk session\n\n{\"t\":0.0}\n{\"t\":0.5,\"hands\":[]}\n";
        let frames = parse_hand_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].primary().is_none());
        assert_eq!(frames[1].t, 0.5);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let jsonl = "{\"t\":0.0}\n# note\n{\"t\":\"soon\"}\n";
        let err = parse_hand_frames(jsonl).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let frames = vec![
            HandFrame::no_hand(0.0),
            HandFrame::with_hand(
                0.033,
                HandLandmarks::from_tips(Landmark::new(0.5, 0.5), Landmark::new(0.52, 0.5)),
            ),
        ];
        let jsonl = serialize_hand_frames(&frames).unwrap();
        assert_eq!(parse_hand_frames(&jsonl).unwrap(), frames);
    }

    #[test]
    fn test_start_order_fixture_is_ordered() {
        use std::path::PathBuf;

        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("fixtures")
            .join("scripts")
            .join("start-order.jsonl");

        let content = std::fs::read_to_string(path).unwrap();
        let frames = parse_hand_frames(&content).unwrap();
        assert!(!frames.is_empty());

        let mut prev = f64::NEG_INFINITY;
        for frame in &frames {
            assert!(frame.t >= prev);
            prev = frame.t;
            for hand in &frame.hands {
                assert!(hand.index_tip().is_some());
            }
        }
    }
}
