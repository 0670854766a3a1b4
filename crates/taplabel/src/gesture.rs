//! Discrete tap recognition from touch events.
//!
//! A touch becomes a tap when it is lifted within the tap timeout and never
//! strayed further than the tap slop from where it started. Cancelled
//! touches and touches that overlapped another touch never become taps.
//!
//! ```ignore
//! use taplabel::gesture::TapRecognizer;
//!
//! let mut recognizer = TapRecognizer::new();
//! if let Some(tap) = recognizer.process_touch(&touch_event) {
//!     label.handle_tap(&tap);
//! }
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use taplabel_text::Point;

use crate::events::{TapGestureEvent, TouchEvent, TouchPhase, TouchPoint};
use crate::logging::targets;

/// Press duration in milliseconds at which a touch stops counting as a tap.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 300;

/// Distance in logical pixels a touch may travel and still tap.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// Tap recognition thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapConfig {
    pub tap_timeout: Duration,
    pub tap_slop: f32,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(DEFAULT_TAP_TIMEOUT_MS),
            tap_slop: DEFAULT_TAP_SLOP,
        }
    }
}

impl TapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    pub fn tap_slop(mut self, slop: f32) -> Self {
        self.tap_slop = slop;
        self
    }
}

/// Why a touch did not become a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapRejection {
    /// The touch travelled further than the tap slop.
    Moved,
    /// Another touch was down at some point during this one.
    Overlapped,
    /// The touch was held for the tap timeout or longer.
    TooSlow,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    down_at: Instant,
    /// Window coordinates.
    down_pos: Point,
    rejection: Option<TapRejection>,
}

impl Candidate {
    fn reject(&mut self, reason: TapRejection) {
        self.rejection.get_or_insert(reason);
    }
}

/// Recognizes single-finger taps.
#[derive(Debug, Default)]
pub struct TapRecognizer {
    config: TapConfig,
    candidates: HashMap<u64, Candidate>,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TapConfig) -> Self {
        Self {
            config,
            candidates: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Touches already down keep their start time and position.
    pub fn set_config(&mut self, config: TapConfig) {
        self.config = config;
    }

    pub fn active_touch_count(&self) -> usize {
        self.candidates.len()
    }

    /// Feeds one event; returns the tap completed by it, if any.
    ///
    /// Durations are measured between event timestamps.
    pub fn process_touch(&mut self, event: &TouchEvent) -> Option<TapGestureEvent> {
        event.points.iter().fold(None, |tap, point| {
            match point.phase {
                TouchPhase::Started => self.touch_down(point, event.timestamp),
                TouchPhase::Moved => self.touch_moved(point),
                TouchPhase::Ended => return self.touch_up(point, event.timestamp).or(tap),
                TouchPhase::Cancelled => {
                    self.candidates.remove(&point.id);
                }
            }
            tap
        })
    }

    pub fn reset(&mut self) {
        self.candidates.clear();
    }

    fn touch_down(&mut self, point: &TouchPoint, now: Instant) {
        let mut candidate = Candidate {
            down_at: now,
            down_pos: point.window_pos,
            rejection: None,
        };
        if !self.candidates.is_empty() {
            candidate.reject(TapRejection::Overlapped);
            self.candidates
                .values_mut()
                .for_each(|other| other.reject(TapRejection::Overlapped));
        }
        self.candidates.insert(point.id, candidate);
    }

    fn touch_moved(&mut self, point: &TouchPoint) {
        let slop = self.config.tap_slop;
        if let Some(candidate) = self.candidates.get_mut(&point.id)
            && candidate.rejection.is_none()
            && candidate.down_pos.distance(point.window_pos) > slop
        {
            candidate.reject(TapRejection::Moved);
            tracing::trace!(target: targets::GESTURE, id = point.id, "touch left the tap slop");
        }
    }

    fn touch_up(&mut self, point: &TouchPoint, now: Instant) -> Option<TapGestureEvent> {
        let mut candidate = self.candidates.remove(&point.id)?;
        if candidate.down_pos.distance(point.window_pos) > self.config.tap_slop {
            candidate.reject(TapRejection::Moved);
        }
        let held = now.saturating_duration_since(candidate.down_at);
        if held >= self.config.tap_timeout {
            candidate.reject(TapRejection::TooSlow);
        }

        if let Some(reason) = candidate.rejection {
            tracing::trace!(target: targets::GESTURE, id = point.id, ?reason, ?held, "no tap");
            return None;
        }
        tracing::debug!(target: targets::GESTURE, id = point.id, ?held, "tap recognized");
        Some(TapGestureEvent::new(point.local_pos, point.window_pos))
    }
}
