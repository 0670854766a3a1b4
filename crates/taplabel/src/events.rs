//! Touch and gesture event types delivered to a label.

use std::time::Instant;

use taplabel_text::Point;

/// Phase of a touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The finger touched the surface.
    Started,
    /// The finger moved.
    Moved,
    /// The finger was lifted.
    Ended,
    /// The system cancelled the touch.
    Cancelled,
}

impl TouchPhase {
    /// Check whether this phase ends the touch.
    pub fn is_terminal(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

/// A single touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Identifier that stays stable for the lifetime of the touch.
    pub id: u64,
    /// Position in label-local coordinates.
    pub local_pos: Point,
    /// Position in window coordinates.
    pub window_pos: Point,
    pub phase: TouchPhase,
}

impl TouchPoint {
    /// Create a new touch point.
    pub fn new(id: u64, local_pos: Point, window_pos: Point, phase: TouchPhase) -> Self {
        Self {
            id,
            local_pos,
            window_pos,
            phase,
        }
    }
}

/// A touch event carrying one or more touch points.
#[derive(Debug, Clone)]
pub struct TouchEvent {
    /// The touch points in this event.
    pub points: Vec<TouchPoint>,
    /// When the event was produced.
    pub timestamp: Instant,
}

impl TouchEvent {
    /// Create an event for a single touch point.
    pub fn new(point: TouchPoint) -> Self {
        Self::with_points(vec![point])
    }

    /// Create an event for several touch points.
    pub fn with_points(points: Vec<TouchPoint>) -> Self {
        Self {
            points,
            timestamp: Instant::now(),
        }
    }

    /// Replace the timestamp.
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The first touch point, if any.
    pub fn primary(&self) -> Option<&TouchPoint> {
        self.points.first()
    }
}

/// A recognized discrete tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapGestureEvent {
    /// Position of the tap in label-local coordinates.
    pub local_pos: Point,
    /// Position of the tap in window coordinates.
    pub window_pos: Point,
}

impl TapGestureEvent {
    pub fn new(local_pos: Point, window_pos: Point) -> Self {
        Self {
            local_pos,
            window_pos,
        }
    }
}
