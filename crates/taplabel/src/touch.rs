//! Adapter from winit touches to label [`TouchEvent`]s.
//!
//! winit reports touch locations in physical window pixels. The adapter
//! divides by the window scale factor and subtracts the label's origin, so
//! the events it produces are in label-local logical coordinates.
//!
//! ```ignore
//! let touches = TouchInputHandler::with_origin(label_origin)
//!     .with_scale_factor(window.scale_factor());
//!
//! // WindowEvent::Touch(touch)
//! label.handle_touch(&touches.handle_touch(touch));
//! ```

use winit::event::{Touch, TouchPhase as WinitTouchPhase};

use taplabel_text::Point;

use crate::events::{TouchEvent, TouchPhase, TouchPoint};

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Started,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

/// Converts winit touches into events local to one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchInputHandler {
    /// Label top-left in logical window coordinates.
    origin: Point,
    scale_factor: f64,
}

impl Default for TouchInputHandler {
    fn default() -> Self {
        Self::with_origin(Point::ZERO)
    }
}

impl TouchInputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(origin: Point) -> Self {
        Self {
            origin,
            scale_factor: 1.0,
        }
    }

    /// Window scale factor used to turn physical locations into logical ones.
    /// Non-positive factors are ignored.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.set_scale_factor(scale_factor);
        self
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub fn handle_touch(&self, touch: Touch) -> TouchEvent {
        let logical = touch.location.to_logical::<f32>(self.scale_factor);
        let window_pos = Point::new(logical.x, logical.y);
        let local_pos = window_pos.offset(-self.origin.x, -self.origin.y);
        TouchEvent::new(TouchPoint::new(touch.id, local_pos, window_pos, touch.phase.into()))
    }
}
