//! taplabel - tappable action ranges in styled label text.
//!
//! [`TappableLabel`] displays [`StyledText`] whose ranges may carry an
//! [`Action`]. Touching an action range highlights it until the touch ends,
//! and a completed tap invokes the action's callback with the tapped
//! substring or attachment.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use taplabel::text::text::FixedAdvanceEngine;
//! use taplabel::{Action, Attributes, Color, Font, Point, Size, StyledText, TappableLabel};
//!
//! let tapped = Arc::new(Mutex::new(None));
//! let sink = tapped.clone();
//! let open = Action::new(move |result| {
//!     *sink.lock().unwrap() = result.content.as_text().map(|t| t.plain_text());
//! })
//! .with_highlight(Attributes::new().background(Color::LIGHT_GRAY));
//!
//! let mut label = TappableLabel::new(FixedAdvanceEngine::new())
//!     .with_font(Font::system(14.0))
//!     .with_bounds(Size::new(200.0, 20.0))
//!     .with_text(StyledText::plain("Click ").with_span("here", Attributes::new().action(open)));
//!
//! let rect = label.rect_for_characters(6..10).unwrap();
//! assert!(label.tap_at(Point::new(rect.center().x.floor() + 0.5, rect.center().y)));
//! assert_eq!(tapped.lock().unwrap().as_deref(), Some("here"));
//! ```
//!
//! The doc example above uses the fixed-advance engine from the
//! `test-support` feature. Applications normally create the label with
//! [`TappableLabel::with_font_system`].

pub use taplabel_text as text;

pub use taplabel_text::text::{
    Action, ActionResult, Attachment, Attributes, Font, FontSystem, HorizontalAlign,
    LayoutEngine, LineBreakMode, StyledText, TapContent,
};
pub use taplabel_text::{Color, Point, Rect, Size};

pub mod events;
pub mod gesture;
pub mod hit_test;
mod label;
pub mod logging;
pub mod press;
pub mod touch;

pub use events::{TapGestureEvent, TouchEvent, TouchPhase, TouchPoint};
pub use gesture::{TapConfig, TapRecognizer, TapRejection};
pub use hit_test::{ActionHit, MirrorSettings, MirroredLayout};
pub use label::TappableLabel;
pub use press::{PressController, PressState};
pub use touch::TouchInputHandler;
