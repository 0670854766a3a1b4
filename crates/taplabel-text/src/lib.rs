//! Styled text, fonts and text layout for taplabel.
//!
//! This crate holds everything the tappable label needs below the widget:
//! geometry and color types, the styled-text model with its action and
//! attachment attributes, and the layout engines used to reproduce where
//! each character is drawn.
//!
//! # Getting Started
//!
//! ```
//! use taplabel_text::Color;
//! use taplabel_text::text::{Action, Attributes, StyledText};
//!
//! let open = Action::new(|result| println!("open {:?}", result.content))
//!     .with_highlight(Attributes::new().background(Color::LIGHT_GRAY));
//!
//! let text = StyledText::plain("See the ")
//!     .with_span("docs", Attributes::new().underline().action(open));
//!
//! assert!(text.contains_action());
//! assert_eq!(text.action_ranges()[0].0, 8..12);
//! ```
//!
//! The `test-support` feature enables [`text::FixedAdvanceEngine`], a layout
//! engine with font-independent metrics.

mod error;
pub mod logging;
pub mod text;
mod types;

pub use error::{StyledTextError, StyledTextResult};
pub use types::{Color, Point, Rect, Size};
