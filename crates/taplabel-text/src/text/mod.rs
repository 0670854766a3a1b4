//! Styled text and text layout.
//!
//! This module provides the styled-text model (attributes, actions,
//! attachments), fonts, and the layout engines that place glyphs inside a
//! container.
//!
//! # Styled Text
//!
//! Build text from runs of attributes. Ranges are character indices:
//!
//! ```
//! use taplabel_text::Color;
//! use taplabel_text::text::{Action, Attributes, StyledText};
//!
//! let action = Action::new(|result| println!("tapped {}", result.range.start));
//!
//! let text = StyledText::plain("Click ")
//!     .with_span("here", Attributes::new().foreground(Color::BLUE).action(action));
//!
//! assert_eq!(text.len(), 10);
//! assert_eq!(text.action_ranges().len(), 1);
//! ```
//!
//! # Text Layout
//!
//! A [`LayoutEngine`] lays text out in a container and the resulting
//! [`TextLayout`] answers geometric queries:
//!
//! ```no_run
//! use taplabel_text::{Point, Size};
//! use taplabel_text::text::{
//!     CosmicEngine, Font, FontSystem, LayoutConfig, LayoutEngine, StyledText,
//! };
//!
//! let mut engine = CosmicEngine::new(FontSystem::new());
//! let config = LayoutConfig::new(Size::new(200.0, 40.0)).font(Font::system(14.0));
//! let layout = engine.layout(&StyledText::plain("Hello, World!"), &config);
//!
//! if let Some((glyph, fraction)) = layout.glyph_index_for_point(Point::new(20.0, 8.0)) {
//!     let index = layout.character_index_for_glyph(glyph);
//!     println!("character {index}, {fraction:.2} through its glyph");
//! }
//! ```

mod action;
mod attributes;
mod cosmic_engine;
mod engine;
#[cfg(any(test, feature = "test-support"))]
mod fixed_engine;
mod font;
mod font_system;
mod layout;
mod styled_text;

pub use action::{Action, ActionCallback, ActionModel, ActionResult, TapContent};
pub use attributes::{ATTACHMENT_CHARACTER, Attachment, Attributes};
pub use cosmic_engine::CosmicEngine;
pub use engine::LayoutEngine;
#[cfg(any(test, feature = "test-support"))]
pub use fixed_engine::{DEFAULT_ADVANCE_RATIO, FixedAdvanceEngine};
pub use font::{DEFAULT_FONT_SIZE, Font, FontFamily, FontStyle, FontWeight};
pub use font_system::{FontLoadError, FontSystem, FontSystemConfig};
pub use layout::{
    DEFAULT_LINE_HEIGHT_MULTIPLIER, HorizontalAlign, LayoutConfig, LayoutGlyph, LayoutLine,
    LineBreakMode, TextLayout, TextLayoutBuilder,
};
pub use styled_text::StyledText;
