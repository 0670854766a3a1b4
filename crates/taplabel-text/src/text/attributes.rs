//! Typed attribute sets for styled text.
//!
//! Every field of [`Attributes`] is optional; an absent value means the
//! run inherits whatever the surrounding context (usually the label)
//! provides.

use crate::types::{Color, Size};

use super::action::Action;
use super::font::Font;
use super::layout::HorizontalAlign;

/// The object replacement character that stands in for an attachment.
pub const ATTACHMENT_CHARACTER: char = '\u{FFFC}';

/// An embedded non-text object, such as an inline image.
///
/// Attachments occupy a single [`ATTACHMENT_CHARACTER`] in the text; the
/// layout engines reserve `size` for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    /// Host-defined identifier of the embedded object.
    pub id: u64,
    /// Space reserved for the object in the line.
    pub size: Size,
}

impl Attachment {
    pub fn new(id: u64, size: Size) -> Self {
        Self { id, size }
    }
}

/// A set of style attributes applied to a run of styled text.
///
/// # Example
///
/// ```
/// use taplabel_text::Color;
/// use taplabel_text::text::Attributes;
///
/// let link = Attributes::new()
///     .foreground(Color::BLUE)
///     .underline();
/// let pressed = Attributes::new().background(Color::LIGHT_GRAY);
///
/// let merged = link.merged(&pressed);
/// assert_eq!(merged.foreground, Some(Color::BLUE));
/// assert_eq!(merged.background, Some(Color::LIGHT_GRAY));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub font: Option<Font>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    /// Paragraph alignment. Read from the first character of a paragraph.
    pub alignment: Option<HorizontalAlign>,
    pub action: Option<Action>,
    pub attachment: Option<Attachment>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = Some(true);
        self
    }

    pub fn alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Tag the run with an action.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Check whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.font.is_none()
            && self.foreground.is_none()
            && self.background.is_none()
            && self.underline.is_none()
            && self.strikethrough.is_none()
            && self.alignment.is_none()
            && self.action.is_none()
            && self.attachment.is_none()
    }

    /// Merge `other` into `self`. Keys present in `other` win.
    pub fn merge(&mut self, other: &Attributes) {
        overlay(&mut self.font, &other.font);
        overlay(&mut self.foreground, &other.foreground);
        overlay(&mut self.background, &other.background);
        overlay(&mut self.underline, &other.underline);
        overlay(&mut self.strikethrough, &other.strikethrough);
        overlay(&mut self.alignment, &other.alignment);
        overlay(&mut self.action, &other.action);
        overlay(&mut self.attachment, &other.attachment);
    }

    /// Return a copy of `self` with `other` merged over it.
    pub fn merged(&self, other: &Attributes) -> Attributes {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Return a copy of `self` where absent keys are taken from `defaults`.
    pub fn with_defaults(&self, defaults: &Attributes) -> Attributes {
        defaults.merged(self)
    }
}

fn overlay<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}
