//! Font descriptions.
//!
//! A [`Font`] names a family, size, weight and slant. It does not hold font
//! data: the cosmic-text engine resolves it against the font database and
//! the fixed-advance engine only reads its size.

use std::fmt;

/// Default font size used by labels (the platform "system font size").
pub const DEFAULT_FONT_SIZE: f32 = 17.0;

/// Family a font is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// The platform's interface face, resolved as the generic sans-serif.
    #[default]
    System,
    Serif,
    Monospace,
    /// An installed family looked up by name.
    Named(String),
}

impl From<&str> for FontFamily {
    fn from(name: &str) -> Self {
        FontFamily::Named(name.to_string())
    }
}

impl<'a> From<&'a FontFamily> for cosmic_text::Family<'a> {
    fn from(family: &'a FontFamily) -> Self {
        match family {
            FontFamily::System => cosmic_text::Family::SansSerif,
            FontFamily::Serif => cosmic_text::Family::Serif,
            FontFamily::Monospace => cosmic_text::Family::Monospace,
            FontFamily::Named(name) => cosmic_text::Family::Name(name.as_str()),
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontFamily::System => "system",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Named(name) => name.as_str(),
        };
        f.write_str(name)
    }
}

/// Stroke weight on the OpenType 1-1000 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(u16);

impl FontWeight {
    pub const LIGHT: Self = Self(300);
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const HEAVY: Self = Self(800);

    /// Weight from a numeric value, clamped to 1-1000.
    pub fn new(value: u16) -> Self {
        Self(value.clamp(1, 1000))
    }

    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl From<FontWeight> for cosmic_text::Weight {
    fn from(weight: FontWeight) -> Self {
        cosmic_text::Weight(weight.0)
    }
}

/// Slant of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Upright,
    Italic,
}

impl From<FontStyle> for cosmic_text::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Upright => cosmic_text::Style::Normal,
            FontStyle::Italic => cosmic_text::Style::Italic,
        }
    }
}

/// A font description.
///
/// # Example
///
/// ```
/// use taplabel_text::text::{Font, FontWeight};
///
/// let body = Font::system(14.0);
/// let heading = body.clone().with_size(20.0).bold();
/// assert_eq!(heading.weight(), FontWeight::BOLD);
/// assert_eq!(body.size(), 14.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    /// Size in pixels.
    size: f32,
    weight: FontWeight,
    style: FontStyle,
}

impl Font {
    pub fn new(family: impl Into<FontFamily>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::default(),
            style: FontStyle::default(),
        }
    }

    /// The system interface font at `size`.
    pub fn system(size: f32) -> Self {
        Self::new(FontFamily::System, size)
    }

    /// The monospace font at `size`.
    pub fn monospace(size: f32) -> Self {
        Self::new(FontFamily::Monospace, size)
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Shorthand for `with_weight(FontWeight::BOLD)`.
    pub fn bold(self) -> Self {
        self.with_weight(FontWeight::BOLD)
    }

    /// Shorthand for `with_style(FontStyle::Italic)`.
    pub fn italic(self) -> Self {
        self.with_style(FontStyle::Italic)
    }

    /// Shaping attributes for cosmic-text. Size is applied through metrics.
    pub fn to_attrs(&self) -> cosmic_text::Attrs<'_> {
        cosmic_text::Attrs::new()
            .family((&self.family).into())
            .weight(self.weight.into())
            .style(self.style.into())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(DEFAULT_FONT_SIZE)
    }
}
