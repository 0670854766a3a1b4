//! Text layout results and geometric queries.
//!
//! A [`TextLayout`] is produced by a [`LayoutEngine`](super::LayoutEngine)
//! and answers the questions a hit test needs: which glyph lies under a
//! point, how far through that glyph the point is, and which character the
//! glyph came from.
//!
//! Glyph indices follow logical order: glyph `i` precedes glyph `i + 1` in
//! the text. Glyph positions are relative to the container's top-left
//! corner and already include line alignment.

use std::ops::Range;

use crate::types::{Point, Rect, Size};

use super::font::Font;

/// Default line height as a multiple of the font size.
pub const DEFAULT_LINE_HEIGHT_MULTIPLIER: f32 = 1.2;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Justified text (stretched to fill width).
    Justified,
}

impl HorizontalAlign {
    /// Convert to cosmic-text Align.
    pub(crate) fn to_cosmic(self) -> cosmic_text::Align {
        match self {
            HorizontalAlign::Left => cosmic_text::Align::Left,
            HorizontalAlign::Center => cosmic_text::Align::Center,
            HorizontalAlign::Right => cosmic_text::Align::Right,
            HorizontalAlign::Justified => cosmic_text::Align::Justified,
        }
    }

    /// Horizontal offset of a line of `line_width` inside `available` width.
    pub fn offset(self, available: f32, line_width: f32) -> f32 {
        let free = (available - line_width).max(0.0);
        match self {
            HorizontalAlign::Left | HorizontalAlign::Justified => 0.0,
            HorizontalAlign::Center => free / 2.0,
            HorizontalAlign::Right => free,
        }
    }
}

/// How lines are broken when text does not fit the container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakMode {
    /// Wrap at word boundaries, falling back to characters for long words.
    #[default]
    WordWrapping,
    /// Wrap at character boundaries.
    CharWrapping,
    /// Do not wrap; overflowing text is clipped.
    Clipping,
    /// Do not wrap; truncate at the start of the line.
    TruncatingHead,
    /// Do not wrap; truncate at the end of the line.
    TruncatingTail,
    /// Do not wrap; truncate in the middle of the line.
    TruncatingMiddle,
}

impl LineBreakMode {
    /// Check whether this mode wraps paragraphs onto several lines.
    pub fn wraps(self) -> bool {
        matches!(self, LineBreakMode::WordWrapping | LineBreakMode::CharWrapping)
    }

    /// Convert to cosmic-text Wrap.
    pub(crate) fn to_cosmic(self) -> cosmic_text::Wrap {
        match self {
            LineBreakMode::WordWrapping => cosmic_text::Wrap::WordOrGlyph,
            LineBreakMode::CharWrapping => cosmic_text::Wrap::Glyph,
            _ => cosmic_text::Wrap::None,
        }
    }
}

/// Settings for a layout pass.
///
/// # Example
///
/// ```
/// use taplabel_text::Size;
/// use taplabel_text::text::{Font, HorizontalAlign, LayoutConfig, LineBreakMode};
///
/// let config = LayoutConfig::new(Size::new(200.0, 40.0))
///     .font(Font::system(14.0))
///     .alignment(HorizontalAlign::Center)
///     .line_break_mode(LineBreakMode::TruncatingTail)
///     .max_lines(1);
/// assert_eq!(config.line_fragment_padding, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Size of the text container.
    pub container: Size,
    pub line_break_mode: LineBreakMode,
    /// Maximum number of lines, 0 for unlimited.
    pub max_lines: usize,
    /// Horizontal inset applied at both ends of every line.
    pub line_fragment_padding: f32,
    /// Font for runs without an explicit font.
    pub font: Font,
    /// Alignment for paragraphs without an explicit alignment.
    pub alignment: HorizontalAlign,
    /// Line height as a multiple of the font size.
    pub line_height_multiplier: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            container: Size::ZERO,
            line_break_mode: LineBreakMode::default(),
            max_lines: 0,
            line_fragment_padding: 0.0,
            font: Font::default(),
            alignment: HorizontalAlign::Left,
            line_height_multiplier: DEFAULT_LINE_HEIGHT_MULTIPLIER,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration for a container of the given size.
    pub fn new(container: Size) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    pub fn line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.line_break_mode = mode;
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn line_fragment_padding(mut self, padding: f32) -> Self {
        self.line_fragment_padding = padding;
        self
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn line_height(mut self, multiplier: f32) -> Self {
        self.line_height_multiplier = multiplier;
        self
    }

    /// Width available for glyphs once padding is removed.
    ///
    /// Returns `None` when the container width is unbounded.
    pub fn available_width(&self) -> Option<f32> {
        if self.container.width.is_finite() && self.container.width > 0.0 {
            Some((self.container.width - 2.0 * self.line_fragment_padding).max(0.0))
        } else {
            None
        }
    }
}

/// A positioned glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutGlyph {
    /// Character range in the source text this glyph represents.
    pub chars: Range<usize>,
    /// X position relative to the container.
    pub x: f32,
    /// Advance width of the glyph box.
    pub width: f32,
    /// Index of the line holding this glyph.
    pub line: usize,
}

impl LayoutGlyph {
    /// Get the rightmost x position of this glyph.
    pub fn x_end(&self) -> f32 {
        self.x + self.width
    }

    /// Check if an x position is within this glyph's horizontal bounds.
    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x_end()
    }
}

/// A visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Glyph indices on this line.
    pub glyphs: Range<usize>,
    /// Y offset from the top of the container to this line's top.
    pub top_y: f32,
    /// Y offset from the top of the container to this line's baseline.
    pub baseline_y: f32,
    pub height: f32,
    /// Width of this line's content.
    pub width: f32,
}

impl LayoutLine {
    /// Y offset of the bottom of this line.
    pub fn bottom_y(&self) -> f32 {
        self.top_y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top_y && y < self.bottom_y()
    }
}

/// The result of laying out styled text in a container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    lines: Vec<LayoutLine>,
    glyphs: Vec<LayoutGlyph>,
    used_size: Size,
    char_count: usize,
    truncated: bool,
}

impl TextLayout {
    /// Start building a layout for text of `char_count` characters.
    pub fn builder(char_count: usize) -> TextLayoutBuilder {
        TextLayoutBuilder {
            layout: TextLayout {
                char_count,
                ..TextLayout::default()
            },
        }
    }

    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    pub fn glyphs(&self) -> &[LayoutGlyph] {
        &self.glyphs
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of characters in the laid out text.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Size of the area actually covered by lines.
    pub fn used_size(&self) -> Size {
        self.used_size
    }

    /// Whether lines were dropped because of `max_lines`.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Find the line containing a given y position.
    pub fn line_at_y(&self, y: f32) -> Option<usize> {
        self.lines.iter().position(|line| line.contains_y(y))
    }

    /// Resolve a point to a glyph index and the fraction of the way through
    /// that glyph.
    ///
    /// Points above or below the text use the nearest line; points left or
    /// right of a line use its first or last glyph. The fraction is clamped
    /// to `[0, 1]`, so it only lies strictly inside that interval when the
    /// point falls inside the glyph box. Returns `None` for a layout
    /// without glyphs.
    pub fn glyph_index_for_point(&self, point: Point) -> Option<(usize, f32)> {
        let line = self.nearest_line(point.y)?;

        let mut best: Option<(usize, f32)> = None;
        for index in line.glyphs.clone() {
            let glyph = &self.glyphs[index];
            if glyph.contains_x(point.x) {
                return Some((index, fraction_through(glyph, point.x)));
            }
            let distance = if point.x < glyph.x {
                glyph.x - point.x
            } else {
                point.x - glyph.x_end()
            };
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| (index, fraction_through(&self.glyphs[index], point.x)))
    }

    /// Map a glyph index to the first character it represents.
    ///
    /// Indices past the last glyph map to the end of the text.
    pub fn character_index_for_glyph(&self, glyph: usize) -> usize {
        self.glyphs
            .get(glyph)
            .map(|g| g.chars.start)
            .unwrap_or(self.char_count)
    }

    /// Bounding box of a glyph.
    pub fn glyph_rect(&self, glyph: usize) -> Option<Rect> {
        let g = self.glyphs.get(glyph)?;
        let line = self.lines.get(g.line)?;
        Some(Rect::new(g.x, line.top_y, g.width, line.height))
    }

    /// Range of glyphs representing any character of `chars`.
    pub fn glyph_range_for_characters(&self, chars: Range<usize>) -> Range<usize> {
        let mut hits = self
            .glyphs
            .iter()
            .enumerate()
            .filter(|(_, g)| g.chars.start < chars.end && chars.start < g.chars.end)
            .map(|(index, _)| index);

        match hits.next() {
            Some(first) => {
                let last = hits.last().unwrap_or(first);
                first..last + 1
            }
            None => 0..0,
        }
    }

    /// Union of the glyph boxes of `chars`.
    pub fn bounding_rect_for_characters(&self, chars: Range<usize>) -> Option<Rect> {
        self.glyph_range_for_characters(chars)
            .filter_map(|index| self.glyph_rect(index))
            .reduce(|acc, rect| acc.union(&rect))
    }

    fn nearest_line(&self, y: f32) -> Option<&LayoutLine> {
        let mut candidates = self.lines.iter().filter(|line| !line.is_empty());
        let first = candidates.next()?;

        let distance = |line: &LayoutLine| {
            if line.contains_y(y) {
                0.0
            } else if y < line.top_y {
                line.top_y - y
            } else {
                y - line.bottom_y()
            }
        };

        let mut best = first;
        let mut best_distance = distance(first);
        for line in candidates {
            let d = distance(line);
            if d < best_distance {
                best = line;
                best_distance = d;
            }
        }
        Some(best)
    }
}

fn fraction_through(glyph: &LayoutGlyph, x: f32) -> f32 {
    if glyph.width <= 0.0 {
        return 0.0;
    }
    ((x - glyph.x) / glyph.width).clamp(0.0, 1.0)
}

/// Incremental construction of a [`TextLayout`] used by layout engines.
///
/// Lines are pushed top to bottom and glyphs in logical order.
#[derive(Debug)]
pub struct TextLayoutBuilder {
    layout: TextLayout,
}

impl TextLayoutBuilder {
    /// Start a new line; subsequent glyphs belong to it.
    pub fn begin_line(&mut self, top_y: f32, baseline_y: f32, height: f32, width: f32) {
        let start = self.layout.glyphs.len();
        self.layout.lines.push(LayoutLine {
            glyphs: start..start,
            top_y,
            baseline_y,
            height,
            width,
        });
    }

    /// Add a glyph to the current line.
    ///
    /// Glyphs pushed before any line are ignored.
    pub fn push_glyph(&mut self, chars: Range<usize>, x: f32, width: f32) {
        let line_index = match self.layout.lines.len().checked_sub(1) {
            Some(index) => index,
            None => return,
        };
        self.layout.glyphs.push(LayoutGlyph {
            chars,
            x,
            width,
            line: line_index,
        });
        self.layout.lines[line_index].glyphs.end = self.layout.glyphs.len();
    }

    pub fn mark_truncated(&mut self) {
        self.layout.truncated = true;
    }

    pub fn build(mut self) -> TextLayout {
        let width = self
            .layout
            .lines
            .iter()
            .map(|line| line.width)
            .fold(0.0_f32, f32::max);
        let height = self
            .layout
            .lines
            .last()
            .map(|line| line.bottom_y())
            .unwrap_or(0.0);
        self.layout.used_size = Size::new(width, height);
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two lines: "ab" at y 0..10 and "cd" at y 10..20, 10px glyphs.
    fn two_line_layout() -> TextLayout {
        let mut builder = TextLayout::builder(5);
        builder.begin_line(0.0, 8.0, 10.0, 20.0);
        builder.push_glyph(0..1, 0.0, 10.0);
        builder.push_glyph(1..2, 10.0, 10.0);
        // '\n' at index 2 has no glyph
        builder.begin_line(10.0, 18.0, 10.0, 20.0);
        builder.push_glyph(3..4, 0.0, 10.0);
        builder.push_glyph(4..5, 10.0, 10.0);
        builder.build()
    }

    #[test]
    fn test_used_size() {
        let layout = two_line_layout();
        assert_eq!(layout.used_size(), Size::new(20.0, 20.0));
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.glyph_count(), 4);
    }

    #[test]
    fn test_point_inside_glyph() {
        let layout = two_line_layout();
        let (glyph, fraction) = layout.glyph_index_for_point(Point::new(12.5, 15.0)).unwrap();
        assert_eq!(glyph, 3);
        assert!((fraction - 0.25).abs() < 1e-5);
        assert_eq!(layout.character_index_for_glyph(glyph), 4);
    }

    #[test]
    fn test_point_on_glyph_boundary_has_zero_fraction() {
        let layout = two_line_layout();
        let (glyph, fraction) = layout.glyph_index_for_point(Point::new(10.0, 5.0)).unwrap();
        assert_eq!(glyph, 1);
        assert_eq!(fraction, 0.0);
    }

    #[test]
    fn test_points_outside_clamp_to_nearest() {
        let layout = two_line_layout();

        let (glyph, fraction) = layout.glyph_index_for_point(Point::new(50.0, 5.0)).unwrap();
        assert_eq!((glyph, fraction), (1, 1.0));

        let (glyph, fraction) = layout.glyph_index_for_point(Point::new(-5.0, 15.0)).unwrap();
        assert_eq!((glyph, fraction), (2, 0.0));

        let (glyph, _) = layout.glyph_index_for_point(Point::new(5.0, -30.0)).unwrap();
        assert_eq!(glyph, 0);
        let (glyph, _) = layout.glyph_index_for_point(Point::new(5.0, 300.0)).unwrap();
        assert_eq!(glyph, 2);
    }

    #[test]
    fn test_empty_layout_has_no_glyph() {
        let layout = TextLayout::builder(0).build();
        assert!(layout.glyph_index_for_point(Point::ZERO).is_none());
        assert_eq!(layout.used_size(), Size::ZERO);
        assert_eq!(layout.character_index_for_glyph(0), 0);
    }

    #[test]
    fn test_bounding_rect_for_characters() {
        let layout = two_line_layout();
        assert_eq!(layout.glyph_range_for_characters(1..4), 1..3);
        assert_eq!(
            layout.bounding_rect_for_characters(0..2),
            Some(Rect::new(0.0, 0.0, 20.0, 10.0))
        );
        assert_eq!(
            layout.bounding_rect_for_characters(1..4),
            Some(Rect::new(0.0, 0.0, 20.0, 20.0))
        );
        assert_eq!(layout.bounding_rect_for_characters(2..3), None);
    }

    #[test]
    fn test_alignment_offset() {
        assert_eq!(HorizontalAlign::Left.offset(100.0, 40.0), 0.0);
        assert_eq!(HorizontalAlign::Center.offset(100.0, 40.0), 30.0);
        assert_eq!(HorizontalAlign::Right.offset(100.0, 40.0), 60.0);
        assert_eq!(HorizontalAlign::Right.offset(30.0, 40.0), 0.0);
    }

    #[test]
    fn test_line_break_mode_wraps() {
        assert!(LineBreakMode::WordWrapping.wraps());
        assert!(LineBreakMode::CharWrapping.wraps());
        assert!(!LineBreakMode::Clipping.wraps());
        assert!(!LineBreakMode::TruncatingTail.wraps());
    }

    #[test]
    fn test_available_width() {
        let config = LayoutConfig::new(Size::new(100.0, 20.0)).line_fragment_padding(5.0);
        assert_eq!(config.available_width(), Some(90.0));
        assert_eq!(LayoutConfig::new(Size::new(f32::INFINITY, 20.0)).available_width(), None);
    }
}
