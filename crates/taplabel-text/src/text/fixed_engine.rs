//! Deterministic layout engine with fixed per-character advances.
//!
//! Every character advances by `font size * advance_ratio`, attachments by
//! their width, and lines are `font size * line height multiplier` tall.
//! The result does not depend on installed fonts, which makes it suitable
//! for headless hosts and tests.

use std::ops::Range;

use super::attributes::ATTACHMENT_CHARACTER;
use super::engine::LayoutEngine;
use super::layout::{HorizontalAlign, LayoutConfig, LineBreakMode, TextLayout};
use super::styled_text::StyledText;

/// Default advance as a fraction of the font size.
pub const DEFAULT_ADVANCE_RATIO: f32 = 0.5;

/// Layout engine with fixed character advances.
///
/// # Example
///
/// ```
/// use taplabel_text::Size;
/// use taplabel_text::text::{FixedAdvanceEngine, Font, LayoutConfig, LayoutEngine, StyledText};
///
/// let mut engine = FixedAdvanceEngine::new();
/// let config = LayoutConfig::new(Size::new(200.0, 20.0)).font(Font::system(14.0));
/// let layout = engine.layout(&StyledText::plain("Click here"), &config);
///
/// assert_eq!(layout.glyph_count(), 10);
/// assert_eq!(layout.used_size().width, 70.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedAdvanceEngine {
    /// Advance of one character as a fraction of its font size.
    pub advance_ratio: f32,
}

impl Default for FixedAdvanceEngine {
    fn default() -> Self {
        Self {
            advance_ratio: DEFAULT_ADVANCE_RATIO,
        }
    }
}

/// Metrics of one character.
#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    advance: f32,
    ascent: f32,
    height: f32,
    alignment: Option<HorizontalAlign>,
}

impl Cell {
    fn is_whitespace(&self) -> bool {
        self.ch.is_whitespace()
    }
}

impl FixedAdvanceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    fn cells(&self, text: &StyledText, config: &LayoutConfig) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(text.len());
        let mut chars = text.as_str().chars();
        for (range, attributes) in text.runs() {
            let font = attributes.font.as_ref().unwrap_or(&config.font);
            let size = font.size();
            for _ in range {
                let Some(ch) = chars.next() else {
                    break;
                };
                let cell = match attributes.attachment {
                    Some(attachment) if ch == ATTACHMENT_CHARACTER => Cell {
                        ch,
                        advance: attachment.size.width,
                        ascent: attachment.size.height,
                        height: attachment.size.height,
                        alignment: attributes.alignment,
                    },
                    _ => Cell {
                        ch,
                        advance: if ch == '\n' { 0.0 } else { size * self.advance_ratio },
                        ascent: size,
                        height: size * config.line_height_multiplier,
                        alignment: attributes.alignment,
                    },
                };
                cells.push(cell);
            }
        }
        cells
    }
}

impl LayoutEngine for FixedAdvanceEngine {
    fn layout(&mut self, text: &StyledText, config: &LayoutConfig) -> TextLayout {
        let mut builder = TextLayout::builder(text.len());
        if text.is_empty() {
            return builder.build();
        }

        let cells = self.cells(text, config);
        let available = config.available_width();
        let default_height = config.font.size() * config.line_height_multiplier;

        let mut y = 0.0;
        let mut line_count = 0;

        'paragraphs: for paragraph in paragraphs(&cells) {
            let alignment = cells
                .get(paragraph.start)
                .and_then(|cell| cell.alignment)
                .unwrap_or(config.alignment);

            let lines = match available {
                Some(width) if config.line_break_mode.wraps() => {
                    wrap(&cells, paragraph.clone(), width, config.line_break_mode)
                }
                _ => vec![paragraph.clone()],
            };

            for line in lines {
                if config.max_lines > 0 && line_count == config.max_lines {
                    builder.mark_truncated();
                    break 'paragraphs;
                }
                line_count += 1;

                let line_cells = &cells[line.clone()];
                let (height, ascent) = if line_cells.is_empty() {
                    (default_height, config.font.size())
                } else {
                    line_cells.iter().fold((0.0_f32, 0.0_f32), |(h, a), cell| {
                        (h.max(cell.height), a.max(cell.ascent))
                    })
                };

                let content_width: f32 = line_cells
                    .iter()
                    .rev()
                    .skip_while(|cell| cell.is_whitespace())
                    .map(|cell| cell.advance)
                    .sum();
                let mut x = config.line_fragment_padding
                    + alignment.offset(available.unwrap_or(content_width), content_width);

                builder.begin_line(y, y + ascent, height, content_width);
                for (index, cell) in line.zip(line_cells) {
                    builder.push_glyph(index..index + 1, x, cell.advance);
                    x += cell.advance;
                }
                y += height;
            }
        }

        builder.build()
    }
}

/// Character ranges of each paragraph, excluding the separating `'\n'`.
fn paragraphs(cells: &[Cell]) -> Vec<Range<usize>> {
    let mut result = Vec::new();
    let mut start = 0;
    for (index, cell) in cells.iter().enumerate() {
        if cell.ch == '\n' {
            result.push(start..index);
            start = index + 1;
        }
    }
    result.push(start..cells.len());
    result
}

/// Break a paragraph into visual lines no wider than `width`.
///
/// Whitespace at the end of a line hangs past the edge. A word wider than
/// the line is broken between characters.
fn wrap(cells: &[Cell], paragraph: Range<usize>, width: f32, mode: LineBreakMode) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut line_start = paragraph.start;
    let mut line_width = 0.0;

    if mode == LineBreakMode::CharWrapping {
        for index in paragraph.clone() {
            let advance = cells[index].advance;
            if index > line_start && line_width + advance > width && !cells[index].is_whitespace() {
                lines.push(line_start..index);
                line_start = index;
                line_width = 0.0;
            }
            line_width += advance;
        }
        lines.push(line_start..paragraph.end);
        return lines;
    }

    let mut index = paragraph.start;
    while index < paragraph.end {
        let whitespace = cells[index].is_whitespace();
        let mut token_end = index;
        let mut token_width = 0.0;
        while token_end < paragraph.end && cells[token_end].is_whitespace() == whitespace {
            token_width += cells[token_end].advance;
            token_end += 1;
        }

        if whitespace || line_width + token_width <= width {
            line_width += token_width;
            index = token_end;
        } else if index > line_start {
            lines.push(line_start..index);
            line_start = index;
            line_width = 0.0;
        } else {
            // The word alone is wider than the line.
            for char_index in index..token_end {
                let advance = cells[char_index].advance;
                if char_index > line_start && line_width + advance > width {
                    lines.push(line_start..char_index);
                    line_start = char_index;
                    line_width = 0.0;
                }
                line_width += advance;
            }
            index = token_end;
        }
    }
    lines.push(line_start..paragraph.end);
    lines
}
