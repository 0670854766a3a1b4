//! Layout engine backed by cosmic-text shaping.

use std::ops::Range;

use cosmic_text::{Attrs, Buffer, Metrics, Shaping, Wrap};

use crate::logging::targets;

use super::attributes::{ATTACHMENT_CHARACTER, Attachment};
use super::engine::LayoutEngine;
use super::font::Font;
use super::font_system::FontSystem;
use super::layout::{HorizontalAlign, LayoutConfig, TextLayout};
use super::styled_text::StyledText;

/// Lays out text with cosmic-text.
///
/// Every run is shaped at its own font size, falling back to the
/// configuration's font. Attachments are widened to their reserved size
/// after shaping and push the rest of their line along; line wrapping still
/// sees the shaped width of U+FFFC. Paragraphs are separated by `'\n'`.
#[derive(Debug)]
pub struct CosmicEngine {
    font_system: FontSystem,
}

impl CosmicEngine {
    pub fn new(font_system: FontSystem) -> Self {
        Self { font_system }
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }
}

impl Default for CosmicEngine {
    fn default() -> Self {
        Self::new(FontSystem::new())
    }
}

/// A shaped glyph mapped back to source characters.
struct ShapedGlyph {
    chars: Range<usize>,
    x: f32,
    width: f32,
}

impl LayoutEngine for CosmicEngine {
    fn layout(&mut self, text: &StyledText, config: &LayoutConfig) -> TextLayout {
        let mut builder = TextLayout::builder(text.len());
        if text.is_empty() {
            return builder.build();
        }

        let source = text.as_str();
        let available = config.available_width();
        let font_system = self.font_system.inner_mut();

        let mut buffer = Buffer::new(font_system, run_metrics(&config.font, config));
        let wrap = if available.is_some() {
            config.line_break_mode.to_cosmic()
        } else {
            Wrap::None
        };
        buffer.set_wrap(font_system, wrap);
        buffer.set_size(font_system, available, None);

        let char_to_byte = char_to_byte_table(source);
        let spans: Vec<(&str, Attrs<'_>)> = text
            .runs()
            .map(|(range, attributes)| {
                let slice = &source[char_to_byte[range.start]..char_to_byte[range.end]];
                let font = attributes.font.as_ref().unwrap_or(&config.font);
                let mut attrs = font.to_attrs().metrics(run_metrics(font, config));
                if let Some(color) = attributes.foreground {
                    attrs = attrs.color(color.to_cosmic());
                }
                (slice, attrs)
            })
            .collect();

        let default_attrs = config.font.to_attrs().metrics(run_metrics(&config.font, config));
        buffer.set_rich_text(font_system, spans, default_attrs, Shaping::Advanced);

        // Paragraph alignment comes from the first character of each paragraph.
        let paragraphs = paragraph_starts(text);
        let alignments: Vec<HorizontalAlign> = paragraphs
            .iter()
            .map(|&(_, first_char)| {
                text.attributes_at(first_char)
                    .and_then(|attributes| attributes.alignment)
                    .unwrap_or(config.alignment)
            })
            .collect();
        for (line, alignment) in buffer.lines.iter_mut().zip(&alignments) {
            line.set_align(Some(alignment.to_cosmic()));
        }

        buffer.shape_until_scroll(font_system, false);

        let byte_to_char = byte_to_char_table(source);
        let padding = config.line_fragment_padding;
        let mut line_count = 0;
        // Height added above the current line by taller attachments.
        let mut pushed_down = 0.0_f32;

        for run in buffer.layout_runs() {
            if config.max_lines > 0 && line_count == config.max_lines {
                builder.mark_truncated();
                break;
            }
            line_count += 1;

            let paragraph_byte = paragraphs
                .get(run.line_i)
                .map(|&(byte, _)| byte)
                .unwrap_or(source.len());

            let mut glyphs: Vec<ShapedGlyph> = run
                .glyphs
                .iter()
                .map(|glyph| {
                    let start = byte_to_char[(paragraph_byte + glyph.start).min(source.len())];
                    let end = byte_to_char[(paragraph_byte + glyph.end).min(source.len())];
                    ShapedGlyph {
                        chars: start..end.max(start + 1),
                        x: glyph.x,
                        width: glyph.w,
                    }
                })
                .collect();
            glyphs.sort_by(|a, b| a.x.total_cmp(&b.x));

            let mut widened = 0.0_f32;
            let mut line_height = run.line_height;
            for glyph in &mut glyphs {
                glyph.x += widened;
                if let Some(attachment) = attachment_for(text, glyph.chars.start) {
                    widened += attachment.size.width - glyph.width;
                    glyph.width = attachment.size.width;
                    line_height = line_height.max(attachment.size.height);
                }
            }

            let line_width = run.line_w + widened;
            let realign = match available {
                Some(width) => {
                    let alignment = alignments.get(run.line_i).copied().unwrap_or(config.alignment);
                    alignment.offset(width, line_width) - alignment.offset(width, run.line_w)
                }
                None => 0.0,
            };

            let grown = line_height - run.line_height;
            builder.begin_line(
                run.line_top + pushed_down,
                run.line_y + pushed_down + grown,
                line_height,
                line_width,
            );
            pushed_down += grown;

            glyphs.sort_by_key(|glyph| glyph.chars.start);
            for glyph in glyphs {
                builder.push_glyph(glyph.chars, glyph.x + realign + padding, glyph.width);
            }
        }

        let layout = builder.build();
        tracing::trace!(
            target: targets::LAYOUT,
            chars = layout.char_count(),
            lines = layout.line_count(),
            glyphs = layout.glyph_count(),
            "cosmic layout"
        );
        layout
    }
}

/// Shaping metrics for a run drawn in `font`.
fn run_metrics(font: &Font, config: &LayoutConfig) -> Metrics {
    Metrics::new(font.size(), font.size() * config.line_height_multiplier)
}

/// The attachment drawn at `index`, if that character is a placeholder.
fn attachment_for(text: &StyledText, index: usize) -> Option<Attachment> {
    if text.char_at(index)? != ATTACHMENT_CHARACTER {
        return None;
    }
    text.attachment_at(index)
}

/// Byte and character offsets of the first character of each paragraph.
fn paragraph_starts(text: &StyledText) -> Vec<(usize, usize)> {
    let mut starts = vec![(0, 0)];
    for (char_index, (byte, ch)) in text.as_str().char_indices().enumerate() {
        if ch == '\n' {
            starts.push((byte + 1, char_index + 1));
        }
    }
    starts
}

/// Byte offset of every character, plus one entry for the end.
fn char_to_byte_table(source: &str) -> Vec<usize> {
    source
        .char_indices()
        .map(|(byte, _)| byte)
        .chain(std::iter::once(source.len()))
        .collect()
}

/// Character index for every byte offset, plus one entry for the end.
fn byte_to_char_table(source: &str) -> Vec<usize> {
    let mut table = vec![0; source.len() + 1];
    let mut char_count = 0;
    for (char_index, (byte, ch)) in source.char_indices().enumerate() {
        for entry in &mut table[byte..byte + ch.len_utf8()] {
            *entry = char_index;
        }
        char_count = char_index + 1;
    }
    table[source.len()] = char_count;
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Attributes, FontSystemConfig, HorizontalAlign};
    use crate::types::{Point, Size};

    fn engine() -> CosmicEngine {
        CosmicEngine::new(FontSystem::with_config(
            FontSystemConfig::new().load_system_fonts(false),
        ))
    }

    /// Engine over the installed fonts, or `None` on a host without any.
    fn font_engine() -> Option<CosmicEngine> {
        let font_system = FontSystem::new();
        (font_system.face_count() > 0).then(|| CosmicEngine::new(font_system))
    }

    fn config() -> LayoutConfig {
        LayoutConfig::new(Size::new(400.0, 100.0)).font(Font::system(14.0))
    }

    fn glyph_for(layout: &TextLayout, char_index: usize) -> &crate::text::LayoutGlyph {
        let index = layout
            .glyphs()
            .iter()
            .position(|glyph| glyph.chars.start == char_index)
            .unwrap();
        &layout.glyphs()[index]
    }

    #[test]
    fn test_byte_to_char_table() {
        let table = byte_to_char_table("aé→");
        assert_eq!(table, vec![0, 1, 1, 2, 2, 2, 3]);
    }

    #[test]
    fn test_char_to_byte_table() {
        assert_eq!(char_to_byte_table("aé→"), vec![0, 1, 3, 6]);
        assert_eq!(char_to_byte_table(""), vec![0]);
    }

    #[test]
    fn test_paragraph_starts() {
        let text = StyledText::plain("ab\né\nc");
        assert_eq!(paragraph_starts(&text), vec![(0, 0), (3, 3), (7, 5)]);
    }

    #[test]
    fn test_empty_text_has_empty_layout() {
        let layout = engine().layout(&StyledText::new(), &LayoutConfig::new(Size::new(100.0, 20.0)));
        assert_eq!(layout.glyph_count(), 0);
        assert_eq!(layout.used_size(), Size::ZERO);
    }

    #[test]
    fn test_run_metrics_use_the_run_font() {
        let config = config().line_height(1.5);
        assert_eq!(run_metrics(&Font::system(40.0), &config), Metrics::new(40.0, 60.0));
        assert_eq!(run_metrics(&config.font, &config), Metrics::new(14.0, 21.0));
    }

    #[test]
    fn test_attachment_only_on_placeholder() {
        let attachment = Attachment::new(3, Size::new(60.0, 20.0));
        let mut text = StyledText::plain("a");
        text.append(&StyledText::attachment(attachment));
        text.push("b", Attributes::new().attachment(attachment));

        assert_eq!(attachment_for(&text, 0), None);
        assert_eq!(attachment_for(&text, 1), Some(attachment));
        assert_eq!(attachment_for(&text, 2), None);
        assert_eq!(attachment_for(&text, 9), None);
    }

    #[test]
    fn test_attachment_reserves_its_width() {
        let Some(mut engine) = font_engine() else { return };
        let mut text = StyledText::plain("a");
        text.append(&StyledText::attachment(Attachment::new(1, Size::new(60.0, 20.0))));
        text.push_text("b");
        let layout = engine.layout(&text, &config());

        let a = glyph_for(&layout, 0).clone();
        let icon = glyph_for(&layout, 1).clone();
        let b = glyph_for(&layout, 2).clone();
        assert_eq!(icon.width, 60.0);
        assert!((icon.x - a.x_end()).abs() < 0.01);
        assert!((b.x - icon.x_end()).abs() < 0.01);
        assert!(layout.used_size().width >= 60.0);
        assert!(layout.lines()[0].height >= 20.0);

        let (glyph, fraction) = layout
            .glyph_index_for_point(Point::new(icon.x + 30.0, 10.0))
            .unwrap();
        assert_eq!(layout.character_index_for_glyph(glyph), 1);
        assert!((fraction - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_per_run_font_size() {
        let Some(mut engine) = font_engine() else { return };
        let plain = engine.layout(&StyledText::plain("abcd"), &config());
        let mixed = engine.layout(
            &StyledText::plain("ab").with_span("cd", Attributes::new().font(Font::system(40.0))),
            &config(),
        );

        assert!(glyph_for(&mixed, 2).width > glyph_for(&plain, 2).width * 2.0);
        assert!((plain.used_size().height - 16.8).abs() < 0.01);
        assert!((mixed.used_size().height - 48.0).abs() < 0.01);
    }

    #[test]
    fn test_centered_line_stays_centered_with_attachment() {
        let Some(mut engine) = font_engine() else { return };
        let text = StyledText::attachment(Attachment::new(1, Size::new(100.0, 10.0)));
        let layout = engine.layout(&text, &config().alignment(HorizontalAlign::Center));

        let icon = glyph_for(&layout, 0);
        assert_eq!(icon.width, 100.0);
        assert!((icon.x - 150.0).abs() < 0.01);
    }

    #[test]
    #[ignore = "shaping needs installed system fonts"]
    fn test_layout_structure() {
        let text = StyledText::plain("Click ")
            .with_span("here", Attributes::new().alignment(HorizontalAlign::Center));
        let config = LayoutConfig::new(Size::new(200.0, 20.0)).font(Font::system(14.0));
        let layout = CosmicEngine::new(FontSystem::new()).layout(&text, &config);

        assert!(layout.line_count() >= 1);
        assert!(layout.used_size().height > 0.0);
        assert_eq!(layout.char_count(), 10);
        for glyph in layout.glyphs() {
            assert!(glyph.chars.start < glyph.chars.end);
            assert!(glyph.chars.end <= 10);
        }
        for pair in layout.glyphs().windows(2) {
            assert!(pair[0].chars.start <= pair[1].chars.start);
        }
    }
}
