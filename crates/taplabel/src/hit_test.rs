//! Mapping touch points to action ranges.
//!
//! The label does not keep the layout it is drawn with, so hit testing
//! reproduces it: the content is wrapped with the label's font and
//! alignment as defaults, laid out in a container the size of the label
//! with no line padding, and the touch point is shifted by the vertical
//! centring the label applies to its text. The glyph under the shifted
//! point is accepted only when the point lies strictly inside its box.

use std::ops::Range;

use taplabel_text::text::{
    Action, Attributes, Font, HorizontalAlign, LayoutConfig, LayoutEngine, LineBreakMode,
    StyledText, TextLayout,
};
use taplabel_text::{Point, Rect, Size};

use crate::logging::targets;

/// The label settings that influence layout.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorSettings {
    pub font: Font,
    pub alignment: HorizontalAlign,
    pub line_break_mode: LineBreakMode,
    /// Maximum number of lines, 0 for unlimited.
    pub number_of_lines: usize,
    /// Size of the label.
    pub bounds: Size,
}

impl Default for MirrorSettings {
    fn default() -> Self {
        Self {
            font: Font::default(),
            alignment: HorizontalAlign::Left,
            line_break_mode: LineBreakMode::default(),
            number_of_lines: 1,
            bounds: Size::ZERO,
        }
    }
}

impl MirrorSettings {
    /// Attributes applied beneath the content's own styles.
    pub fn defaults(&self) -> Attributes {
        Attributes::new()
            .font(self.font.clone())
            .alignment(self.alignment)
    }

    /// Layout configuration reproducing the label's text container.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.bounds)
            .font(self.font.clone())
            .alignment(self.alignment)
            .line_break_mode(self.line_break_mode)
            .max_lines(self.number_of_lines)
            .line_fragment_padding(0.0)
    }
}

/// A hit on an action range.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionHit {
    /// Full range tagged with the action.
    pub range: Range<usize>,
    pub action: Action,
    /// Character under the point.
    pub index: usize,
}

/// A reproduction of the label's layout for given content and settings.
#[derive(Debug, Clone)]
pub struct MirroredLayout {
    source: StyledText,
    embedded: StyledText,
    settings: MirrorSettings,
    layout: TextLayout,
    vertical_offset: f32,
}

impl MirroredLayout {
    /// Lay out `content` the way a label with `settings` does.
    pub fn build<E>(engine: &mut E, content: &StyledText, settings: &MirrorSettings) -> Self
    where
        E: LayoutEngine + ?Sized,
    {
        let embedded = content.embedding(&settings.defaults());
        let layout = engine.layout(&embedded, &settings.layout_config());
        let vertical_offset = (settings.bounds.height - layout.used_size().height) / 2.0;

        Self {
            source: content.clone(),
            embedded,
            settings: settings.clone(),
            layout,
            vertical_offset,
        }
    }

    /// Check whether this layout was built from `content` and `settings`.
    pub fn matches(&self, content: &StyledText, settings: &MirrorSettings) -> bool {
        self.settings == *settings && self.source == *content
    }

    /// The content this layout was built from.
    pub fn source(&self) -> &StyledText {
        &self.source
    }

    /// The content with the label defaults applied.
    pub fn embedded(&self) -> &StyledText {
        &self.embedded
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Distance from the top of the label to the top of the text.
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// Find the character under a point in label coordinates.
    ///
    /// Points on a glyph edge, or outside every glyph box, hit nothing.
    pub fn character_at(&self, point: Point) -> Option<usize> {
        let container_point = point.offset(0.0, -self.vertical_offset);
        let (glyph, fraction) = self.layout.glyph_index_for_point(container_point)?;
        if fraction <= 0.0 || fraction >= 1.0 {
            tracing::trace!(
                target: targets::HIT_TEST,
                x = point.x,
                y = point.y,
                glyph,
                fraction,
                "point outside glyph box"
            );
            return None;
        }
        Some(self.layout.character_index_for_glyph(glyph))
    }

    /// Find the action range under a point in label coordinates.
    pub fn action_at(&self, point: Point) -> Option<ActionHit> {
        let index = self.character_at(point)?;
        let Some((range, action)) = self.embedded.action_at(index) else {
            tracing::trace!(target: targets::HIT_TEST, index, "no action at character");
            return None;
        };

        tracing::debug!(
            target: targets::HIT_TEST,
            index,
            start = range.start,
            end = range.end,
            "action hit"
        );
        Some(ActionHit {
            range,
            action,
            index,
        })
    }

    /// Bounding box of `chars` in label coordinates.
    pub fn rect_for_characters(&self, chars: Range<usize>) -> Option<Rect> {
        self.layout
            .bounding_rect_for_characters(chars)
            .map(|rect| rect.offset(0.0, self.vertical_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taplabel_text::text::{Attachment, CosmicEngine, FixedAdvanceEngine, FontSystem};

    // Fixed engine metrics: 14pt font advances 7 per character, lines are 16.8 high.
    fn settings() -> MirrorSettings {
        MirrorSettings {
            font: Font::system(14.0),
            bounds: Size::new(200.0, 20.0),
            ..MirrorSettings::default()
        }
    }

    fn content(action: &Action) -> StyledText {
        StyledText::plain("Click ").with_span("here", Attributes::new().action(action.clone()))
    }

    #[test]
    fn test_vertical_offset_centres_text() {
        let action = Action::new(|_| {});
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &content(&action), &settings());
        let used = mirror.layout().used_size().height;
        assert!((mirror.vertical_offset() - (20.0 - used) / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_action_hit_inside_glyph() {
        let action = Action::new(|_| {});
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &content(&action), &settings());

        // Middle of the 'e' at index 7 (x = 49..56).
        let hit = mirror.action_at(Point::new(52.5, 10.0)).unwrap();
        assert_eq!(hit.range, 6..10);
        assert_eq!(hit.index, 7);
        assert_eq!(hit.action, action);
    }

    #[test]
    fn test_glyph_edge_is_a_miss() {
        let action = Action::new(|_| {});
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &content(&action), &settings());

        assert!(mirror.character_at(Point::new(49.0, 10.0)).is_none());
        assert!(mirror.character_at(Point::new(-5.0, 10.0)).is_none());
        assert!(mirror.character_at(Point::new(150.0, 10.0)).is_none());
    }

    #[test]
    fn test_plain_character_is_not_an_action() {
        let action = Action::new(|_| {});
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &content(&action), &settings());

        assert_eq!(mirror.character_at(Point::new(3.5, 10.0)), Some(0));
        assert!(mirror.action_at(Point::new(3.5, 10.0)).is_none());
    }

    #[test]
    fn test_label_alignment_applies() {
        let action = Action::new(|_| {});
        let centred = MirrorSettings {
            alignment: HorizontalAlign::Center,
            ..settings()
        };
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &content(&action), &centred);

        // 70 wide text centred in 200: starts at 65, "here" spans 107..135.
        let rect = mirror.rect_for_characters(6..10).unwrap();
        assert!((rect.left() - 107.0).abs() < 1e-4);
        assert!((rect.right() - 135.0).abs() < 1e-4);
        assert!(mirror.action_at(Point::new(110.5, 10.0)).is_some());
        assert!(mirror.action_at(Point::new(52.5, 10.0)).is_none());
    }

    #[test]
    fn test_explicit_font_survives_embedding() {
        let action = Action::new(|_| {});
        let text = StyledText::plain("ab").with_span(
            "cd",
            Attributes::new().font(Font::system(28.0)).action(action),
        );
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &text, &settings());

        assert_eq!(mirror.embedded().attributes_at(0).and_then(|a| a.font.clone()), Some(Font::system(14.0)));
        assert_eq!(mirror.embedded().attributes_at(2).and_then(|a| a.font.clone()), Some(Font::system(28.0)));
        // 'c' is 14 wide and starts after two 7 wide glyphs.
        let rect = mirror.rect_for_characters(2..3).unwrap();
        assert!((rect.left() - 14.0).abs() < 1e-4);
        assert!((rect.width() - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_matches_tracks_inputs() {
        let action = Action::new(|_| {});
        let text = content(&action);
        let mirror = MirroredLayout::build(&mut FixedAdvanceEngine::new(), &text, &settings());

        assert!(mirror.matches(&text, &settings()));
        assert!(!mirror.matches(&StyledText::plain("Click here"), &settings()));
        let wider = MirrorSettings {
            bounds: Size::new(300.0, 20.0),
            ..settings()
        };
        assert!(!mirror.matches(&text, &wider));
    }

    /// Shaping engine over the installed fonts, or `None` on a host without any.
    fn cosmic_engine() -> Option<CosmicEngine> {
        let font_system = FontSystem::new();
        (font_system.face_count() > 0).then(|| CosmicEngine::new(font_system))
    }

    #[test]
    fn test_action_hit_with_shaped_text() {
        let Some(mut engine) = cosmic_engine() else { return };
        let action = Action::new(|_| {});
        let mirror = MirroredLayout::build(&mut engine, &content(&action), &settings());

        let centre = mirror.rect_for_characters(7..8).unwrap().center();
        let hit = mirror.action_at(centre).unwrap();
        assert_eq!(hit.range, 6..10);
        assert_eq!(hit.index, 7);

        let plain = mirror.rect_for_characters(1..2).unwrap().center();
        assert_eq!(mirror.character_at(plain), Some(1));
        assert!(mirror.action_at(plain).is_none());
    }

    #[test]
    fn test_attachment_hit_with_shaped_text() {
        let Some(mut engine) = cosmic_engine() else { return };
        let action = Action::new(|_| {});
        let mut text = StyledText::plain("Tap ");
        text.append(&StyledText::attachment(Attachment::new(5, Size::new(24.0, 16.0))));
        text.add_attributes(4..5, &Attributes::new().action(action.clone())).unwrap();
        let mirror = MirroredLayout::build(&mut engine, &text, &settings());

        let rect = mirror.rect_for_characters(4..5).unwrap();
        assert_eq!(rect.width(), 24.0);
        let hit = mirror.action_at(rect.center()).unwrap();
        assert_eq!(hit.range, 4..5);
        assert_eq!(hit.action, action);
    }
}
