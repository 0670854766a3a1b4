//! Styled (attributed) text.
//!
//! [`StyledText`] stores a string together with a list of attribute runs.
//! Runs are contiguous, never empty and cover the whole string; adjacent
//! runs always carry different attributes. All ranges are half-open and
//! measured in characters (Unicode scalar values), not bytes.
//!
//! # Example
//!
//! ```
//! use taplabel_text::Color;
//! use taplabel_text::text::{Action, Attributes, StyledText};
//!
//! let open = Action::new(|result| println!("open {:?}", result.range))
//!     .with_highlight(Attributes::new().background(Color::LIGHT_GRAY));
//!
//! let mut text = StyledText::plain("Read the ");
//! text.push("terms", Attributes::new().foreground(Color::BLUE).action(open));
//!
//! let (range, _action) = text.action_at(10).unwrap();
//! assert_eq!(range, 9..14);
//! ```

use std::fmt;
use std::ops::Range;

use crate::error::{StyledTextError, StyledTextResult};

use super::action::Action;
use super::attributes::{ATTACHMENT_CHARACTER, Attachment, Attributes};

/// A run of characters sharing one attribute set.
#[derive(Debug, Clone, PartialEq)]
struct StyledRun {
    /// Length in characters.
    len: usize,
    attributes: Attributes,
}

/// A string with per-range style attributes.
///
/// Equality compares the text and the attributes of every character;
/// actions compare by identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledText {
    text: String,
    runs: Vec<StyledRun>,
    char_len: usize,
}

impl StyledText {
    /// Create empty styled text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create styled text with no attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::with_attributes(text, Attributes::new())
    }

    /// Create styled text with one attribute set over the whole string.
    pub fn with_attributes(text: impl Into<String>, attributes: Attributes) -> Self {
        let text = text.into();
        let mut styled = Self::new();
        styled.push(&text, attributes);
        styled
    }

    /// Create a single attachment character carrying `attachment`.
    pub fn attachment(attachment: Attachment) -> Self {
        Self::with_attributes(
            ATTACHMENT_CHARACTER.to_string(),
            Attributes::new().attachment(attachment),
        )
    }

    /// Append text with the given attributes.
    pub fn push(&mut self, text: &str, attributes: Attributes) {
        let len = text.chars().count();
        if len == 0 {
            return;
        }
        self.text.push_str(text);
        self.push_run(len, attributes);
    }

    /// Append text without attributes.
    pub fn push_text(&mut self, text: &str) {
        self.push(text, Attributes::new());
    }

    /// Append text using builder pattern.
    pub fn with_span(mut self, text: &str, attributes: Attributes) -> Self {
        self.push(text, attributes);
        self
    }

    /// Append another styled text, keeping its attributes.
    pub fn append(&mut self, other: &StyledText) {
        self.text.push_str(&other.text);
        for run in &other.runs {
            self.push_run(run.len, run.attributes.clone());
        }
    }

    fn push_run(&mut self, len: usize, attributes: Attributes) {
        self.char_len += len;
        if let Some(last) = self.runs.last_mut()
            && last.attributes == attributes
        {
            last.len += len;
            return;
        }
        self.runs.push(StyledRun { len, attributes });
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// The underlying string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The text without formatting, as an owned string.
    pub fn plain_text(&self) -> String {
        self.text.clone()
    }

    /// Get the character at a character index.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.text.chars().nth(index)
    }

    /// Iterate over the attribute runs with their character ranges.
    pub fn runs(&self) -> impl Iterator<Item = (Range<usize>, &Attributes)> + '_ {
        let mut start = 0;
        self.runs.iter().map(move |run| {
            let range = start..start + run.len;
            start += run.len;
            (range, &run.attributes)
        })
    }

    /// Number of attribute runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Get the attributes at a character index.
    pub fn attributes_at(&self, index: usize) -> Option<&Attributes> {
        self.runs()
            .find(|(range, _)| range.contains(&index))
            .map(|(_, attributes)| attributes)
    }

    /// Merge `attributes` over every run in `range`.
    pub fn add_attributes(
        &mut self,
        range: Range<usize>,
        attributes: &Attributes,
    ) -> StyledTextResult<()> {
        self.update_attributes(range, |existing| existing.merge(attributes))
    }

    /// Replace the attributes of `range`.
    pub fn set_attributes(
        &mut self,
        range: Range<usize>,
        attributes: Attributes,
    ) -> StyledTextResult<()> {
        self.update_attributes(range, |existing| *existing = attributes.clone())
    }

    /// Call `f` on the attributes of each run inside `range`.
    ///
    /// Runs straddling the range edges are split first so that `f` never
    /// touches characters outside the range.
    pub fn update_attributes(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&mut Attributes),
    ) -> StyledTextResult<()> {
        self.check_range(&range)?;
        if range.is_empty() {
            return Ok(());
        }

        self.split_at(range.start);
        self.split_at(range.end);

        let mut start = 0;
        for run in &mut self.runs {
            let end = start + run.len;
            if start >= range.start && end <= range.end {
                f(&mut run.attributes);
            }
            start = end;
        }

        self.coalesce();
        Ok(())
    }

    /// Return a copy with `highlight` merged over `range`.
    pub fn highlighted(
        &self,
        range: Range<usize>,
        highlight: &Attributes,
    ) -> StyledTextResult<StyledText> {
        let mut copy = self.clone();
        copy.add_attributes(range, highlight)?;
        Ok(copy)
    }

    /// Extract the styled substring covering `range`.
    pub fn substring(&self, range: Range<usize>) -> StyledTextResult<StyledText> {
        self.check_range(&range)?;

        let start_byte = self.byte_offset(range.start);
        let end_byte = self.byte_offset(range.end);

        let mut result = StyledText {
            text: self.text[start_byte..end_byte].to_string(),
            runs: Vec::new(),
            char_len: 0,
        };
        for (run_range, attributes) in self.runs() {
            let start = run_range.start.max(range.start);
            let end = run_range.end.min(range.end);
            if start < end {
                result.push_run(end - start, attributes.clone());
            }
        }
        Ok(result)
    }

    /// Find the action at a character index together with its effective range.
    ///
    /// The range is the longest contiguous span around `index` tagged with
    /// the same action, even when other attributes change inside it.
    pub fn action_at(&self, index: usize) -> Option<(Range<usize>, Action)> {
        let spans: Vec<(Range<usize>, &Attributes)> = self.runs().collect();
        let position = spans.iter().position(|(range, _)| range.contains(&index))?;
        let action = spans[position].1.action.clone()?;

        let same_action = |attributes: &Attributes| attributes.action.as_ref() == Some(&action);

        let mut first = position;
        while first > 0 && same_action(spans[first - 1].1) {
            first -= 1;
        }
        let mut last = position;
        while last + 1 < spans.len() && same_action(spans[last + 1].1) {
            last += 1;
        }

        Some((spans[first].0.start..spans[last].0.end, action))
    }

    /// Check whether any run carries an action.
    pub fn contains_action(&self) -> bool {
        self.runs.iter().any(|run| run.attributes.action.is_some())
    }

    /// Every action range in text order.
    pub fn action_ranges(&self) -> Vec<(Range<usize>, Action)> {
        let mut ranges: Vec<(Range<usize>, Action)> = Vec::new();
        for (range, attributes) in self.runs() {
            let Some(action) = &attributes.action else {
                continue;
            };
            match ranges.last_mut() {
                Some((last, last_action)) if last.end == range.start && last_action == action => {
                    last.end = range.end;
                }
                _ => ranges.push((range, action.clone())),
            }
        }
        ranges
    }

    /// Get the attachment at a character index.
    pub fn attachment_at(&self, index: usize) -> Option<Attachment> {
        self.attributes_at(index)?.attachment
    }

    /// Apply `defaults` wherever a run has no explicit value.
    ///
    /// Explicit per-range styles always survive the wrap.
    pub fn embedding(&self, defaults: &Attributes) -> StyledText {
        let mut result = StyledText {
            text: self.text.clone(),
            runs: Vec::with_capacity(self.runs.len()),
            char_len: 0,
        };
        for run in &self.runs {
            result.push_run(run.len, run.attributes.with_defaults(defaults));
        }
        result
    }

    fn check_range(&self, range: &Range<usize>) -> StyledTextResult<()> {
        if range.start > range.end {
            return Err(StyledTextError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.char_len {
            return Err(StyledTextError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.char_len,
            });
        }
        Ok(())
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Ensure a run boundary exists at `index`.
    fn split_at(&mut self, index: usize) {
        let mut start = 0;
        for i in 0..self.runs.len() {
            let len = self.runs[i].len;
            if index > start && index < start + len {
                let tail = StyledRun {
                    len: start + len - index,
                    attributes: self.runs[i].attributes.clone(),
                };
                self.runs[i].len = index - start;
                self.runs.insert(i + 1, tail);
                return;
            }
            start += len;
        }
    }

    fn coalesce(&mut self) {
        let mut merged: Vec<StyledRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Font, HorizontalAlign};
    use crate::types::{Color, Size};

    fn link_text() -> (StyledText, Action) {
        let action = Action::new(|_| {});
        let text = StyledText::plain("Click ")
            .with_span("here", Attributes::new().action(action.clone()))
            .with_span(" now", Attributes::new());
        (text, action)
    }

    #[test]
    fn test_char_ranges_not_bytes() {
        let text = StyledText::plain("héllo").with_span("→x", Attributes::new().underline());
        assert_eq!(text.len(), 7);
        let runs: Vec<_> = text.runs().map(|(range, _)| range).collect();
        assert_eq!(runs, vec![0..5, 5..7]);
        assert_eq!(text.substring(4..6).unwrap().as_str(), "o→");
    }

    #[test]
    fn test_adjacent_equal_runs_coalesce() {
        let text = StyledText::plain("ab").with_span("cd", Attributes::new());
        assert_eq!(text.run_count(), 1);
        assert_eq!(text, StyledText::plain("abcd"));
    }

    #[test]
    fn test_add_attributes_splits_runs() {
        let mut text = StyledText::plain("abcdef");
        text.add_attributes(2..4, &Attributes::new().foreground(Color::RED))
            .unwrap();

        let runs: Vec<_> = text.runs().map(|(range, a)| (range, a.foreground)).collect();
        assert_eq!(
            runs,
            vec![(0..2, None), (2..4, Some(Color::RED)), (4..6, None)]
        );
    }

    #[test]
    fn test_add_attributes_then_reset_restores_structure() {
        let original = StyledText::plain("abcdef");
        let mut text = original.clone();
        text.add_attributes(1..5, &Attributes::new().underline()).unwrap();
        text.set_attributes(1..5, Attributes::new()).unwrap();
        assert_eq!(text, original);
    }

    #[test]
    fn test_invalid_ranges_are_errors() {
        let mut text = StyledText::plain("abc");
        assert_eq!(
            text.add_attributes(1..4, &Attributes::new()),
            Err(StyledTextError::RangeOutOfBounds {
                start: 1,
                end: 4,
                len: 3
            })
        );
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = text.substring(2..1);
        assert_eq!(
            inverted,
            Err(StyledTextError::InvertedRange { start: 2, end: 1 })
        );
    }

    #[test]
    fn test_update_attributes_visits_each_run_in_range() {
        let mut text = StyledText::plain("aa")
            .with_span("bb", Attributes::new().foreground(Color::RED))
            .with_span("cc", Attributes::new().foreground(Color::BLUE));

        let mut visited = 0;
        text.update_attributes(1..5, |attributes| {
            visited += 1;
            attributes.background = Some(Color::WHITE);
        })
        .unwrap();

        assert_eq!(visited, 3);
        assert_eq!(text.attributes_at(0).unwrap().background, None);
        assert_eq!(text.attributes_at(3).unwrap().foreground, Some(Color::RED));
        assert_eq!(text.attributes_at(4).unwrap().background, Some(Color::WHITE));
        assert_eq!(text.attributes_at(5).unwrap().background, None);
    }

    #[test]
    fn test_action_at_returns_effective_range() {
        let (mut text, action) = link_text();
        // Styling part of the action range must not shorten it.
        text.add_attributes(7..8, &Attributes::new().underline()).unwrap();

        let (range, found) = text.action_at(9).unwrap();
        assert_eq!(range, 6..10);
        assert_eq!(found, action);
        assert!(text.action_at(2).is_none());
        assert!(text.action_at(40).is_none());
    }

    #[test]
    fn test_adjacent_distinct_actions_stay_separate() {
        let first = Action::new(|_| {});
        let second = Action::new(|_| {});
        let text = StyledText::new()
            .with_span("ab", Attributes::new().action(first))
            .with_span("cd", Attributes::new().action(second));

        let ranges: Vec<_> = text.action_ranges().into_iter().map(|(r, _)| r).collect();
        assert_eq!(ranges, vec![0..2, 2..4]);
        assert_eq!(text.action_at(1).unwrap().0, 0..2);
    }

    #[test]
    fn test_contains_action() {
        let (text, _) = link_text();
        assert!(text.contains_action());
        assert!(!StyledText::plain("nothing").contains_action());
        assert!(!StyledText::new().contains_action());
    }

    #[test]
    fn test_embedding_applies_defaults_only_where_absent() {
        let text = StyledText::plain("ab").with_span("cd", Attributes::new().font(Font::system(30.0)));
        let defaults = Attributes::new()
            .font(Font::system(14.0))
            .alignment(HorizontalAlign::Right);

        let wrapped = text.embedding(&defaults);
        assert_eq!(wrapped.as_str(), "abcd");
        assert_eq!(wrapped.attributes_at(0).unwrap().font, Some(Font::system(14.0)));
        assert_eq!(wrapped.attributes_at(2).unwrap().font, Some(Font::system(30.0)));
        assert_eq!(
            wrapped.attributes_at(3).unwrap().alignment,
            Some(HorizontalAlign::Right)
        );
    }

    #[test]
    fn test_attachment_text() {
        let attachment = Attachment::new(1, Size::new(10.0, 10.0));
        let text = StyledText::attachment(attachment);
        assert_eq!(text.len(), 1);
        assert_eq!(text.char_at(0), Some(ATTACHMENT_CHARACTER));
        assert_eq!(text.attachment_at(0), Some(attachment));
        assert_eq!(text.attachment_at(1), None);
    }

    #[test]
    fn test_highlighted_leaves_original_untouched() {
        let (text, _) = link_text();
        let highlight = Attributes::new().background(Color::LIGHT_GRAY);
        let pressed = text.highlighted(6..10, &highlight).unwrap();

        assert_ne!(pressed, text);
        assert_eq!(pressed.as_str(), text.as_str());
        assert_eq!(pressed.attributes_at(5).unwrap().background, None);
        assert_eq!(
            pressed.attributes_at(6).unwrap().background,
            Some(Color::LIGHT_GRAY)
        );
        assert_eq!(pressed.attributes_at(10).unwrap().background, None);
        assert_eq!(text.attributes_at(6).unwrap().background, None);
    }
}
