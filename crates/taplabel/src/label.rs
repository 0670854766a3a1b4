//! Label widget with tappable action ranges.
//!
//! A [`TappableLabel`] displays styled text. Ranges of the text tagged with
//! an [`Action`](taplabel_text::text::Action) react to touches: the range is
//! highlighted while a finger rests on it, and a completed tap invokes the
//! action's callback.
//!
//! # Example
//!
//! ```ignore
//! use taplabel::{Action, Attributes, Color, Font, FontSystem, Size, StyledText, TappableLabel};
//!
//! let open = Action::new(|result| println!("tapped {:?}", result.content))
//!     .with_highlight(Attributes::new().background(Color::LIGHT_GRAY));
//!
//! let mut label = TappableLabel::with_font_system(FontSystem::new())
//!     .with_font(Font::system(14.0))
//!     .with_bounds(Size::new(200.0, 20.0));
//! label.set_text(Some(StyledText::plain("Click ").with_span("here", Attributes::new().action(open))));
//!
//! // Feed converted touch events:
//! label.handle_touch(&event);
//! ```

use std::fmt;
use std::ops::Range;

use parking_lot::{Mutex, RwLock};

use taplabel_text::text::{
    ActionResult, CosmicEngine, Font, FontSystem, HorizontalAlign, LayoutEngine, LineBreakMode,
    StyledText,
};
use taplabel_text::{Point, Rect, Size};

use crate::events::{TapGestureEvent, TouchEvent, TouchPhase};
use crate::gesture::{TapConfig, TapRecognizer};
use crate::hit_test::{ActionHit, MirrorSettings, MirroredLayout};
use crate::logging::targets;
use crate::press::PressController;

/// A label whose styled text may contain tappable action ranges.
///
/// # Touch Handling
///
/// Hosts either call the override points ([`touch_began`](Self::touch_began),
/// [`touch_ended`](Self::touch_ended), [`touch_cancelled`](Self::touch_cancelled)
/// and [`handle_tap`](Self::handle_tap)) or feed whole events to
/// [`handle_touch`](Self::handle_touch), which also drives the label's tap
/// recognizer.
///
/// The recognizer is attached whenever the content contains at least one
/// action range, which also enables user interaction. Content without
/// actions detaches it.
///
/// # Performance
///
/// The label caches the layout used for hit testing and only rebuilds it
/// when the content or a layout setting changes.
pub struct TappableLabel {
    /// Displayed content. Highlighted while pressed.
    text: Option<StyledText>,

    /// Font, alignment, line breaking and bounds.
    settings: MirrorSettings,

    /// Whether touches are handled at all.
    user_interaction_enabled: bool,

    tap_config: TapConfig,

    /// Present while the content has actions.
    tap_recognizer: Option<TapRecognizer>,

    press: PressController,

    engine: Mutex<Box<dyn LayoutEngine>>,

    /// Cached hit-test layout.
    /// Uses RwLock for interior mutability so queries can take `&self`.
    cached_layout: RwLock<Option<MirroredLayout>>,
}

impl TappableLabel {
    /// Create an empty label laying out text with `engine`.
    pub fn new(engine: impl LayoutEngine + 'static) -> Self {
        Self {
            text: None,
            settings: MirrorSettings::default(),
            user_interaction_enabled: false,
            tap_config: TapConfig::default(),
            tap_recognizer: None,
            press: PressController::new(),
            engine: Mutex::new(Box::new(engine)),
            cached_layout: RwLock::new(None),
        }
    }

    /// Create an empty label shaping text with cosmic-text.
    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self::new(CosmicEngine::new(font_system))
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Get the displayed content.
    ///
    /// While an action range is pressed this includes the highlight.
    pub fn text(&self) -> Option<&StyledText> {
        self.text.as_ref()
    }

    /// Replace the content.
    ///
    /// An active press is dropped without restoring its snapshot, and the
    /// tap recognizer is attached or detached to match the new content.
    pub fn set_text(&mut self, text: Option<StyledText>) {
        self.press.discard();
        self.text = text;
        self.invalidate_layout();
        self.update_tap_recognizer();
    }

    /// Set the content using builder pattern.
    pub fn with_text(mut self, text: StyledText) -> Self {
        self.set_text(Some(text));
        self
    }

    // =========================================================================
    // Layout settings
    // =========================================================================

    pub fn font(&self) -> &Font {
        &self.settings.font
    }

    /// Set the default font. Explicit fonts in the content take precedence.
    pub fn set_font(&mut self, font: Font) {
        if self.settings.font != font {
            self.settings.font = font;
            self.invalidate_layout();
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    pub fn alignment(&self) -> HorizontalAlign {
        self.settings.alignment
    }

    /// Set the default paragraph alignment.
    pub fn set_alignment(&mut self, alignment: HorizontalAlign) {
        if self.settings.alignment != alignment {
            self.settings.alignment = alignment;
            self.invalidate_layout();
        }
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlign) -> Self {
        self.set_alignment(alignment);
        self
    }

    pub fn line_break_mode(&self) -> LineBreakMode {
        self.settings.line_break_mode
    }

    pub fn set_line_break_mode(&mut self, mode: LineBreakMode) {
        if self.settings.line_break_mode != mode {
            self.settings.line_break_mode = mode;
            self.invalidate_layout();
        }
    }

    pub fn with_line_break_mode(mut self, mode: LineBreakMode) -> Self {
        self.set_line_break_mode(mode);
        self
    }

    /// Get the maximum number of lines. 0 means unlimited.
    pub fn number_of_lines(&self) -> usize {
        self.settings.number_of_lines
    }

    pub fn set_number_of_lines(&mut self, lines: usize) {
        if self.settings.number_of_lines != lines {
            self.settings.number_of_lines = lines;
            self.invalidate_layout();
        }
    }

    pub fn with_number_of_lines(mut self, lines: usize) -> Self {
        self.set_number_of_lines(lines);
        self
    }

    /// Get the size of the label.
    pub fn bounds(&self) -> Size {
        self.settings.bounds
    }

    pub fn set_bounds(&mut self, bounds: Size) {
        if self.settings.bounds != bounds {
            self.settings.bounds = bounds;
            self.invalidate_layout();
        }
    }

    pub fn with_bounds(mut self, bounds: Size) -> Self {
        self.set_bounds(bounds);
        self
    }

    // =========================================================================
    // Interaction settings
    // =========================================================================

    pub fn user_interaction_enabled(&self) -> bool {
        self.user_interaction_enabled
    }

    /// Enable or disable touch handling.
    ///
    /// Disabling interaction during a press restores the content.
    pub fn set_user_interaction_enabled(&mut self, enabled: bool) {
        self.user_interaction_enabled = enabled;
        if !enabled {
            self.press.end(&mut self.text);
            if let Some(recognizer) = &mut self.tap_recognizer {
                recognizer.reset();
            }
        }
    }

    pub fn with_user_interaction_enabled(mut self, enabled: bool) -> Self {
        self.set_user_interaction_enabled(enabled);
        self
    }

    pub fn tap_config(&self) -> &TapConfig {
        &self.tap_config
    }

    pub fn set_tap_config(&mut self, config: TapConfig) {
        self.tap_config = config;
        if let Some(recognizer) = &mut self.tap_recognizer {
            recognizer.set_config(config);
        }
    }

    pub fn with_tap_config(mut self, config: TapConfig) -> Self {
        self.set_tap_config(config);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Check whether an action range is currently highlighted.
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// The highlighted range while pressed.
    pub fn pressed_range(&self) -> Option<Range<usize>> {
        self.press.pressed_range()
    }

    /// Check whether a tap recognizer is attached.
    pub fn has_tap_recognizer(&self) -> bool {
        self.tap_recognizer.is_some()
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Find the action range under a point in label coordinates.
    pub fn action_at(&self, point: Point) -> Option<ActionHit> {
        self.with_layout(|layout| layout.action_at(point)).flatten()
    }

    /// Bounding box of a character range in label coordinates.
    pub fn rect_for_characters(&self, range: Range<usize>) -> Option<Rect> {
        self.with_layout(|layout| layout.rect_for_characters(range))
            .flatten()
    }

    // =========================================================================
    // Touch override points
    // =========================================================================

    /// A touch started at `point`.
    ///
    /// Highlights the action range under the point. Misses and touches
    /// arriving while a range is already highlighted change nothing.
    pub fn touch_began(&mut self, point: Point) {
        if !self.user_interaction_enabled || self.press.is_pressed() {
            return;
        }
        let Some(hit) = self.action_at(point) else {
            return;
        };
        if let Some(content) = self.text.as_mut() {
            self.press.begin(content, &hit);
        }
    }

    /// A touch moved. The highlighted range stays the one found at touch start.
    pub fn touch_moved(&mut self, point: Point) {
        tracing::trace!(target: targets::LABEL, x = point.x, y = point.y, "touch moved");
    }

    /// A touch was lifted. Restores the content regardless of `point`.
    pub fn touch_ended(&mut self, point: Point) {
        tracing::trace!(target: targets::LABEL, x = point.x, y = point.y, "touch ended");
        self.press.end(&mut self.text);
    }

    /// A touch was cancelled. Restores the content regardless of `point`.
    pub fn touch_cancelled(&mut self, point: Point) {
        tracing::trace!(target: targets::LABEL, x = point.x, y = point.y, "touch cancelled");
        self.press.end(&mut self.text);
    }

    /// Confirm a recognized tap.
    ///
    /// Returns whether an action callback was invoked.
    pub fn handle_tap(&mut self, event: &TapGestureEvent) -> bool {
        self.tap_at(event.local_pos)
    }

    /// Confirm a tap at `point` in label coordinates.
    ///
    /// Invokes the callback of the action range under the point with the
    /// tapped substring, or with the attachment when the range starts with
    /// one. Returns whether a callback was invoked.
    pub fn tap_at(&mut self, point: Point) -> bool {
        if !self.user_interaction_enabled {
            return false;
        }
        let Some(hit) = self.action_at(point) else {
            return false;
        };
        let Some(result) = self
            .text
            .as_ref()
            .and_then(|text| ActionResult::from_range(text, hit.range.clone()))
        else {
            return false;
        };

        tracing::debug!(
            target: targets::LABEL,
            start = hit.range.start,
            end = hit.range.end,
            attachment = result.content.is_attachment(),
            "invoking action"
        );
        hit.action.invoke(&result);
        true
    }

    /// Dispatch a touch event.
    ///
    /// The first touch point drives the override points. When a tap
    /// recognizer is attached it sees the whole event, and a recognized
    /// tap is confirmed after the highlight has been restored. Returns
    /// whether an action callback was invoked.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        if !self.user_interaction_enabled {
            return false;
        }

        if let Some(point) = event.primary().copied() {
            match point.phase {
                TouchPhase::Started => self.touch_began(point.local_pos),
                TouchPhase::Moved => self.touch_moved(point.local_pos),
                TouchPhase::Ended => self.touch_ended(point.local_pos),
                TouchPhase::Cancelled => self.touch_cancelled(point.local_pos),
            }
        }

        let tap = self
            .tap_recognizer
            .as_mut()
            .and_then(|recognizer| recognizer.process_touch(event));
        match tap {
            Some(tap) => self.handle_tap(&tap),
            None => false,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Invalidate the cached layout.
    fn invalidate_layout(&self) {
        *self.cached_layout.write() = None;
    }

    /// Run `f` on the layout of the displayed content, rebuilding it if stale.
    fn with_layout<R>(&self, f: impl FnOnce(&MirroredLayout) -> R) -> Option<R> {
        let content = self.text.as_ref()?;

        {
            let cached = self.cached_layout.read();
            if let Some(layout) = cached
                .as_ref()
                .filter(|layout| layout.matches(content, &self.settings))
            {
                return Some(f(layout));
            }
        }

        let layout = {
            let mut engine = self.engine.lock();
            MirroredLayout::build(&mut **engine, content, &self.settings)
        };
        let result = f(&layout);
        *self.cached_layout.write() = Some(layout);
        Some(result)
    }

    fn update_tap_recognizer(&mut self) {
        let has_actions = self.text.as_ref().is_some_and(StyledText::contains_action);
        // Assigning action-bearing text always turns interaction back on.
        if has_actions {
            self.user_interaction_enabled = true;
        }
        match (has_actions, self.tap_recognizer.is_some()) {
            (true, false) => {
                self.tap_recognizer = Some(TapRecognizer::with_config(self.tap_config));
                tracing::debug!(target: targets::LABEL, "tap recognizer attached");
            }
            (false, true) => {
                self.tap_recognizer = None;
                tracing::debug!(target: targets::LABEL, "tap recognizer detached");
            }
            _ => {}
        }
    }
}

impl fmt::Debug for TappableLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TappableLabel")
            .field("text", &self.text)
            .field("settings", &self.settings)
            .field("user_interaction_enabled", &self.user_interaction_enabled)
            .field("tap_config", &self.tap_config)
            .field("has_tap_recognizer", &self.tap_recognizer.is_some())
            .field("press", self.press.state())
            .finish_non_exhaustive()
    }
}

// Ensure TappableLabel is Send + Sync
static_assertions::assert_impl_all!(TappableLabel: Send, Sync);
