//! Actions attached to ranges of styled text.
//!
//! An [`Action`] pairs the highlight styles shown while a range is pressed
//! with the callback invoked when a tap on the range is confirmed.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::attributes::{Attachment, Attributes};
use super::styled_text::StyledText;

/// Callback invoked with the result of a confirmed tap.
pub type ActionCallback = Arc<dyn Fn(&ActionResult) + Send + Sync>;

/// The highlight styles and callback behind an [`Action`].
#[derive(Clone)]
pub struct ActionModel {
    /// Attribute sets merged over the range while it is pressed, in order.
    pub highlights: Vec<Attributes>,
    /// Invoked when a tap on the range is confirmed.
    pub callback: ActionCallback,
}

impl fmt::Debug for ActionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionModel")
            .field("highlights", &self.highlights)
            .finish_non_exhaustive()
    }
}

/// A shared handle to an [`ActionModel`].
///
/// Cloning is cheap. Two handles are equal only when they refer to the same
/// model, so adjacent runs tagged with clones of one action form a single
/// contiguous action range.
///
/// # Example
///
/// ```
/// use taplabel_text::Color;
/// use taplabel_text::text::{Action, Attributes};
///
/// let action = Action::new(|result| println!("tapped {:?}", result.range))
///     .with_highlight(Attributes::new().background(Color::LIGHT_GRAY));
///
/// assert_eq!(action, action.clone());
/// assert_eq!(action.highlights().len(), 1);
/// ```
#[derive(Clone)]
pub struct Action(Arc<ActionModel>);

impl Action {
    /// Create an action with no highlight styles.
    pub fn new(callback: impl Fn(&ActionResult) + Send + Sync + 'static) -> Self {
        Self(Arc::new(ActionModel {
            highlights: Vec::new(),
            callback: Arc::new(callback),
        }))
    }

    /// Append a highlight attribute set.
    ///
    /// Sets appended later override earlier ones where keys conflict.
    pub fn with_highlight(mut self, highlight: Attributes) -> Self {
        Arc::make_mut(&mut self.0).highlights.push(highlight);
        self
    }

    pub fn model(&self) -> &ActionModel {
        &self.0
    }

    pub fn highlights(&self) -> &[Attributes] {
        &self.0.highlights
    }

    /// Fold every highlight set into one, later sets overriding earlier ones.
    pub fn merged_highlight(&self) -> Attributes {
        self.0
            .highlights
            .iter()
            .fold(Attributes::new(), |acc, highlight| acc.merged(highlight))
    }

    /// Invoke the callback.
    pub fn invoke(&self, result: &ActionResult) {
        (self.0.callback)(result)
    }

    /// Check whether two handles refer to the same model.
    pub fn ptr_eq(&self, other: &Action) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action")
            .field(&Arc::as_ptr(&self.0))
            .finish()
    }
}

/// What a confirmed tap landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum TapContent {
    /// The styled substring covered by the action range.
    Text(StyledText),
    /// The attachment when the range holds a single attachment.
    Attachment(Attachment),
}

impl TapContent {
    pub fn as_text(&self) -> Option<&StyledText> {
        match self {
            TapContent::Text(text) => Some(text),
            TapContent::Attachment(_) => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            TapContent::Text(_) => None,
            TapContent::Attachment(attachment) => Some(attachment),
        }
    }

    pub fn is_attachment(&self) -> bool {
        matches!(self, TapContent::Attachment(_))
    }
}

/// The argument passed to an action callback.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    /// Character range of the tapped action.
    pub range: Range<usize>,
    pub content: TapContent,
}

impl ActionResult {
    /// Build the result for a tap on `range` of `text`.
    ///
    /// A range whose first character carries an attachment reports the
    /// attachment; any other range reports its styled substring.
    pub fn from_range(text: &StyledText, range: Range<usize>) -> Option<Self> {
        let substring = text.substring(range.clone()).ok()?;
        let content = match substring.attachment_at(0) {
            Some(attachment) => TapContent::Attachment(attachment),
            None => TapContent::Text(substring),
        };
        Some(Self { range, content })
    }
}
