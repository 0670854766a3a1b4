//! The layout engine seam.

use super::layout::{LayoutConfig, TextLayout};
use super::styled_text::StyledText;

/// Something that can lay out styled text in a container.
///
/// Engines take `&mut self` so they may keep shaping caches between
/// passes. Implementations must be deterministic: laying out equal text
/// with an equal configuration yields an equal layout.
pub trait LayoutEngine: Send {
    /// Lay out `text` according to `config`.
    fn layout(&mut self, text: &StyledText, config: &LayoutConfig) -> TextLayout;
}

impl<E: LayoutEngine + ?Sized> LayoutEngine for Box<E> {
    fn layout(&mut self, text: &StyledText, config: &LayoutConfig) -> TextLayout {
        (**self).layout(text, config)
    }
}
