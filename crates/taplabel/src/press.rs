//! Highlight state while an action range is pressed.
//!
//! A press snapshots the displayed content, merges the action's highlight
//! styles over the pressed range and shows the result. Releasing restores
//! the snapshot exactly, wherever the touch ends.

use std::ops::Range;

use taplabel_text::text::StyledText;

use crate::hit_test::ActionHit;
use crate::logging::targets;

/// Press state of a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PressState {
    #[default]
    Idle,
    /// An action range is highlighted.
    Pressed {
        /// Content as it was before the highlight.
        snapshot: StyledText,
        /// The highlighted range.
        range: Range<usize>,
    },
}

/// Applies and reverts the pressed highlight.
#[derive(Debug, Default)]
pub struct PressController {
    state: PressState,
}

impl PressController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PressState {
        &self.state
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PressState::Pressed { .. })
    }

    /// The highlighted range while pressed.
    pub fn pressed_range(&self) -> Option<Range<usize>> {
        match &self.state {
            PressState::Idle => None,
            PressState::Pressed { range, .. } => Some(range.clone()),
        }
    }

    /// Highlight the range of `hit` in `content`.
    ///
    /// Ignored while a press is already active. Returns whether the
    /// highlight was applied.
    pub fn begin(&mut self, content: &mut StyledText, hit: &ActionHit) -> bool {
        if self.is_pressed() {
            tracing::trace!(target: targets::PRESS, "already pressed, ignoring touch");
            return false;
        }

        let highlight = hit.action.merged_highlight();
        let highlighted = match content.highlighted(hit.range.clone(), &highlight) {
            Ok(highlighted) => highlighted,
            Err(err) => {
                tracing::warn!(target: targets::PRESS, %err, "cannot highlight action range");
                return false;
            }
        };

        let snapshot = std::mem::replace(content, highlighted);
        tracing::debug!(
            target: targets::PRESS,
            start = hit.range.start,
            end = hit.range.end,
            "highlight applied"
        );
        self.state = PressState::Pressed {
            snapshot,
            range: hit.range.clone(),
        };
        true
    }

    /// Restore the content saved by [`begin`](Self::begin).
    ///
    /// Returns whether a press was active.
    pub fn end(&mut self, content: &mut Option<StyledText>) -> bool {
        match std::mem::take(&mut self.state) {
            PressState::Idle => false,
            PressState::Pressed { snapshot, range } => {
                *content = Some(snapshot);
                tracing::debug!(
                    target: targets::PRESS,
                    start = range.start,
                    end = range.end,
                    "highlight restored"
                );
                true
            }
        }
    }

    /// Drop an active press without restoring its snapshot.
    pub fn discard(&mut self) {
        if let PressState::Pressed { range, .. } = std::mem::take(&mut self.state) {
            tracing::debug!(
                target: targets::PRESS,
                start = range.start,
                end = range.end,
                "press discarded"
            );
        }
    }
}
