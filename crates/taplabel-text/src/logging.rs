//! Log targets for taplabel-text.
//!
//! Font loading is reported at `debug`. Layout passes of the cosmic-text
//! engine are reported at `trace`.

/// Target names for log filtering.
pub mod targets {
    /// Font database setup and font loading.
    pub const FONT: &str = "taplabel_text::font";
    /// Layout engine passes.
    pub const LAYOUT: &str = "taplabel_text::layout";
}
