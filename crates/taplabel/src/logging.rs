//! Logging facilities for taplabel.
//!
//! taplabel reports through the `tracing` crate. Nothing is printed unless
//! the host installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("taplabel::press=debug,taplabel::hit_test=trace")
//!         .init();
//! }
//! ```
//!
//! Hit-test misses are reported at `trace` level. Hits, highlight changes,
//! recognizer attachment and callback invocations are reported at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Layout mirror hit tests.
    pub const HIT_TEST: &str = "taplabel::hit_test";
    /// Highlight apply and restore.
    pub const PRESS: &str = "taplabel::press";
    /// Tap recognition.
    pub const GESTURE: &str = "taplabel::gesture";
    /// Label content and recognizer management.
    pub const LABEL: &str = "taplabel::label";
}
