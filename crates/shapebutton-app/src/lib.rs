//! ShapeButton command-line preview.
//!
//! Loads a shapes file, measures and draws it headlessly, and replays taps.

mod preview;

pub use preview::{PreviewArgs, PreviewError, PreviewReport, USAGE, format_report, run};
