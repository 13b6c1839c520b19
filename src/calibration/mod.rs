//! Calibration of screen regions and click positions.
//!
//! The operator points at the screen and presses hotkeys; the picked value is
//! written back into config.json and reported as one JSON line.

pub mod coords;
pub mod state;
pub mod tool;
pub mod wizard;

pub use state::{CalibrationField, Pick};
pub use tool::{apply_pick, apply_recognized_name, failure_line, success_line};
pub use wizard::pick;
