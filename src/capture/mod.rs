//! Screen region capture and binarization.
//!
//! This module provides:
//! - The `ScreenCapture` seam used by the purchase loop
//! - GDI region capture on Windows (`GdiScreenCapture`)
//! - `capture_binarized`, which turns a region into an OCR-ready image

pub mod screen;

#[cfg(windows)]
pub use screen::{primary_screen_size, GdiScreenCapture};

use anyhow::Result;
use image::{GrayImage, RgbaImage};
use std::path::Path;

use crate::automation::config::ScreenRect;
use crate::ocr::binarize_luminance;

/// Luminance threshold for the card name region.
pub const NAME_THRESHOLD: u8 = 100;
/// Luminance threshold for the card price region.
pub const PRICE_THRESHOLD: u8 = 55;

/// Captures pixels of a rectangle given in absolute screen coordinates.
pub trait ScreenCapture {
    fn capture_region(&self, rect: ScreenRect) -> Result<RgbaImage>;
}

/// Captures `rect` and binarizes it at `threshold`.
///
/// Returns `None` when the capture fails; the failure is logged and the
/// caller skips the cycle. When `debug_image` is set the binarized image is
/// also written there.
pub fn capture_binarized(
    screen: &dyn ScreenCapture,
    rect: ScreenRect,
    threshold: u8,
    debug_image: Option<&Path>,
) -> Option<GrayImage> {
    let captured = match screen.capture_region(rect) {
        Ok(img) => img,
        Err(e) => {
            crate::log(&format!(
                "Warning: capture of ({}, {}) {}x{} failed: {}",
                rect.x, rect.y, rect.width, rect.height, e
            ));
            return None;
        }
    };

    let binary = binarize_luminance(&captured, threshold);

    if let Some(path) = debug_image {
        if let Err(e) = binary.save(path) {
            crate::log(&format!(
                "Warning: could not save debug image {}: {}",
                path.display(),
                e
            ));
        }
    }

    Some(binary)
}
