//! Coordinate conversion utilities.
//!
//! Points are stored as fractions of the primary screen, regions in absolute
//! screen pixels.

use crate::automation::config::{NormalizedPoint, ScreenRect};

/// Gets the current cursor position in screen coordinates.
#[cfg(windows)]
pub fn get_cursor_position() -> anyhow::Result<(i32, i32)> {
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    let mut pt = POINT::default();
    unsafe {
        GetCursorPos(&mut pt)?;
    }
    Ok((pt.x, pt.y))
}

/// Converts a screen point to fractions of the screen, rounded to 4 decimals
/// and clamped to 0.0-1.0.
pub fn normalize_point(point: (i32, i32), screen_size: (u32, u32)) -> NormalizedPoint {
    let fraction = |value: i32, extent: u32| {
        if extent == 0 {
            return 0.0;
        }
        let raw = (value as f64 / extent as f64).clamp(0.0, 1.0);
        (raw * 10_000.0).round() / 10_000.0
    };
    NormalizedPoint {
        x: fraction(point.0, screen_size.0),
        y: fraction(point.1, screen_size.1),
    }
}

/// Builds a rectangle from two opposite corners in any order.
///
/// Returns `None` when the rectangle has no area.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn rect_from_corners(a: (i32, i32), b: (i32, i32)) -> Option<ScreenRect> {
    let width = (a.0 - b.0).unsigned_abs();
    let height = (a.1 - b.1).unsigned_abs();
    if width == 0 || height == 0 {
        return None;
    }
    Some(ScreenRect {
        x: a.0.min(b.0),
        y: a.1.min(b.1),
        width,
        height,
    })
}
