//! Screen capture using GDI.
//!
//! The game renders to the desktop, so a BitBlt from the screen DC is enough;
//! no window handle or Graphics Capture session is needed.

#![cfg(windows)]

use anyhow::{anyhow, Result};
use image::RgbaImage;

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    HGDIOBJ, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use super::ScreenCapture;
use crate::automation::config::ScreenRect;

/// Returns the primary screen size in pixels.
pub fn primary_screen_size() -> (u32, u32) {
    let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    (width.max(0) as u32, height.max(0) as u32)
}

/// Captures regions of the primary screen.
pub struct GdiScreenCapture;

impl ScreenCapture for GdiScreenCapture {
    fn capture_region(&self, rect: ScreenRect) -> Result<RgbaImage> {
        let (screen_width, screen_height) = primary_screen_size();
        let right = rect.x as i64 + rect.width as i64;
        let bottom = rect.y as i64 + rect.height as i64;
        if rect.x < 0 || rect.y < 0 || right > screen_width as i64 || bottom > screen_height as i64
        {
            return Err(anyhow!(
                "region ({}, {}) {}x{} is outside the {}x{} screen",
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                screen_width,
                screen_height
            ));
        }

        let width = rect.width as i32;
        let height = rect.height as i32;
        let mut buffer = vec![0u8; rect.width as usize * rect.height as usize * 4];

        let mut info = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: width,
                // Negative height = top-down rows
                biHeight: -height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let copied_lines = unsafe {
            let screen_dc = GetDC(HWND::default());
            if screen_dc.is_invalid() {
                return Err(anyhow!("GetDC failed"));
            }
            let mem_dc = CreateCompatibleDC(screen_dc);
            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            let previous = SelectObject(mem_dc, HGDIOBJ(bitmap.0));

            let blit = BitBlt(
                mem_dc, 0, 0, width, height, screen_dc, rect.x, rect.y, SRCCOPY,
            );
            let lines = if blit.is_ok() {
                GetDIBits(
                    mem_dc,
                    bitmap,
                    0,
                    rect.height,
                    Some(buffer.as_mut_ptr() as *mut std::ffi::c_void),
                    &mut info,
                    DIB_RGB_COLORS,
                )
            } else {
                0
            };

            SelectObject(mem_dc, previous);
            let _ = DeleteObject(HGDIOBJ(bitmap.0));
            let _ = DeleteDC(mem_dc);
            ReleaseDC(HWND::default(), screen_dc);

            blit?;
            lines
        };

        if copied_lines <= 0 {
            return Err(anyhow!("GetDIBits copied no lines"));
        }

        // BGRA -> RGBA, GDI leaves alpha undefined
        for pixel in buffer.chunks_exact_mut(4) {
            pixel.swap(0, 2);
            pixel[3] = 255;
        }

        RgbaImage::from_raw(rect.width, rect.height, buffer)
            .ok_or_else(|| anyhow!("captured buffer does not match region size"))
    }
}
