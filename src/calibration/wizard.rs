//! Interactive picking with global hotkeys.
//!
//! F1 records a point, F2/F3 record the corners of a region, Escape aborts.
//! The cursor position is read at the moment the key is pressed.

use anyhow::Result;

use crate::calibration::state::{CalibrationField, Pick};

/// Blocks until the operator picks a value for `field`.
///
/// Returns `None` when calibration was cancelled.
#[cfg(windows)]
pub fn pick(field: CalibrationField) -> Result<Option<Pick>> {
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        RegisterHotKey, UnregisterHotKey, MOD_NOREPEAT, VK_ESCAPE, VK_F1, VK_F2, VK_F3,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY};

    use crate::automation::hotkey::message_received;
    use crate::calibration::coords::get_cursor_position;
    use crate::calibration::state::{CalibrationStep, PickEvent, Picker};
    use crate::log;

    const HOTKEY_CAL_F1: i32 = 100;
    const HOTKEY_CAL_F2: i32 = 101;
    const HOTKEY_CAL_F3: i32 = 102;
    const HOTKEY_CAL_ESCAPE: i32 = 103;
    const HOTKEYS: [i32; 4] = [HOTKEY_CAL_F1, HOTKEY_CAL_F2, HOTKEY_CAL_F3, HOTKEY_CAL_ESCAPE];

    let unregister = || unsafe {
        for id in HOTKEYS {
            let _ = UnregisterHotKey(HWND::default(), id);
        }
    };

    let registered = unsafe {
        RegisterHotKey(HWND::default(), HOTKEY_CAL_F1, MOD_NOREPEAT, VK_F1.0 as u32)
            .and_then(|_| {
                RegisterHotKey(HWND::default(), HOTKEY_CAL_F2, MOD_NOREPEAT, VK_F2.0 as u32)
            })
            .and_then(|_| {
                RegisterHotKey(HWND::default(), HOTKEY_CAL_F3, MOD_NOREPEAT, VK_F3.0 as u32)
            })
            .and_then(|_| {
                RegisterHotKey(
                    HWND::default(),
                    HOTKEY_CAL_ESCAPE,
                    MOD_NOREPEAT,
                    VK_ESCAPE.0 as u32,
                )
            })
    };
    if let Err(e) = registered {
        unregister();
        return Err(e.into());
    }

    let mut picker = Picker::new(field);
    log(&format!("Calibrating: {}", field.description()));
    log(&format!("  {}", picker.step().instructions()));
    log("  Escape - Abort calibration");

    let mut msg = MSG::default();
    let mut failure = None;
    unsafe {
        while !picker.is_finished() {
            let ret = GetMessageW(&mut msg, HWND::default(), 0, 0).0;
            if !message_received(ret) {
                if ret < 0 {
                    let error = anyhow::Error::from(windows::core::Error::from_win32());
                    failure = Some(error.context("hotkey message loop failed"));
                }
                break;
            }
            if msg.message != WM_HOTKEY {
                continue;
            }
            let id = msg.wParam.0 as i32;
            let event = if id == HOTKEY_CAL_ESCAPE {
                PickEvent::Cancel
            } else {
                let (x, y) = match get_cursor_position() {
                    Ok(pos) => pos,
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                };
                match id {
                    HOTKEY_CAL_F1 => PickEvent::Point(x, y),
                    HOTKEY_CAL_F2 => PickEvent::TopLeft(x, y),
                    HOTKEY_CAL_F3 => PickEvent::BottomRight(x, y),
                    _ => continue,
                }
            };
            if picker.handle(event) && !picker.is_finished() {
                log(&format!("  {}", picker.step().instructions()));
            }
        }
    }
    unregister();

    if let Some(e) = failure {
        return Err(e);
    }
    match picker.step() {
        CalibrationStep::Picked(pick) => Ok(Some(*pick)),
        _ => Ok(None),
    }
}

#[cfg(not(windows))]
pub fn pick(_field: CalibrationField) -> Result<Option<Pick>> {
    anyhow::bail!("calibration needs the Windows desktop")
}
