//! Global start/stop hotkeys.
//!
//! F8 starts the purchase loop, F9 stops it. The listener thread only writes
//! the shared run state.

use anyhow::Result;

use crate::automation::state::RunStateCell;

pub const START_KEY_NAME: &str = "F8";
pub const STOP_KEY_NAME: &str = "F9";

/// Whether a `GetMessageW` return value carries a message.
///
/// 0 means WM_QUIT and -1 means the call failed; both end the loop.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn message_received(ret: i32) -> bool {
    ret > 0
}

/// Spawns the listener thread and waits until both hotkeys are registered.
#[cfg(windows)]
pub fn spawn_hotkey_listener(run_state: RunStateCell) -> Result<()> {
    use anyhow::{anyhow, Context};
    use std::sync::mpsc;

    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        RegisterHotKey, UnregisterHotKey, MOD_NOREPEAT, VK_F8, VK_F9,
    };
    use windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY};

    use crate::automation::state::RunState;

    const HOTKEY_START: i32 = 1;
    const HOTKEY_STOP: i32 = 2;

    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

    std::thread::Builder::new()
        .name("hotkeys".to_string())
        .spawn(move || {
            // Hotkeys registered without a window post WM_HOTKEY to this thread's queue
            let registered = unsafe {
                RegisterHotKey(HWND::default(), HOTKEY_START, MOD_NOREPEAT, VK_F8.0 as u32)
                    .and_then(|_| {
                        RegisterHotKey(HWND::default(), HOTKEY_STOP, MOD_NOREPEAT, VK_F9.0 as u32)
                    })
            };
            if let Err(e) = registered {
                unsafe {
                    let _ = UnregisterHotKey(HWND::default(), HOTKEY_START);
                }
                let _ = ready_tx.send(Err(e.to_string()));
                return;
            }
            let _ = ready_tx.send(Ok(()));

            let mut msg = MSG::default();
            unsafe {
                loop {
                    let ret = GetMessageW(&mut msg, HWND::default(), 0, 0).0;
                    if !message_received(ret) {
                        if ret < 0 {
                            crate::log(&format!(
                                "Error: hotkey listener stopped: {}",
                                windows::core::Error::from_win32()
                            ));
                        }
                        break;
                    }
                    if msg.message != WM_HOTKEY {
                        continue;
                    }
                    match msg.wParam.0 as i32 {
                        HOTKEY_START => {
                            if run_state.start() != RunState::Running {
                                crate::log("Started");
                            }
                        }
                        HOTKEY_STOP => {
                            if run_state.stop() != RunState::Idle {
                                crate::log("Stopping after the current card");
                            }
                        }
                        _ => {}
                    }
                }
                let _ = UnregisterHotKey(HWND::default(), HOTKEY_START);
                let _ = UnregisterHotKey(HWND::default(), HOTKEY_STOP);
            }
        })
        .context("Failed to spawn hotkey thread")?;

    ready_rx
        .recv()
        .context("Hotkey thread exited before registering")?
        .map_err(|e| {
            anyhow!(
                "Failed to register {}/{} hotkeys: {}",
                START_KEY_NAME,
                STOP_KEY_NAME,
                e
            )
        })
}

#[cfg(not(windows))]
pub fn spawn_hotkey_listener(_run_state: RunStateCell) -> Result<()> {
    anyhow::bail!("global hotkeys are only supported on Windows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_loop_ends_on_quit_and_error() {
        assert!(message_received(1));
        assert!(!message_received(0));
        assert!(!message_received(-1));
    }
}
