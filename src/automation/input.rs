//! Mouse and keyboard input for UI automation.
//!
//! The shop ignores posted window messages, so input is injected with
//! SendInput. This moves the real cursor.

use anyhow::Result;

/// Pointer and key actions the purchase loop performs.
pub trait InputDriver {
    /// Screen size in pixels, used to scale normalized positions.
    fn screen_size(&self) -> (u32, u32);
    /// Moves the cursor to absolute screen pixels.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;
    /// Left click at the current cursor position.
    fn click(&mut self) -> Result<()>;
    /// Presses and releases Escape.
    fn press_escape(&mut self) -> Result<()>;
}

/// Converts screen pixels to the 0-65535 range used by `MOUSEEVENTF_ABSOLUTE`.
#[cfg_attr(not(windows), allow(dead_code))]
pub fn to_absolute(x: i32, y: i32, screen_size: (u32, u32)) -> (i32, i32) {
    let (width, height) = screen_size;
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let norm_x = (x as i64 * 65535) / width as i64;
    let norm_y = (y as i64 * 65535) / height as i64;
    (norm_x.clamp(0, 65535) as i32, norm_y.clamp(0, 65535) as i32)
}

#[cfg(windows)]
pub use self::send_input::SendInputDriver;

#[cfg(windows)]
mod send_input {
    use anyhow::{anyhow, Result};
    use std::time::Duration;

    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
        KEYEVENTF_KEYUP, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
        MOUSEEVENTF_MOVE, MOUSEINPUT, MOUSE_EVENT_FLAGS, VK_ESCAPE,
    };

    use super::{to_absolute, InputDriver};
    use crate::capture::primary_screen_size;

    /// Gap between button down and up so the game registers the press.
    const PRESS_HOLD: Duration = Duration::from_millis(50);

    pub struct SendInputDriver {
        screen_size: (u32, u32),
    }

    impl SendInputDriver {
        pub fn new() -> Self {
            Self {
                screen_size: primary_screen_size(),
            }
        }
    }

    impl InputDriver for SendInputDriver {
        fn screen_size(&self) -> (u32, u32) {
            self.screen_size
        }

        fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
            let (norm_x, norm_y) = to_absolute(x, y, self.screen_size);
            send(mouse(norm_x, norm_y, MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE), "mouse move")
        }

        fn click(&mut self) -> Result<()> {
            send(mouse(0, 0, MOUSEEVENTF_LEFTDOWN), "mouse down")?;
            std::thread::sleep(PRESS_HOLD);
            send(mouse(0, 0, MOUSEEVENTF_LEFTUP), "mouse up")
        }

        fn press_escape(&mut self) -> Result<()> {
            send(key(KEYBD_EVENT_FLAGS(0)), "escape down")?;
            std::thread::sleep(PRESS_HOLD);
            send(key(KEYEVENTF_KEYUP), "escape up")
        }
    }

    fn mouse(dx: i32, dy: i32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    dwFlags: flags,
                    ..Default::default()
                },
            },
        }
    }

    fn key(flags: KEYBD_EVENT_FLAGS) -> INPUT {
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VK_ESCAPE,
                    dwFlags: flags,
                    ..Default::default()
                },
            },
        }
    }

    fn send(input: INPUT, what: &str) -> Result<()> {
        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent != 1 {
            return Err(anyhow!("SendInput rejected {}", what));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_absolute() {
        assert_eq!(to_absolute(0, 0, (1920, 1080)), (0, 0));
        assert_eq!(to_absolute(960, 540, (1920, 1080)), (32767, 32767));
        assert_eq!(to_absolute(1920, 1080, (1920, 1080)), (65535, 65535));
    }

    #[test]
    fn test_to_absolute_clamps() {
        assert_eq!(to_absolute(-10, 5000, (1920, 1080)), (0, 65535));
        assert_eq!(to_absolute(10, 10, (0, 0)), (0, 0));
    }
}
