//! Run state shared between the hotkey thread and the purchase loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Waiting for the start hotkey (initial state)
    Idle,
    /// Sweeping the active target list
    Running,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
        }
    }
}

/// Cloneable handle to the run state. Starts `Idle`.
///
/// The hotkey thread only writes; the loop polls before each sweep and each
/// target.
#[derive(Debug, Clone, Default)]
pub struct RunStateCell(Arc<AtomicBool>);

impl RunStateCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Idle | Running -> Running`. Returns the previous state.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub fn start(&self) -> RunState {
        Self::from_flag(self.0.swap(true, Ordering::SeqCst))
    }

    /// Any state `-> Idle`. Returns the previous state.
    #[cfg_attr(not(windows), allow(dead_code))]
    pub fn stop(&self) -> RunState {
        Self::from_flag(self.0.swap(false, Ordering::SeqCst))
    }

    pub fn get(&self) -> RunState {
        Self::from_flag(self.0.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.get() == RunState::Running
    }

    fn from_flag(running: bool) -> RunState {
        if running {
            RunState::Running
        } else {
            RunState::Idle
        }
    }
}
