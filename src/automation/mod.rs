//! Card purchase automation.
//!
//! This module provides:
//! - Configuration loading and the validated `BotConfig`
//! - The accept/reject evaluator
//! - The per-target purchase cycle and the run loop around it
//! - Input injection, start/stop hotkeys and the purchase log

pub mod actuator;
pub mod config;
pub mod controller;
pub mod evaluator;
pub mod hotkey;
pub mod input;
pub mod purchase_log;
pub mod state;

#[cfg(test)]
mod fakes;

pub use actuator::Workbench;
pub use config::{BotConfig, ConfigDocument};
pub use controller::Controller;
pub use hotkey::{spawn_hotkey_listener, START_KEY_NAME, STOP_KEY_NAME};
pub use input::InputDriver;
pub use purchase_log::PurchaseLog;
pub use state::RunStateCell;

#[cfg(windows)]
pub use input::SendInputDriver;
