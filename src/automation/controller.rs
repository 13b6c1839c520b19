//! Purchase loop driven by the shared run state.
//!
//! While Running, each sweep walks a snapshot of the active targets in config
//! order with a `target_interval` pause after every card. The run state is
//! checked before every target, so a stop takes effect after the cycle in
//! flight finishes.

use crate::automation::actuator::{PurchaseCycle, PurchaseOutcome, Workbench};
use crate::automation::config::{BotConfig, Target};
use crate::automation::state::RunStateCell;
use crate::error::{ConfigError, CycleError};

pub struct Controller {
    config: BotConfig,
    run_state: RunStateCell,
    bench: Workbench,
    active: Vec<Target>,
    reported_empty: bool,
}

impl Controller {
    pub fn new(config: BotConfig, run_state: RunStateCell, bench: Workbench) -> Self {
        let active = config.active_targets();
        Self {
            config,
            run_state,
            bench,
            active,
            reported_empty: false,
        }
    }

    /// Targets still being bought.
    #[cfg(test)]
    pub fn active_targets(&self) -> &[Target] {
        &self.active
    }

    /// Runs until the process exits.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// One iteration of the outer loop: a sweep when Running, a short sleep
    /// otherwise.
    pub fn tick(&mut self) {
        if !self.run_state.is_running() {
            std::thread::sleep(self.config.timing.idle_poll);
            return;
        }

        if self.active.is_empty() {
            if !self.reported_empty {
                crate::log("No cards left to buy, idling until restart");
                self.reported_empty = true;
            }
            std::thread::sleep(self.config.timing.idle_poll);
            return;
        }

        self.sweep();
    }

    /// Walks the active list once. Returns the number of purchases.
    pub fn sweep(&mut self) -> usize {
        let snapshot = self.active.clone();
        let mut purchases = 0;

        for target in &snapshot {
            if !self.run_state.is_running() {
                crate::log("Stopped, ending sweep");
                break;
            }

            let outcome = PurchaseCycle::new(&mut self.bench, &self.config, target).run();
            match outcome {
                PurchaseOutcome::Purchased {
                    name,
                    price,
                    premium_pct,
                } => {
                    purchases += 1;
                    if !self.config.loop_mode {
                        self.active.retain(|t| t.id != target.id);
                        crate::log(&format!(
                            "{} bought at {} ({:+.2}%), {} card(s) left",
                            name,
                            price,
                            premium_pct,
                            self.active.len()
                        ));
                    }
                }
                PurchaseOutcome::Rejected(_) => {}
                PurchaseOutcome::Skipped(error) => log_skip(target, &error),
            }

            std::thread::sleep(self.config.timing.target_interval);
        }

        purchases
    }
}

fn log_skip(target: &Target, error: &CycleError) {
    let level = match error {
        CycleError::Config(ConfigError::NonPositiveIdealPrice { .. }) => "Error",
        _ => "Warning",
    };
    crate::log(&format!("{}: skipped {}: {}", level, target.label(), error));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::fakes::{self, Action};
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    fn running() -> RunStateCell {
        let state = RunStateCell::new();
        state.start();
        state
    }

    fn log_lines(bench_dir: &std::path::Path) -> usize {
        std::fs::read_to_string(bench_dir.join("purchases.log"))
            .map(|content| content.lines().count())
            .unwrap_or(0)
    }

    #[test]
    fn test_idle_does_nothing() {
        let dir = tempdir().unwrap();
        let (bench, actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], false, false);
        let mut controller = Controller::new(config, RunStateCell::new(), bench);

        controller.tick();

        assert!(actions.borrow().is_empty());
        assert_eq!(controller.active_targets().len(), 1);
    }

    #[test]
    fn test_inactive_targets_are_not_swept() {
        let dir = tempdir().unwrap();
        let (bench, actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let mut inactive = fakes::target(0, "RedKey", 100.0);
        inactive.want_buy = false;
        let config = fakes::config(vec![inactive], false, false);
        let mut controller = Controller::new(config, running(), bench);

        controller.tick();

        assert!(controller.active_targets().is_empty());
        assert!(actions.borrow().is_empty());
    }

    #[test]
    fn test_purchase_removes_target_once() {
        let dir = tempdir().unwrap();
        let (bench, actions) = fakes::bench(dir.path(), &["RedKey", "BlueKey"], &["90", "500"]);
        let config = fakes::config(
            vec![
                fakes::target(0, "RedKey", 100.0),
                fakes::target(1, "BlueKey", 100.0),
            ],
            false,
            false,
        );
        let mut controller = Controller::new(config, running(), bench);

        assert_eq!(controller.sweep(), 1);
        let left: Vec<usize> = controller.active_targets().iter().map(|t| t.id).collect();
        assert_eq!(left, vec![1]);
        assert_eq!(log_lines(dir.path()), 1);

        // Second sweep only visits the remaining target
        actions.borrow_mut().clear();
        controller.sweep();
        assert!(!actions.borrow().contains(&Action::Move(100, 200)));
        assert_eq!(log_lines(dir.path()), 1);
    }

    #[test]
    fn test_empty_list_idles() {
        let dir = tempdir().unwrap();
        let (bench, actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], false, false);
        let mut controller = Controller::new(config, running(), bench);

        controller.tick();
        assert!(controller.active_targets().is_empty());
        let after_first = actions.borrow().len();

        controller.tick();
        controller.tick();
        assert_eq!(actions.borrow().len(), after_first);
        assert_eq!(log_lines(dir.path()), 1);
    }

    #[test]
    fn test_loop_mode_keeps_buying() {
        let dir = tempdir().unwrap();
        let (bench, _actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], true, false);
        let mut controller = Controller::new(config, running(), bench);

        for _ in 0..3 {
            assert_eq!(controller.sweep(), 1);
            assert_eq!(controller.active_targets().len(), 1);
        }
        assert_eq!(log_lines(dir.path()), 3);
    }

    #[test]
    fn test_single_target_loop_pauses_every_cycle() {
        let dir = tempdir().unwrap();
        let (bench, _actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let mut config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], true, false);
        config.timing.target_interval = Duration::from_millis(20);
        let mut controller = Controller::new(config, running(), bench);

        let started = Instant::now();
        for _ in 0..3 {
            controller.tick();
        }
        assert!(started.elapsed() >= Duration::from_millis(60));
        assert_eq!(log_lines(dir.path()), 3);
    }

    #[test]
    fn test_capture_failure_keeps_target() {
        let dir = tempdir().unwrap();
        let (mut bench, actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        fakes::failing_screen(&mut bench, &actions);
        let config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], false, false);
        let mut controller = Controller::new(config, running(), bench);

        assert_eq!(controller.sweep(), 0);
        assert_eq!(controller.active_targets().len(), 1);
        assert_eq!(log_lines(dir.path()), 0);
        assert_eq!(actions.borrow().last(), Some(&Action::Escape));
    }

    #[test]
    fn test_extraction_failure_keeps_target() {
        let dir = tempdir().unwrap();
        let (bench, _actions) = fakes::bench(dir.path(), &[], &["90"]);
        let config = fakes::config(vec![fakes::target(0, "RedKey", 100.0)], false, false);
        let mut controller = Controller::new(config, running(), bench);

        assert_eq!(controller.sweep(), 0);
        assert_eq!(controller.active_targets().len(), 1);
        assert_eq!(log_lines(dir.path()), 0);
    }

    #[test]
    fn test_stop_halts_before_next_target() {
        let dir = tempdir().unwrap();
        let (mut bench, actions) = fakes::bench(dir.path(), &["RedKey"], &["90"]);
        let state = running();
        // First click opens target 0; stop lands mid-cycle
        fakes::stop_on_click(&mut bench, &actions, 1, state.clone());
        let config = fakes::config(
            vec![
                fakes::target(0, "RedKey", 100.0),
                fakes::target(1, "RedKey", 100.0),
            ],
            true,
            false,
        );
        let mut controller = Controller::new(config, state.clone(), bench);

        controller.tick();

        let actions = actions.borrow();
        // Target 0 finished its cycle, target 1 was never opened
        assert_eq!(actions.last(), Some(&Action::Escape));
        assert!(actions.contains(&Action::Move(825, 860)));
        assert!(!actions.contains(&Action::Move(200, 200)));
        assert!(!state.is_running());
        assert_eq!(log_lines(dir.path()), 1);
    }
}
