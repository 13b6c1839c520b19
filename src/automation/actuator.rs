//! Per-target purchase cycle.
//!
//! The cycle sequences through: OpenTarget → ReadName → ReadPrice → Evaluate
//! → Confirm | Cancel. Every path that clicked the target ends with Escape.

use std::path::PathBuf;

use crate::automation::config::{BotConfig, Target};
use crate::automation::evaluator::{evaluate, Decision};
use crate::automation::input::InputDriver;
use crate::automation::purchase_log::PurchaseLog;
use crate::capture::{capture_binarized, ScreenCapture, NAME_THRESHOLD, PRICE_THRESHOLD};
use crate::error::{ConfigError, CycleError, ReadField};
use crate::ocr::{read_name, read_price, TextExtractor};

/// Exclusive resources a purchase cycle drives.
pub struct Workbench {
    pub screen: Box<dyn ScreenCapture>,
    pub input: Box<dyn InputDriver>,
    pub name_reader: Box<dyn TextExtractor>,
    pub price_reader: Box<dyn TextExtractor>,
    pub purchase_log: PurchaseLog,
    /// Where binarized regions are saved in debug mode
    pub images_dir: PathBuf,
}

/// How one cycle ended.
#[derive(Debug)]
pub enum PurchaseOutcome {
    Purchased {
        name: String,
        price: u64,
        premium_pct: f64,
    },
    /// Name mismatch or price too high
    Rejected(Decision),
    /// No decision could be made
    Skipped(CycleError),
}

impl PurchaseOutcome {
    #[cfg(test)]
    pub fn is_purchased(&self) -> bool {
        matches!(self, PurchaseOutcome::Purchased { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PurchaseStep {
    OpenTarget,
    ReadName,
    ReadPrice { name: String },
    Evaluate { name: String, price: u64 },
    Confirm { name: String, price: u64, premium_pct: f64 },
    Cancel,
    Done,
}

/// One run of the state machine for a single target.
pub struct PurchaseCycle<'a> {
    bench: &'a mut Workbench,
    config: &'a BotConfig,
    target: &'a Target,
    step: PurchaseStep,
    outcome: Option<PurchaseOutcome>,
}

impl<'a> PurchaseCycle<'a> {
    pub fn new(bench: &'a mut Workbench, config: &'a BotConfig, target: &'a Target) -> Self {
        Self {
            bench,
            config,
            target,
            step: PurchaseStep::OpenTarget,
            outcome: None,
        }
    }

    /// Runs every step to completion.
    pub fn run(mut self) -> PurchaseOutcome {
        while self.step() {}
        self.outcome.unwrap_or_else(|| {
            PurchaseOutcome::Skipped(CycleError::Input("cycle ended without outcome".to_string()))
        })
    }

    /// Advances by one step. Returns `false` once the cycle is done.
    fn step(&mut self) -> bool {
        let step = std::mem::replace(&mut self.step, PurchaseStep::Done);
        self.step = match step {
            PurchaseStep::OpenTarget => self.open_target(),
            PurchaseStep::ReadName => self.read_name(),
            PurchaseStep::ReadPrice { name } => self.read_price(name),
            PurchaseStep::Evaluate { name, price } => self.evaluate(name, price),
            PurchaseStep::Confirm {
                name,
                price,
                premium_pct,
            } => self.confirm(name, price, premium_pct),
            PurchaseStep::Cancel => {
                self.escape();
                PurchaseStep::Done
            }
            PurchaseStep::Done => return false,
        };
        true
    }

    fn open_target(&mut self) -> PurchaseStep {
        let Some(position) = self.target.position else {
            return self.skip(
                ConfigError::InvalidPosition {
                    name: self.target.label(),
                }
                .into(),
            );
        };
        // Regions are checked before any input so a bad config never opens the view
        if let Err(e) = self
            .config
            .name_region()
            .and_then(|_| self.config.price_region())
        {
            return self.skip(e.into());
        }

        let (x, y) = position.to_screen(self.bench.input.screen_size());
        crate::log(&format!("Opening {} at ({}, {})", self.target.label(), x, y));
        if let Err(e) = self
            .bench
            .input
            .move_to(x, y)
            .and_then(|_| self.bench.input.click())
        {
            self.outcome = Some(PurchaseOutcome::Skipped(CycleError::Input(e.to_string())));
            return PurchaseStep::Cancel;
        }
        std::thread::sleep(self.config.timing.click_settle);
        PurchaseStep::ReadName
    }

    fn read_name(&mut self) -> PurchaseStep {
        let Ok(region) = self.config.name_region() else {
            return self.cancel(CycleError::Capture(ReadField::Name));
        };
        let debug_image = self
            .config
            .debug
            .then(|| self.bench.images_dir.join("card_name.png"));
        let Some(image) = capture_binarized(
            self.bench.screen.as_ref(),
            region,
            NAME_THRESHOLD,
            debug_image.as_deref(),
        ) else {
            return self.cancel(CycleError::Capture(ReadField::Name));
        };

        match read_name(self.bench.name_reader.as_ref(), &image) {
            Ok(name) => PurchaseStep::ReadPrice { name },
            Err(reason) => self.cancel(CycleError::Extraction {
                field: ReadField::Name,
                reason,
            }),
        }
    }

    fn read_price(&mut self, name: String) -> PurchaseStep {
        let Ok(region) = self.config.price_region() else {
            return self.cancel(CycleError::Capture(ReadField::Price));
        };
        let debug_image = self
            .config
            .debug
            .then(|| self.bench.images_dir.join("card_price.png"));
        let Some(image) = capture_binarized(
            self.bench.screen.as_ref(),
            region,
            PRICE_THRESHOLD,
            debug_image.as_deref(),
        ) else {
            return self.cancel(CycleError::Capture(ReadField::Price));
        };

        match read_price(self.bench.price_reader.as_ref(), &image) {
            Ok(price) => PurchaseStep::Evaluate { name, price },
            Err(reason) => self.cancel(CycleError::Extraction {
                field: ReadField::Price,
                reason,
            }),
        }
    }

    fn evaluate(&mut self, name: String, price: u64) -> PurchaseStep {
        match evaluate(&name, price, self.target) {
            Ok(Decision::Accept {
                premium_pct,
                max_price,
            }) => {
                crate::log(&format!(
                    "{} at {} accepted (premium {:.2}%, max {:.0})",
                    name, price, premium_pct, max_price
                ));
                PurchaseStep::Confirm {
                    name,
                    price,
                    premium_pct,
                }
            }
            Ok(decision) => {
                crate::log(&rejection_message(
                    &decision,
                    &name,
                    price,
                    &self.target.label(),
                ));
                self.outcome = Some(PurchaseOutcome::Rejected(decision));
                PurchaseStep::Cancel
            }
            Err(e) => self.cancel(e.into()),
        }
    }

    fn confirm(&mut self, name: String, price: u64, premium_pct: f64) -> PurchaseStep {
        let (x, y) = self
            .config
            .purchase_button
            .to_screen(self.bench.input.screen_size());
        if let Err(e) = self.bench.input.move_to(x, y) {
            return self.cancel(CycleError::Input(e.to_string()));
        }
        if self.config.debug {
            crate::log("Debug mode, purchase click suppressed");
        } else if let Err(e) = self.bench.input.click() {
            return self.cancel(CycleError::Input(e.to_string()));
        }
        std::thread::sleep(self.config.timing.click_settle);

        if let Err(e) =
            self.bench
                .purchase_log
                .append(&name, self.target.ideal_price, price, premium_pct)
        {
            crate::log(&format!("Error: purchase of {} not recorded: {}", name, e));
        }
        crate::log(&format!("Purchased {} for {}", name, price));

        self.escape();
        self.outcome = Some(PurchaseOutcome::Purchased {
            name,
            price,
            premium_pct,
        });
        PurchaseStep::Done
    }

    /// Ends the cycle without touching the screen.
    fn skip(&mut self, error: CycleError) -> PurchaseStep {
        self.outcome = Some(PurchaseOutcome::Skipped(error));
        PurchaseStep::Done
    }

    fn cancel(&mut self, error: CycleError) -> PurchaseStep {
        self.outcome = Some(PurchaseOutcome::Skipped(error));
        PurchaseStep::Cancel
    }

    fn escape(&mut self) {
        if let Err(e) = self.bench.input.press_escape() {
            crate::log(&format!("Warning: escape failed: {}", e));
        }
    }
}

fn rejection_message(decision: &Decision, name: &str, price: u64, expected: &str) -> String {
    match decision {
        Decision::PriceTooHigh {
            premium_pct,
            max_price,
        } => format!(
            "{} at {} too expensive (premium {:.2}%, max {:.0})",
            name, price, premium_pct, max_price
        ),
        _ => format!("Warning: read name {:?}, expected {}", name, expected),
    }
}
