//! Calibration state tracking.
//!
//! A picker is fed hotkey events carrying the cursor position and ends with
//! either a pick or a cancellation.

use clap::ValueEnum;

use crate::automation::config::ScreenRect;
use crate::calibration::coords::rect_from_corners;

/// Config value a calibration run writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CalibrationField {
    /// `card_name_range`
    NameRegion,
    /// `card_price_range`
    PriceRegion,
    /// `keys[index].position`
    Position,
    /// `purchase_btn_location`
    PurchaseButton,
}

impl CalibrationField {
    /// JSON key of the calibrated value.
    pub fn key(&self) -> &'static str {
        match self {
            Self::NameRegion => "card_name_range",
            Self::PriceRegion => "card_price_range",
            Self::Position => "position",
            Self::PurchaseButton => "purchase_btn_location",
        }
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    pub fn is_region(&self) -> bool {
        matches!(self, Self::NameRegion | Self::PriceRegion)
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NameRegion => "Card name region",
            Self::PriceRegion => "Card price region",
            Self::Position => "Card position in the list",
            Self::PurchaseButton => "Purchase button",
        }
    }
}

/// Hotkey press with the cursor position at that moment.
#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickEvent {
    /// F1
    Point(i32, i32),
    /// F2
    TopLeft(i32, i32),
    /// F3
    BottomRight(i32, i32),
    /// Escape
    Cancel,
}

/// What the operator picked, in screen pixels.
#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    Point(i32, i32),
    Region(ScreenRect),
}

#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Clone, Debug, PartialEq)]
pub enum CalibrationStep {
    WaitingForPoint,
    WaitingForTopLeft,
    WaitingForBottomRight { top_left: (i32, i32) },
    Picked(Pick),
    Cancelled,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl CalibrationStep {
    /// Returns the prompt for the current step.
    pub fn instructions(&self) -> &'static str {
        match self {
            Self::WaitingForPoint => "Move the cursor to the point and press F1",
            Self::WaitingForTopLeft => "Move the cursor to the TOP-LEFT corner and press F2",
            Self::WaitingForBottomRight { .. } => {
                "Move the cursor to the BOTTOM-RIGHT corner and press F3 (F2 redoes the corner)"
            }
            Self::Picked(_) => "Done",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[cfg_attr(not(windows), allow(dead_code))]
pub struct Picker {
    step: CalibrationStep,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl Picker {
    pub fn new(field: CalibrationField) -> Self {
        let step = if field.is_region() {
            CalibrationStep::WaitingForTopLeft
        } else {
            CalibrationStep::WaitingForPoint
        };
        Self { step }
    }

    pub fn step(&self) -> &CalibrationStep {
        &self.step
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.step,
            CalibrationStep::Picked(_) | CalibrationStep::Cancelled
        )
    }

    /// Feeds one event. Returns `true` when the step changed.
    ///
    /// Keys that do not apply to the current step are ignored.
    pub fn handle(&mut self, event: PickEvent) -> bool {
        if self.is_finished() {
            return false;
        }
        let next = match (&self.step, event) {
            (_, PickEvent::Cancel) => CalibrationStep::Cancelled,
            (CalibrationStep::WaitingForPoint, PickEvent::Point(x, y)) => {
                CalibrationStep::Picked(Pick::Point(x, y))
            }
            (
                CalibrationStep::WaitingForTopLeft | CalibrationStep::WaitingForBottomRight { .. },
                PickEvent::TopLeft(x, y),
            ) => CalibrationStep::WaitingForBottomRight { top_left: (x, y) },
            (CalibrationStep::WaitingForBottomRight { top_left }, PickEvent::BottomRight(x, y)) => {
                match rect_from_corners(*top_left, (x, y)) {
                    Some(rect) => CalibrationStep::Picked(Pick::Region(rect)),
                    None => {
                        crate::log("Region has no area, pick the bottom-right corner again");
                        return false;
                    }
                }
            }
            _ => return false,
        };
        self.step = next;
        true
    }
}
