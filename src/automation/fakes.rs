//! Scripted stand-ins for the screen, input and OCR used by loop tests.

use anyhow::{anyhow, Result};
use image::{GrayImage, Rgba, RgbaImage};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crate::automation::actuator::Workbench;
use crate::automation::config::{
    BotConfig, NormalizedPoint, ScreenRect, Target, Timing, DEFAULT_PURCHASE_BUTTON,
};
use crate::automation::input::InputDriver;
use crate::automation::purchase_log::PurchaseLog;
use crate::automation::state::RunStateCell;
use crate::capture::ScreenCapture;
use crate::ocr::{RecognizedText, TextExtractor};

pub const NAME_RECT: ScreenRect = ScreenRect {
    x: 400,
    y: 100,
    width: 20,
    height: 8,
};
pub const PRICE_RECT: ScreenRect = ScreenRect {
    x: 400,
    y: 500,
    width: 12,
    height: 6,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Move(i32, i32),
    Click,
    Escape,
    Capture(ScreenRect),
}

pub type Actions = Rc<RefCell<Vec<Action>>>;

pub struct FakeInput {
    pub actions: Actions,
    /// Switches the run state to Idle on the n-th click (1-based)
    pub stop_on_click: Option<(usize, RunStateCell)>,
    clicks: usize,
}

impl InputDriver for FakeInput {
    fn screen_size(&self) -> (u32, u32) {
        (1000, 1000)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.actions.borrow_mut().push(Action::Move(x, y));
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.actions.borrow_mut().push(Action::Click);
        self.clicks += 1;
        if let Some((n, state)) = &self.stop_on_click {
            if *n == self.clicks {
                state.stop();
            }
        }
        Ok(())
    }

    fn press_escape(&mut self) -> Result<()> {
        self.actions.borrow_mut().push(Action::Escape);
        Ok(())
    }
}

pub struct FakeScreen {
    pub actions: Actions,
    pub fail: bool,
}

impl ScreenCapture for FakeScreen {
    fn capture_region(&self, rect: ScreenRect) -> Result<RgbaImage> {
        self.actions.borrow_mut().push(Action::Capture(rect));
        if self.fail {
            return Err(anyhow!("region outside screen"));
        }
        Ok(RgbaImage::from_pixel(rect.width, rect.height, Rgba([255, 255, 255, 255])))
    }
}

/// Returns the scripted texts in order, wrapping around.
pub struct ScriptedReader {
    texts: Vec<String>,
    calls: Cell<usize>,
}

impl ScriptedReader {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            calls: Cell::new(0),
        }
    }
}

impl TextExtractor for ScriptedReader {
    fn extract(&self, _image: &GrayImage) -> Option<RecognizedText> {
        if self.texts.is_empty() {
            return None;
        }
        let call = self.calls.get();
        self.calls.set(call + 1);
        Some(RecognizedText {
            text: self.texts[call % self.texts.len()].clone(),
            confidence: 90.0,
        })
    }
}

/// Workbench on a 1000x1000 fake screen writing into `dir`.
pub fn bench(dir: &Path, names: &[&str], prices: &[&str]) -> (Workbench, Actions) {
    let actions: Actions = Rc::new(RefCell::new(Vec::new()));
    let images_dir = dir.join("images");
    std::fs::create_dir_all(&images_dir).unwrap();
    let bench = Workbench {
        screen: Box::new(FakeScreen {
            actions: actions.clone(),
            fail: false,
        }),
        input: Box::new(FakeInput {
            actions: actions.clone(),
            stop_on_click: None,
            clicks: 0,
        }),
        name_reader: Box::new(ScriptedReader::new(names)),
        price_reader: Box::new(ScriptedReader::new(prices)),
        purchase_log: PurchaseLog::new(dir.join("purchases.log")),
        images_dir,
    };
    (bench, actions)
}

/// Replaces the input driver with one that stops `state` on the n-th click.
pub fn stop_on_click(bench: &mut Workbench, actions: &Actions, n: usize, state: RunStateCell) {
    bench.input = Box::new(FakeInput {
        actions: actions.clone(),
        stop_on_click: Some((n, state)),
        clicks: 0,
    });
}

pub fn failing_screen(bench: &mut Workbench, actions: &Actions) {
    bench.screen = Box::new(FakeScreen {
        actions: actions.clone(),
        fail: true,
    });
}

/// Active target at (0.1 * (id + 1), 0.2) with 10% tolerance.
pub fn target(id: usize, name: &str, ideal_price: f64) -> Target {
    Target {
        id,
        names: vec![name.chars().filter(|c| !c.is_whitespace()).collect()],
        ideal_price,
        floating_tolerance: 0.1,
        position: Some(NormalizedPoint {
            x: 0.1 * (id + 1) as f64,
            y: 0.2,
        }),
        want_buy: true,
    }
}

/// Config with both regions set and no delays.
pub fn config(targets: Vec<Target>, loop_mode: bool, debug: bool) -> BotConfig {
    BotConfig {
        debug,
        loop_mode,
        name_region: Some(NAME_RECT),
        price_region: Some(PRICE_RECT),
        purchase_button: DEFAULT_PURCHASE_BUTTON,
        targets,
        timing: Timing {
            click_settle: Duration::ZERO,
            target_interval: Duration::ZERO,
            idle_poll: Duration::ZERO,
        },
    }
}
