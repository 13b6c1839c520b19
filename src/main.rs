//! Card Buyer
//!
//! Watches the in-game card shop on the primary screen, reads each card's
//! name and price with OCR, and buys the ones priced within tolerance.
//! F8 starts the loop, F9 stops it.

mod automation;
mod calibration;
mod capture;
mod error;
mod ocr;
mod paths;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};

use automation::{
    spawn_hotkey_listener, BotConfig, ConfigDocument, Controller, InputDriver, PurchaseLog,
    RunStateCell, Workbench, START_KEY_NAME, STOP_KEY_NAME,
};
use calibration::{CalibrationField, Pick};
use capture::{capture_binarized, ScreenCapture, NAME_THRESHOLD, PRICE_THRESHOLD};
use ocr::{TesseractExtractor, TextExtractor, NAME_PROFILE, PRICE_PROFILE};

const OCR_LANGUAGES: [&str; 2] = ["chi_sim", "eng"];

/// Set when stdout is reserved for machine-readable output.
static LOG_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    if LOG_TO_STDERR.load(Ordering::Relaxed) {
        eprint!("{}", line);
    } else {
        print!("{}", line);
    }
    let log_path = paths::get_logs_dir().join("card_buyer.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

#[derive(Parser)]
#[command(name = "card-buyer", version, about = "Buys shop cards below a price ceiling")]
struct Cli {
    /// Config file [default: config.json next to the executable]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the purchase loop (default)
    Run,
    /// Pick a region or point on screen and save it to the config
    Calibrate {
        #[arg(value_enum)]
        field: CalibrationField,
        /// Key to update when calibrating `position`
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Read both regions once and log what OCR sees
    TestOcr,
}

fn main() -> ExitCode {
    install_panic_hook();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(paths::get_default_config_path);

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create output directories: {}", e);
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => exit_with(cmd_run(&config_path)),
        Command::Calibrate { field, index } => cmd_calibrate(&config_path, field, index),
        Command::TestOcr => exit_with(cmd_test_ocr(&config_path)),
    }
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("card_buyer.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));
}

fn exit_with(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Screen and input of the local desktop.
#[cfg_attr(not(windows), allow(dead_code))]
struct Desktop {
    screen: Box<dyn ScreenCapture>,
    input: Box<dyn InputDriver>,
}

#[cfg(windows)]
fn desktop() -> Result<Desktop> {
    Ok(Desktop {
        screen: Box::new(capture::GdiScreenCapture),
        input: Box::new(automation::SendInputDriver::new()),
    })
}

#[cfg(not(windows))]
fn desktop() -> Result<Desktop> {
    anyhow::bail!("screen capture and input injection are only supported on Windows")
}

fn cmd_run(config_path: &Path) -> Result<()> {
    let doc = ConfigDocument::load(config_path)?;
    let config = BotConfig::from_document(&doc);
    log_startup_summary(config_path, &config);

    let desktop = desktop()?;
    let run_state = RunStateCell::new();
    spawn_hotkey_listener(run_state.clone())?;

    let tesseract = ocr::ensure_tesseract(&OCR_LANGUAGES).context("Tesseract is not available")?;
    let bench = Workbench {
        screen: desktop.screen,
        input: desktop.input,
        name_reader: Box::new(TesseractExtractor::new(NAME_PROFILE, tesseract.clone())),
        price_reader: Box::new(TesseractExtractor::new(PRICE_PROFILE, tesseract)),
        purchase_log: PurchaseLog::new(paths::get_purchase_log_path()),
        images_dir: paths::get_images_dir(),
    };

    log(&format!("Ready. Press {} to start.", START_KEY_NAME));
    let mut controller = Controller::new(config, run_state, bench);
    controller.run()
}

fn log_startup_summary(config_path: &Path, config: &BotConfig) {
    log("Card Buyer started");
    log(&format!("Config: {}", config_path.display()));
    log(&format!(
        "Debug mode: {}",
        if config.debug {
            "on (purchase clicks suppressed)"
        } else {
            "off"
        }
    ));
    log(&format!(
        "Loop mode: {}",
        if config.loop_mode { "on" } else { "off" }
    ));

    let active = config.active_targets();
    if active.is_empty() {
        log("Warning: no card has want_buy = 1, nothing will be bought");
    } else {
        let labels: Vec<String> = active.iter().map(|t| t.label()).collect();
        log(&format!("Cards to buy: {}", labels.join(", ")));
    }

    log(&format!("Hotkey: {} (start)", START_KEY_NAME));
    log(&format!("Hotkey: {} (stop)", STOP_KEY_NAME));
}

fn cmd_calibrate(config_path: &Path, field: CalibrationField, index: usize) -> ExitCode {
    // stdout carries exactly one JSON line
    LOG_TO_STDERR.store(true, Ordering::Relaxed);

    match calibrate(config_path, field, index) {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let error = format!("{:#}", e);
            log(&format!("Error: calibration failed: {}", error));
            println!("{}", calibration::failure_line(&error));
            ExitCode::FAILURE
        }
    }
}

fn calibrate(config_path: &Path, field: CalibrationField, index: usize) -> Result<String> {
    let mut doc = ConfigDocument::load_or_default(config_path)?;
    let desktop = desktop()?;

    let pick = calibration::pick(field)?.ok_or_else(|| anyhow!("calibration cancelled"))?;
    let value = calibration::apply_pick(&mut doc, field, index, pick, desktop.input.screen_size())?;

    if let (CalibrationField::NameRegion, Pick::Region(rect)) = (field, pick) {
        match recognize_card_name(desktop.screen.as_ref(), rect) {
            Ok(name) => {
                log(&format!("Recognized card name: {}", name));
                calibration::apply_recognized_name(&mut doc, &name);
            }
            Err(e) => log(&format!("Warning: card name not recognized: {:#}", e)),
        }
    }

    doc.save(config_path)?;
    log(&format!("Saved {} to {}", field.key(), config_path.display()));
    calibration::success_line(field, value, &doc)
}

fn recognize_card_name(
    screen: &dyn ScreenCapture,
    rect: automation::config::ScreenRect,
) -> Result<String> {
    let tesseract = ocr::ensure_tesseract(&OCR_LANGUAGES[..1])?;
    let reader = TesseractExtractor::new(NAME_PROFILE, tesseract);
    let image = capture_binarized(screen, rect, NAME_THRESHOLD, None)
        .ok_or_else(|| anyhow!("name region capture failed"))?;
    Ok(ocr::read_name(&reader, &image)?)
}

fn cmd_test_ocr(config_path: &Path) -> Result<()> {
    let config = BotConfig::from_document(&ConfigDocument::load(config_path)?);
    let name_region = config.name_region()?;
    let price_region = config.price_region()?;

    let desktop = desktop()?;
    let tesseract = ocr::ensure_tesseract(&OCR_LANGUAGES)?;
    let name_reader = TesseractExtractor::new(NAME_PROFILE, tesseract.clone());
    let price_reader = TesseractExtractor::new(PRICE_PROFILE, tesseract);
    let images_dir = paths::get_images_dir();

    let name_image_path = images_dir.join("card_name.png");
    let name_image = capture_binarized(
        desktop.screen.as_ref(),
        name_region,
        NAME_THRESHOLD,
        Some(&name_image_path),
    )
    .ok_or_else(|| anyhow!("name region capture failed"))?;
    log_raw("Name", &name_reader, &name_image);
    match ocr::read_name(&name_reader, &name_image) {
        Ok(name) => log(&format!("Name: {}", name)),
        Err(reason) => log(&format!("Name: not recognized ({})", reason)),
    }

    let price_image_path = images_dir.join("card_price.png");
    let price_image = capture_binarized(
        desktop.screen.as_ref(),
        price_region,
        PRICE_THRESHOLD,
        Some(&price_image_path),
    )
    .ok_or_else(|| anyhow!("price region capture failed"))?;
    log_raw("Price", &price_reader, &price_image);
    match ocr::read_price(&price_reader, &price_image) {
        Ok(price) => log(&format!("Price: {}", price)),
        Err(reason) => log(&format!("Price: not recognized ({})", reason)),
    }

    log(&format!("Binarized images saved to {}", images_dir.display()));
    Ok(())
}

fn log_raw(label: &str, reader: &dyn TextExtractor, image: &image::GrayImage) {
    match reader.extract(image) {
        Some(text) => log(&format!(
            "{} raw: {:?} (confidence {:.1})",
            label, text.text, text.confidence
        )),
        None => log(&format!("{} raw: <nothing>", label)),
    }
}
