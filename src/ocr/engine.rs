use anyhow::{anyhow, Context, Result};
use image::GrayImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::TesseractPaths;
use super::{RecognizedText, TextExtractor};

/// Tesseract settings for one kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrProfile {
    /// Tesseract language, e.g. `chi_sim`
    pub language: &'static str,
    /// Page segmentation mode (7 = single text line)
    pub page_seg_mode: u8,
    /// Restricts recognition to these characters
    pub char_whitelist: Option<&'static str>,
}

/// Card names are simplified Chinese on a single line.
pub const NAME_PROFILE: OcrProfile = OcrProfile {
    language: "chi_sim",
    page_seg_mode: 7,
    char_whitelist: None,
};

/// Prices are digits, possibly with thousands separators.
pub const PRICE_PROFILE: OcrProfile = OcrProfile {
    language: "eng",
    page_seg_mode: 7,
    char_whitelist: Some("0123456789,."),
};

/// Represents a line of OCR text with confidence score
#[derive(Debug, Clone)]
pub struct OcrLine {
    pub text: String,
    pub words: Vec<OcrWord>,
    pub confidence: f32,
}

/// Represents a single word from OCR with confidence score
#[derive(Debug, Clone)]
pub struct OcrWord {
    pub text: String,
    pub confidence: f32,
}

/// Runs Tesseract on a binarized image.
/// Returns structured output with lines and confidence scores.
pub fn recognize_image(
    img: &GrayImage,
    profile: &OcrProfile,
    paths: &TesseractPaths,
) -> Result<Vec<OcrLine>> {
    // Save image to temporary file
    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())
        .context("Failed to write OCR input image")?;

    let mut command = Command::new(&paths.executable);
    command
        .arg(temp_input.path())
        .arg("stdout")
        .arg("--tessdata-dir")
        .arg(&paths.tessdata)
        .arg("-l")
        .arg(profile.language)
        .arg("--psm")
        .arg(profile.page_seg_mode.to_string());
    if let Some(whitelist) = profile.char_whitelist {
        command
            .arg("-c")
            .arg(format!("tessedit_char_whitelist={}", whitelist));
    }
    // TSV output for structured data
    command.arg("tsv");

    let output = command
        .output()
        .with_context(|| format!("Failed to run {}", paths.executable.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr.trim()));
    }

    Ok(parse_tsv_output(&String::from_utf8_lossy(&output.stdout)))
}

/// Parses Tesseract TSV output into lines of words.
///
/// Words are grouped by (block, paragraph, line); the line confidence is the
/// mean of its word confidences. Rows that are not words, are empty, or carry
/// a negative confidence are skipped.
fn parse_tsv_output(tsv: &str) -> Vec<OcrLine> {
    let mut lines: Vec<OcrLine> = Vec::new();
    let mut current_key: Option<(i32, i32, i32)> = None;

    // Skip header
    for row in tsv.lines().skip(1) {
        // TSV fields: level, page_num, block_num, par_num, line_num, word_num,
        //             left, top, width, height, conf, text
        let fields: Vec<&str> = row.split('\t').collect();
        if fields.len() < 12 {
            continue;
        }

        // Level 5 = word
        if fields[0] != "5" {
            continue;
        }

        let text = fields[11].trim();
        let conf: f32 = fields[10].parse().unwrap_or(-1.0);
        if text.is_empty() || conf < 0.0 {
            continue;
        }

        let field = |i: usize| fields[i].parse::<i32>().unwrap_or(-1);
        let key = (field(2), field(3), field(4));

        if current_key != Some(key) {
            lines.push(OcrLine {
                text: String::new(),
                words: Vec::new(),
                confidence: 0.0,
            });
            current_key = Some(key);
        }
        if let Some(line) = lines.last_mut() {
            line.words.push(OcrWord {
                text: text.to_string(),
                confidence: conf,
            });
        }
    }

    for line in &mut lines {
        line.text = line
            .words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        line.confidence =
            line.words.iter().map(|w| w.confidence).sum::<f32>() / line.words.len() as f32;
    }

    lines
}

/// Text extractor backed by the Tesseract executable.
pub struct TesseractExtractor {
    profile: OcrProfile,
    paths: TesseractPaths,
}

impl TesseractExtractor {
    pub fn new(profile: OcrProfile, paths: TesseractPaths) -> Self {
        Self { profile, paths }
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract(&self, image: &GrayImage) -> Option<RecognizedText> {
        let lines = match recognize_image(image, &self.profile, &self.paths) {
            Ok(lines) => lines,
            Err(e) => {
                crate::log(&format!(
                    "Warning: OCR ({}) failed: {}",
                    self.profile.language, e
                ));
                return None;
            }
        };

        let first = lines.into_iter().next()?;
        Some(RecognizedText {
            text: first.text,
            confidence: first.confidence,
        })
    }
}
