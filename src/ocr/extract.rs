//! Post-processing of recognized text into a card name or a price.

use image::GrayImage;

use super::{RecognizedText, TextExtractor};
use crate::error::ExtractError;

/// Removes all whitespace. Tesseract separates CJK characters with spaces,
/// and config names may contain them too.
pub fn normalize_name(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Keeps only the digits and parses them as an unsigned price.
///
/// Returns `None` when no digits remain or the number does not fit in u64.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Runs the name extractor and normalizes its first line.
pub fn read_name(
    extractor: &dyn TextExtractor,
    image: &GrayImage,
) -> Result<String, ExtractError> {
    let recognized = first_candidate(extractor, image)?;
    let name = normalize_name(&recognized.text);
    if name.is_empty() {
        return Err(ExtractError::EmptyCandidate);
    }
    Ok(name)
}

/// Runs the price extractor and parses its first line.
pub fn read_price(
    extractor: &dyn TextExtractor,
    image: &GrayImage,
) -> Result<u64, ExtractError> {
    let recognized = first_candidate(extractor, image)?;
    parse_price(&recognized.text).ok_or(ExtractError::NoDigits(recognized.text))
}

fn first_candidate(
    extractor: &dyn TextExtractor,
    image: &GrayImage,
) -> Result<RecognizedText, ExtractError> {
    match extractor.extract(image) {
        Some(recognized) if !recognized.text.trim().is_empty() => Ok(recognized),
        Some(_) => Err(ExtractError::EmptyCandidate),
        None => Err(ExtractError::NoText),
    }
}
