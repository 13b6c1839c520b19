pub mod engine;
pub mod extract;
pub mod preprocess;
pub mod setup;

pub use engine::{TesseractExtractor, NAME_PROFILE, PRICE_PROFILE};
pub use extract::{read_name, read_price};
pub use preprocess::binarize_luminance;
pub use setup::ensure_tesseract;

use image::GrayImage;

/// Best single-line transcription of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedText {
    pub text: String,
    /// Mean word confidence, 0-100
    pub confidence: f32,
}

/// An OCR pipeline bound to one recognition profile.
///
/// `None` means nothing was recognized; it is never an error for the caller.
pub trait TextExtractor {
    fn extract(&self, image: &GrayImage) -> Option<RecognizedText>;
}
