use image::{GrayImage, ImageBuffer, Luma, Rgba};

/// ITU-R BT.601 luma of an RGBA pixel, 0 (black) to 255 (white).
pub fn luminance(pixel: &Rgba<u8>) -> u8 {
    let y = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Converts image to binary by luminance.
///
/// Pixels brighter than `threshold` are the game's light text and become
/// black (0). Everything else becomes white (255) background, which is the
/// polarity Tesseract is tuned for.
///
/// Thresholds in use:
/// - Card name: 100
/// - Card price: 55 (the price digits are dim grey)
pub fn binarize_luminance(
    img: &ImageBuffer<Rgba<u8>, Vec<u8>>,
    threshold: u8,
) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if luminance(pixel) > threshold { 0u8 } else { 255u8 };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}
