use anyhow::{Context, Result};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Image file extensions accepted as comment-feed screenshots.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Returns true if the path has one of [`SUPPORTED_EXTENSIONS`] (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Decodes an image from disk and converts it to 8-bit grayscale.
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    Ok(to_grayscale(&img))
}

/// Flattens any color image to luma. Alpha is dropped against a white
/// background so transparent overlays do not turn into black text.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut output = GrayImage::new(width, height);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as f32 / 255.0;
        let luma = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
        let blended = luma * alpha + 255.0 * (1.0 - alpha);
        output.put_pixel(x, y, image::Luma([blended.round().clamp(0.0, 255.0) as u8]));
    }

    output
}
