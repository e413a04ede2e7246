//! Page rasterization to JPEG

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use mupdf::{Colorspace, Document, Matrix};

use crate::analysis::RasterError;

/// Points per inch in PDF user space
const POINTS_PER_INCH: f32 = 72.0;

/// Render the 1-indexed `page_num` of `doc` and encode it as JPEG
pub fn render_page_jpeg(
    doc: &Document,
    page_num: usize,
    dpi: u32,
    quality: u8,
) -> Result<Vec<u8>, RasterError> {
    let page_count = doc
        .page_count()
        .map_err(|e| RasterError::Render(e.to_string()))? as usize;
    if page_num < 1 || page_num > page_count {
        return Err(RasterError::PageNotFound(page_num, page_count));
    }

    let page = doc
        .load_page((page_num - 1) as i32)
        .map_err(|e| RasterError::Render(e.to_string()))?;

    let scale = dpi as f32 / POINTS_PER_INCH;
    let matrix = Matrix::new_scale(scale, scale);

    // No alpha: JPEG has no transparency
    let colorspace = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&matrix, &colorspace, false, true)
        .map_err(|e| RasterError::Render(e.to_string()))?;

    let img = pixels_to_rgb(
        pixmap.width() as u32,
        pixmap.height() as u32,
        pixmap.n() as usize,
        pixmap.samples(),
    )?;

    encode_jpeg(&img, quality)
}

/// Convert raw pixmap samples (`n` components per pixel, rows possibly padded) to RGB
pub fn pixels_to_rgb(
    width: u32,
    height: u32,
    n: usize,
    samples: &[u8],
) -> Result<RgbImage, RasterError> {
    if width == 0 || height == 0 || n == 0 {
        return Err(RasterError::Render(format!(
            "Empty pixmap ({}x{}, {} components)",
            width, height, n
        )));
    }

    let stride = samples.len() / height as usize;
    if stride < width as usize * n {
        return Err(RasterError::Render("Pixmap sample buffer too small".to_string()));
    }

    let mut rgb_buffer = Vec::with_capacity(rgb_buffer_len(width, height));

    for row in samples.chunks_exact(stride).take(height as usize) {
        for pixel in row[..width as usize * n].chunks_exact(n) {
            if n >= 3 {
                rgb_buffer.extend_from_slice(&pixel[..3]);
            } else {
                // Gray (optionally with alpha)
                rgb_buffer.extend_from_slice(&[pixel[0], pixel[0], pixel[0]]);
            }
        }
    }

    RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| RasterError::Encode("Failed to create image buffer".to_string()))
}

/// Byte length of a packed RGB buffer, computed without `u32` overflow
fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

/// Encode an RGB image as baseline JPEG
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, RasterError> {
    let mut output = Vec::new();
    JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100))
        .encode_image(img)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(output)
}
