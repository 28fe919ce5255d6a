use image::{imageops, imageops::FilterType, RgbaImage};

pub const THUMBNAIL_EDGE: u32 = 32;

/// Aspect-fill thumbnail: the source is scaled by the larger of the two axis
/// ratios so it covers an `edge`×`edge` square, and the centre is kept.
///
/// Cropping the centred square of the source first and then scaling it gives
/// the same pixels without materialising the oversized intermediate.
pub fn aspect_fill_thumbnail(source: &RgbaImage, edge: u32) -> RgbaImage {
    let (width, height) = source.dimensions();
    let side = width.min(height).max(1);
    let x = (width.saturating_sub(side)) / 2;
    let y = (height.saturating_sub(side)) / 2;

    let square = imageops::crop_imm(source, x, y, side, side).to_image();
    imageops::resize(&square, edge, edge, FilterType::Triangle)
}
