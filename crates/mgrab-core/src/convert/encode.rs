//! Bitmap decode and re-encode.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use super::{ConvertError, TargetFormat};

/// Decode `bytes` and re-encode into `target`. JPEG has no alpha channel,
/// so transparency is flattened onto a white background first.
pub(super) fn reencode(
    bytes: &[u8],
    target: TargetFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ConvertError> {
    let img = image::load_from_memory(bytes).map_err(ConvertError::Decode)?;
    let mut out = Cursor::new(Vec::new());
    match target {
        TargetFormat::Png => img
            .write_to(&mut out, ImageFormat::Png)
            .map_err(ConvertError::Encode)?,
        TargetFormat::Webp => img
            .write_to(&mut out, ImageFormat::WebP)
            .map_err(ConvertError::Encode)?,
        TargetFormat::Jpg => {
            let flattened = flatten_onto_white(&img);
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, jpeg_quality);
            encoder
                .encode_image(&flattened)
                .map_err(ConvertError::Encode)?;
        }
    }
    Ok(out.into_inner())
}

/// Alpha-blend every pixel over opaque white.
pub(super) fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    out
}
