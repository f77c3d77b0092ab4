use std::ffi::{OsStr, OsString};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use tracing::{info, warn};

use crate::buffer::PixelBuffer;
use crate::consts::{ALPHA_MATTE, DEFAULT_SAVE_EXTENSION, SAVE_EXTENSIONS};
use crate::error::{KeyoutError, Result};

/// Decode any raster format the `image` crate understands into RGBA.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|source| KeyoutError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let buffer = PixelBuffer::from_rgba_image(img.to_rgba8())?;
    info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "Image decoded"
    );
    Ok(buffer)
}

/// Rotate landscape rasters a quarter turn counter-clockwise so the long
/// edge is vertical. Portrait and square rasters pass through.
///
/// This stands in for camera orientation metadata and is applied on every
/// load, whether or not the file carries such metadata.
pub fn orient_portrait(buffer: PixelBuffer) -> Result<PixelBuffer> {
    if buffer.is_landscape() {
        info!(
            width = buffer.width(),
            height = buffer.height(),
            "Rotating landscape image to portrait"
        );
        buffer.rotated_ccw()
    } else {
        Ok(buffer)
    }
}

/// Append `.png` unless the path already ends in a container we can write.
///
/// The check is case-insensitive; an unknown extension is kept and the
/// default one appended after it (`mask.tif` becomes `mask.tif.png`).
pub fn normalize_save_path(path: &Path) -> PathBuf {
    if recognized_extension(path).is_some() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(DEFAULT_SAVE_EXTENSION);
    PathBuf::from(name)
}

fn recognized_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    SAVE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Container format for a (normalized) save path.
pub fn format_for_path(path: &Path) -> ImageFormat {
    match recognized_extension(path).as_deref() {
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("bmp") => ImageFormat::Bmp,
        _ => ImageFormat::Png,
    }
}

/// Encode `buffer` and write it, choosing the container from the extension.
///
/// Returns the path actually written (see [`normalize_save_path`]). JPEG has
/// no alpha channel: for `.jpg`/`.jpeg` targets transparent pixels are
/// flattened to black and alpha is dropped. The bytes
/// go to a hidden sibling file first and are renamed into place, so a failed
/// write never leaves a truncated image behind.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<PathBuf> {
    let target = normalize_save_path(path);
    let format = format_for_path(&target);

    let bytes = encode(buffer, format, &target)?;
    write_replacing(&target, &bytes)?;

    info!(path = %target.display(), format = ?format, bytes = bytes.len(), "Image saved");
    Ok(target)
}

fn encode(buffer: &PixelBuffer, format: ImageFormat, target: &Path) -> Result<Vec<u8>> {
    let rgba = buffer.to_rgba_image()?;
    let mut cursor = Cursor::new(Vec::new());
    let written = match format {
        ImageFormat::Jpeg => flatten_onto_matte(rgba).write_to(&mut cursor, format),
        _ => rgba.write_to(&mut cursor, format),
    };
    written.map_err(|e| KeyoutError::Encode {
        path: target.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(cursor.into_inner())
}

/// Drop alpha for containers without it. Fully transparent pixels become
/// `ALPHA_MATTE` so keyed-out areas stay visible; everything else keeps its RGB.
fn flatten_onto_matte(mut rgba: RgbaImage) -> RgbImage {
    for px in rgba.pixels_mut() {
        if px.0[3] == 0 {
            px.0 = ALPHA_MATTE;
        }
    }
    DynamicImage::ImageRgba8(rgba).to_rgb8()
}

fn write_replacing(target: &Path, bytes: &[u8]) -> Result<()> {
    let partial = partial_sibling(target);
    let result = std::fs::write(&partial, bytes).and_then(|()| std::fs::rename(&partial, target));

    if let Err(err) = result {
        if partial.exists() {
            if let Err(cleanup) = std::fs::remove_file(&partial) {
                warn!(path = %partial.display(), error = %cleanup, "Could not remove partial file");
            }
        }
        return Err(KeyoutError::Encode {
            path: target.to_path_buf(),
            message: err.to_string(),
        });
    }
    Ok(())
}

fn partial_sibling(target: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(target.file_name().unwrap_or(OsStr::new("image")));
    name.push(".partial");
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_is_hidden_sibling() {
        let p = partial_sibling(Path::new("/tmp/out/mask.png"));
        assert_eq!(p, PathBuf::from("/tmp/out/.mask.png.partial"));
    }

    #[test]
    fn flatten_blackens_only_transparent_pixels() {
        let rgba = RgbaImage::from_raw(2, 1, vec![200, 150, 100, 0, 200, 150, 100, 255])
            .unwrap();
        let rgb = flatten_onto_matte(rgba);
        assert_eq!(rgb.as_raw(), &vec![0, 0, 0, 200, 150, 100]);
    }

    #[test]
    fn format_follows_extension_case_insensitively() {
        assert_eq!(format_for_path(Path::new("a.JPG")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.jpeg")), ImageFormat::Jpeg);
        assert_eq!(format_for_path(Path::new("a.Bmp")), ImageFormat::Bmp);
        assert_eq!(format_for_path(Path::new("a.png")), ImageFormat::Png);
        assert_eq!(format_for_path(Path::new("a")), ImageFormat::Png);
    }
}
