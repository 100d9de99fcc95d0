//! Grayscale terminal preview of the optional picture.

use std::io::{self, Write};
use std::path::Path;

use console::style;
use image::ImageResult;
use image::imageops::FilterType;
use tracing::warn;

/// Title printed above the preview.
pub const IMAGE_TITLE: &str = "Related quantum diagram";

/// Luminance ramp from dark to bright.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Characters per preview row.
const PREVIEW_WIDTH: u32 = 64;

/// Decode `path` and render it as `width` columns of ASCII shades.
///
/// Terminal cells are about twice as tall as wide, so the row count is
/// halved to keep the aspect ratio.
pub fn render_preview(path: &Path, width: u32) -> ImageResult<String> {
    let img = image::open(path)?;
    let width = width.max(1);
    let rows = (u64::from(img.height()) * u64::from(width) / u64::from(img.width().max(1)) / 2)
        .clamp(1, u64::from(u32::MAX));
    let gray = img
        .resize_exact(width, rows as u32, FilterType::Triangle)
        .to_luma8();

    let mut text = String::with_capacity((width as usize + 1) * rows as usize);
    for row in gray.rows() {
        for pixel in row {
            let idx = usize::from(pixel.0[0]) * (RAMP.len() - 1) / 255;
            text.push(char::from(RAMP[idx]));
        }
        text.push('\n');
    }
    Ok(text)
}

/// Show the picture at `path`, or a notice when it cannot be loaded.
///
/// Returns whether the picture was shown. A missing or undecodable file
/// never fails the run.
pub fn show_image(out: &mut impl Write, path: Option<&Path>) -> io::Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    match render_preview(path, PREVIEW_WIDTH) {
        Ok(preview) => {
            writeln!(out, "{}", style(IMAGE_TITLE).bold())?;
            out.write_all(preview.as_bytes())?;
            Ok(true)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not load image");
            crate::print_notice(
                out,
                "Could not load the image. Make sure the path is correct.",
            )?;
            Ok(false)
        }
    }
}
