use std::path::Path;

use crate::error::Result;
use crate::frame::Frame;

/// File extensions the frame loader will try to decode.
pub const FRAME_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Load an image file as an 8-bit RGB frame. Alpha and bit depth are dropped.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    Ok(Frame::from_rgb_image(&img.to_rgb8()))
}

/// Save a frame as an 8-bit RGB image, format chosen from the extension.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let img = image::RgbImage::from_fn(w, h, |x, y| {
        image::Rgb(frame.pixel(y as usize, x as usize))
    });
    img.save(path)?;
    Ok(())
}

pub fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.as_str()))
}
