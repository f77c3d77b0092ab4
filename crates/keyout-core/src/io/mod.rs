pub mod image_io;

use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Where images come from and go to.
///
/// The controller only needs these two operations; everything about
/// containers and the filesystem stays behind this trait.
pub trait ImageStore {
    /// Decode the image at `path`.
    fn load(&self, path: &Path) -> Result<PixelBuffer>;

    /// Encode `buffer` to `path`. The path has already been normalized, so
    /// its extension names the container.
    fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<()>;
}

/// Filesystem-backed store using the `image` crate codecs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsImageStore;

impl ImageStore for FsImageStore {
    fn load(&self, path: &Path) -> Result<PixelBuffer> {
        image_io::load_image(path)
    }

    fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<()> {
        image_io::save_image(buffer, path).map(|_| ())
    }
}
