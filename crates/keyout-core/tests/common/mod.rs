#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use keyout_core::buffer::PixelBuffer;
use keyout_core::error::{KeyoutError, Result};
use keyout_core::io::ImageStore;

/// Build a buffer where every pixel is `rgba`.
pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(width, height, rgba).expect("valid dimensions")
}

/// Build a buffer whose pixel (x, y) is `f(x, y)`.
pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> PixelBuffer {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y));
        }
    }
    PixelBuffer::from_raw(width, height, data).expect("valid buffer")
}

/// Alpha channel of every pixel, row-major.
pub fn alphas(buffer: &PixelBuffer) -> Vec<u8> {
    buffer.as_bytes().chunks_exact(4).map(|px| px[3]).collect()
}

#[derive(Default)]
struct StoreInner {
    images: HashMap<PathBuf, PixelBuffer>,
    saved: HashMap<PathBuf, PixelBuffer>,
    fail_saves: bool,
    loads: usize,
}

/// In-memory image store. Clones share the same contents, so a test can keep
/// a handle after moving one into the controller.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(self, path: impl Into<PathBuf>, buffer: PixelBuffer) -> Self {
        self.inner.borrow_mut().images.insert(path.into(), buffer);
        self
    }

    pub fn saved(&self, path: impl AsRef<Path>) -> Option<PixelBuffer> {
        self.inner.borrow().saved.get(path.as_ref()).cloned()
    }

    pub fn saved_paths(&self) -> Vec<PathBuf> {
        self.inner.borrow().saved.keys().cloned().collect()
    }

    pub fn fail_saves(&self) {
        self.inner.borrow_mut().fail_saves = true;
    }

    pub fn load_count(&self) -> usize {
        self.inner.borrow().loads
    }
}

impl ImageStore for MemoryStore {
    fn load(&self, path: &Path) -> Result<PixelBuffer> {
        let mut inner = self.inner.borrow_mut();
        inner.loads += 1;
        inner
            .images
            .get(path)
            .cloned()
            .ok_or_else(|| KeyoutError::Decode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no such image",
                )),
            })
    }

    fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            return Err(KeyoutError::Encode {
                path: path.to_path_buf(),
                message: "destination not writable".into(),
            });
        }
        inner.saved.insert(path.to_path_buf(), buffer.clone());
        Ok(())
    }
}
