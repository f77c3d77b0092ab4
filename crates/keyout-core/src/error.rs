use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyoutError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Point ({x:.1}, {y:.1}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    #[error("No processed image to save")]
    NoProcessedImage,
}

pub type Result<T> = std::result::Result<T, KeyoutError>;
