/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Bytes per RGBA pixel.
pub const RGBA_CHANNELS: usize = 4;

/// Number of color channels that take part in the range test (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Largest value of an 8-bit channel.
pub const CHANNEL_MAX: u8 = 255;

/// Scale multiplier applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.15;

/// Smallest scale a viewport transform accepts.
pub const MIN_SCALE: f64 = 0.05;

/// Largest scale a viewport transform accepts.
pub const MAX_SCALE: f64 = 40.0;

/// Marker painted over matched pixels in the highlight preview (opaque red).
pub const HIGHLIGHT_COLOR: [u8; 4] = [255, 0, 0, 255];

/// Weight of the marker in the highlight blend.
pub const HIGHLIGHT_WEIGHT: f32 = 0.5;

/// Number of histogram bins per channel (one per 8-bit value).
pub const HISTOGRAM_BINS: usize = 256;

/// Container extensions accepted as-is when saving. Anything else gets
/// `DEFAULT_SAVE_EXTENSION` appended.
pub const SAVE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Extension appended to save paths without a recognized container.
pub const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Color written for fully transparent pixels when the target container has
/// no alpha channel (opaque black).
pub const ALPHA_MATTE: [u8; 4] = [0, 0, 0, 255];
