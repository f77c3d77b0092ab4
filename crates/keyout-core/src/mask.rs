use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::consts::{HIGHLIGHT_COLOR, HIGHLIGHT_WEIGHT, PARALLEL_PIXEL_THRESHOLD, RGBA_CHANNELS};
use crate::threshold::ThresholdState;

/// Number of pixels matched by a threshold state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub masked: usize,
    pub total: usize,
}

impl MaskStats {
    /// Masked share in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.masked as f64 / self.total as f64
        }
    }
}

/// Make every pixel inside `state` transparent.
///
/// Returns a fresh buffer; `buffer` is never touched. Matched pixels keep
/// their RGB and get alpha 0, all others are copied unchanged.
///
/// With `highlight` set, matched pixels are drawn as the marker instead: the
/// opaque red marker at `HIGHLIGHT_WEIGHT` over a cleared `[0, 0, 0, 0]`
/// pixel, i.e. `min(255, 0 + HIGHLIGHT_WEIGHT * marker)` per channel, so every
/// match shows up as the same half-transparent red. That variant is for
/// display only and must not be written to disk.
pub fn compute_mask(buffer: &PixelBuffer, state: &ThresholdState, highlight: bool) -> PixelBuffer {
    let mut data = buffer.as_bytes().to_vec();
    let marker = highlight.then(marker_addend);
    let stride = buffer.stride();

    if buffer.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        data.par_chunks_exact_mut(stride)
            .for_each(|row| mask_row(row, state, marker));
    } else {
        data.chunks_exact_mut(stride)
            .for_each(|row| mask_row(row, state, marker));
    }

    buffer.with_same_shape(data)
}

/// Count the pixels `compute_mask` would make transparent.
pub fn mask_stats(buffer: &PixelBuffer, state: &ThresholdState) -> MaskStats {
    let stride = buffer.stride();
    let count_row = |row: &[u8]| {
        row.chunks_exact(RGBA_CHANNELS)
            .filter(|px| state.contains(px[0], px[1], px[2]))
            .count()
    };

    let masked: usize = if buffer.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        buffer.as_bytes().par_chunks_exact(stride).map(count_row).sum()
    } else {
        buffer.as_bytes().chunks_exact(stride).map(count_row).sum()
    };

    MaskStats {
        masked,
        total: buffer.pixel_count(),
    }
}

#[inline]
fn mask_row(row: &mut [u8], state: &ThresholdState, marker: Option<[u8; 4]>) {
    for px in row.chunks_exact_mut(RGBA_CHANNELS) {
        if !state.contains(px[0], px[1], px[2]) {
            continue;
        }
        match marker {
            // Marker over a cleared [0, 0, 0, 0] pixel.
            Some(add) => px.copy_from_slice(&add),
            None => px[3] = 0,
        }
    }
}

/// Weighted marker, added on top of each matched pixel in the preview.
fn marker_addend() -> [u8; 4] {
    HIGHLIGHT_COLOR.map(|c| (c as f32 * HIGHLIGHT_WEIGHT).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_addend_is_half_red() {
        assert_eq!(marker_addend(), [128, 0, 0, 128]);
    }

    #[test]
    fn stats_fraction_of_empty_is_zero() {
        assert_eq!(MaskStats::default().fraction(), 0.0);
    }
}
