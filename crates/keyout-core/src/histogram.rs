use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::consts::{COLOR_CHANNEL_COUNT, HISTOGRAM_BINS, PARALLEL_PIXEL_THRESHOLD, RGBA_CHANNELS};
use crate::threshold::{Channel, ChannelRange};

type Bins = [[u64; HISTOGRAM_BINS]; COLOR_CHANNEL_COUNT];

/// Per-channel value counts of an RGBA buffer (alpha ignored).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelHistograms {
    bins: Bins,
}

impl ChannelHistograms {
    pub fn channel(&self, channel: Channel) -> &[u64; HISTOGRAM_BINS] {
        &self.bins[channel.index()]
    }

    /// Pixels whose `channel` value lies inside `range`.
    pub fn count_in(&self, channel: Channel, range: ChannelRange) -> u64 {
        if range.is_inverted() {
            return 0;
        }
        self.channel(channel)[range.lower as usize..=range.upper as usize]
            .iter()
            .sum()
    }

    /// Largest bin across all channels, for scaling plots.
    pub fn peak(&self) -> u64 {
        self.bins.iter().flatten().copied().max().unwrap_or(0)
    }
}

pub fn channel_histograms(buffer: &PixelBuffer) -> ChannelHistograms {
    let stride = buffer.stride();
    let bins = if buffer.pixel_count() >= PARALLEL_PIXEL_THRESHOLD {
        buffer
            .as_bytes()
            .par_chunks_exact(stride)
            .fold(empty_bins, accumulate_row)
            .reduce(empty_bins, merge_bins)
    } else {
        buffer
            .as_bytes()
            .chunks_exact(stride)
            .fold(empty_bins(), accumulate_row)
    };
    ChannelHistograms { bins }
}

fn empty_bins() -> Bins {
    [[0; HISTOGRAM_BINS]; COLOR_CHANNEL_COUNT]
}

fn accumulate_row(mut bins: Bins, row: &[u8]) -> Bins {
    for px in row.chunks_exact(RGBA_CHANNELS) {
        for (c, channel_bins) in bins.iter_mut().enumerate() {
            channel_bins[px[c] as usize] += 1;
        }
    }
    bins
}

fn merge_bins(mut a: Bins, b: Bins) -> Bins {
    for (dst, src) in a.iter_mut().zip(b.iter()) {
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d += s;
        }
    }
    a
}
