use serde::{Deserialize, Serialize};

use crate::buffer::Rgb;
use crate::consts::CHANNEL_MAX;

/// One of the three color channels taking part in the range test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside an RGBA pixel.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Red => write!(f, "Red"),
            Channel::Green => write!(f, "Green"),
            Channel::Blue => write!(f, "Blue"),
        }
    }
}

/// Which end of a channel range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    Lower,
    Upper,
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Lower => write!(f, "Lower"),
            Bound::Upper => write!(f, "Upper"),
        }
    }
}

/// Inclusive `[lower, upper]` range for one channel.
///
/// Nothing forces `lower <= upper`. An inverted range contains no value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub lower: u8,
    pub upper: u8,
}

impl ChannelRange {
    pub const FULL: ChannelRange = ChannelRange {
        lower: 0,
        upper: CHANNEL_MAX,
    };

    pub const fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }

    /// Collapsed range matching exactly one value.
    pub const fn pinned(value: u8) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn is_inverted(&self) -> bool {
        self.lower > self.upper
    }
}

impl Default for ChannelRange {
    fn default() -> Self {
        Self::FULL
    }
}

/// The six bounds of the active color key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdState {
    #[serde(default)]
    pub red: ChannelRange,
    #[serde(default)]
    pub green: ChannelRange,
    #[serde(default)]
    pub blue: ChannelRange,
}

impl ThresholdState {
    /// Every channel open over 0..=255, so every pixel matches.
    pub fn full() -> Self {
        Self::default()
    }

    /// Pin all six bounds to `color`, collapsing each channel to one value.
    pub fn pinned(color: Rgb) -> Self {
        Self {
            red: ChannelRange::pinned(color.r),
            green: ChannelRange::pinned(color.g),
            blue: ChannelRange::pinned(color.b),
        }
    }

    pub fn range(&self, channel: Channel) -> ChannelRange {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn range_mut(&mut self, channel: Channel) -> &mut ChannelRange {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }

    pub fn get(&self, channel: Channel, bound: Bound) -> u8 {
        let range = self.range(channel);
        match bound {
            Bound::Lower => range.lower,
            Bound::Upper => range.upper,
        }
    }

    pub fn set(&mut self, channel: Channel, bound: Bound, value: u8) {
        let range = self.range_mut(channel);
        match bound {
            Bound::Lower => range.lower = value,
            Bound::Upper => range.upper = value,
        }
    }

    /// Range test on the color channels; alpha never takes part.
    #[inline]
    pub fn contains(&self, r: u8, g: u8, b: u8) -> bool {
        self.red.contains(r) && self.green.contains(g) && self.blue.contains(b)
    }

    /// Bounds in `[lower_r, upper_r, lower_g, upper_g, lower_b, upper_b]` order.
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.red.lower,
            self.red.upper,
            self.green.lower,
            self.green.upper,
            self.blue.lower,
            self.blue.upper,
        ]
    }
}

impl std::fmt::Display for ThresholdState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "R {}-{}, G {}-{}, B {}-{}",
            self.red.lower,
            self.red.upper,
            self.green.lower,
            self.green.upper,
            self.blue.lower,
            self.blue.upper
        )
    }
}
