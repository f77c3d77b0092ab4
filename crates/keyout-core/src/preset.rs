use serde::{Deserialize, Serialize};

use crate::threshold::ThresholdState;

/// Saved masking settings: the six bounds and the highlight toggle.
///
/// Shells read and write presets as TOML; the core never persists one on
/// its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskPreset {
    #[serde(default)]
    pub thresholds: ThresholdState,
    #[serde(default)]
    pub highlight: bool,
}

impl MaskPreset {
    pub fn new(thresholds: ThresholdState, highlight: bool) -> Self {
        Self {
            thresholds,
            highlight,
        }
    }
}
