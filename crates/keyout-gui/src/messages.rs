use std::path::PathBuf;

use keyout_core::preset::MaskPreset;

/// Results sent back from file-dialog threads to the UI thread.
///
/// Dialog threads only pick paths and read or write preset text; every
/// image decode and encode happens on the UI thread through the controller.
pub enum DialogResult {
    OpenImage { path: PathBuf },
    SaveImage { path: PathBuf },
    PresetImported { path: PathBuf, preset: MaskPreset },
    PresetExported { path: PathBuf },
    Error { message: String },
}
