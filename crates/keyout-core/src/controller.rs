use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::error::{KeyoutError, Result};
use crate::io::image_io::{normalize_save_path, orient_portrait};
use crate::io::{FsImageStore, ImageStore};
use crate::mask::{compute_mask, mask_stats, MaskStats};
use crate::preset::MaskPreset;
use crate::sampler::thresholds_from_click;
use crate::threshold::{Bound, Channel, ThresholdState};
use crate::viewport::{Point, ViewportTransform, ZoomDirection};

/// One of the two display regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pane {
    Input,
    Output,
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::Input => write!(f, "Input"),
            Pane::Output => write!(f, "Output"),
        }
    }
}

/// Everything a UI shell can ask the controller to do.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    LoadImage(PathBuf),
    SaveImage(PathBuf),
    ToggleHighlight,
    ToggleClickSample,
    ResetThresholds,
    SetThreshold {
        channel: Channel,
        bound: Bound,
        value: u8,
    },
    /// Replace thresholds and highlight from a preset.
    ApplyPreset(MaskPreset),
    Wheel {
        pane: Pane,
        point: Point,
        direction: ZoomDirection,
    },
    Drag {
        pane: Pane,
        delta: Point,
    },
    Click {
        pane: Pane,
        point: Point,
    },
    /// Fit the whole image into a pane of `view_size`.
    FitView {
        pane: Pane,
        view_size: Point,
    },
    /// Both panes back to native scale at the origin.
    ResetViews,
}

/// What handling an event changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A new image is loaded and its mask computed.
    Loaded { width: u32, height: u32 },
    /// The mask was recomputed; the displayed output changed.
    Recomputed,
    /// Only a pane transform changed.
    ViewChanged,
    /// The masked image was written here (after extension normalization).
    Saved(PathBuf),
    /// A mode flag flipped without touching any buffer.
    ModeChanged,
    /// Nothing happened.
    Ignored,
}

struct Session {
    path: PathBuf,
    source: PixelBuffer,
    /// Masked output without highlight, the buffer `save` writes.
    processed: PixelBuffer,
    /// Highlighted preview, present only while highlight is on.
    highlighted: Option<PixelBuffer>,
    stats: MaskStats,
}

enum ViewerState {
    NoImage,
    ImageLoaded(Box<Session>),
}

/// Owns the loaded image, the thresholds and both pane transforms, and
/// turns [`ViewerEvent`]s into state transitions.
///
/// Every event is handled synchronously; a threshold change recomputes the
/// whole mask before `handle` returns. Errors leave the controller in the
/// state it was in before the event.
pub struct ViewerController {
    store: Box<dyn ImageStore>,
    state: ViewerState,
    thresholds: ThresholdState,
    highlight: bool,
    click_sample: bool,
    input_view: ViewportTransform,
    output_view: ViewportTransform,
    revision: u64,
}

impl Default for ViewerController {
    fn default() -> Self {
        Self::new(FsImageStore)
    }
}

impl ViewerController {
    pub fn new(store: impl ImageStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            state: ViewerState::NoImage,
            thresholds: ThresholdState::full(),
            highlight: false,
            click_sample: false,
            input_view: ViewportTransform::identity(),
            output_view: ViewportTransform::identity(),
            revision: 0,
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Result<Outcome> {
        match event {
            ViewerEvent::LoadImage(path) => self.load(&path),
            ViewerEvent::SaveImage(path) => self.save(&path).map(Outcome::Saved),
            ViewerEvent::ToggleHighlight => Ok(self.toggle_highlight()),
            ViewerEvent::ToggleClickSample => {
                self.click_sample = !self.click_sample;
                debug!(active = self.click_sample, "Click sampling toggled");
                Ok(Outcome::ModeChanged)
            }
            ViewerEvent::ResetThresholds => Ok(self.replace_thresholds(ThresholdState::full())),
            ViewerEvent::SetThreshold {
                channel,
                bound,
                value,
            } => {
                let mut next = self.thresholds;
                next.set(channel, bound, value);
                Ok(self.replace_thresholds(next))
            }
            ViewerEvent::ApplyPreset(preset) => Ok(self.apply_preset(preset)),
            ViewerEvent::Wheel {
                pane,
                point,
                direction,
            } => Ok(self.update_view(pane, |view| view.zoom_at(point, direction))),
            ViewerEvent::Drag { pane, delta } => {
                Ok(self.update_view(pane, |view| view.pan_by(delta)))
            }
            ViewerEvent::Click { pane, point } => Ok(self.click(pane, point)),
            ViewerEvent::FitView { pane, view_size } => {
                let Some(size) = self.image_size() else {
                    return Ok(Outcome::Ignored);
                };
                Ok(self.update_view(pane, |view| view.fit(size, view_size)))
            }
            ViewerEvent::ResetViews => {
                self.input_view.reset();
                self.output_view.reset();
                Ok(Outcome::ViewChanged)
            }
        }
    }

    fn load(&mut self, path: &Path) -> Result<Outcome> {
        let decoded = self.store.load(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Load failed, keeping current image");
        })?;
        let source = orient_portrait(decoded)?;
        let (width, height) = (source.width(), source.height());

        self.thresholds = ThresholdState::full();
        self.input_view.reset();
        self.output_view.reset();
        let mut session = Session {
            path: path.to_path_buf(),
            processed: source.clone(),
            source,
            highlighted: None,
            stats: MaskStats::default(),
        };
        self.recompute(&mut session);
        self.state = ViewerState::ImageLoaded(Box::new(session));

        info!(path = %path.display(), width, height, "Image loaded");
        Ok(Outcome::Loaded { width, height })
    }

    fn save(&self, path: &Path) -> Result<PathBuf> {
        let ViewerState::ImageLoaded(session) = &self.state else {
            return Err(KeyoutError::NoProcessedImage);
        };
        let target = normalize_save_path(path);
        self.store
            .save(&session.processed, &target)
            .inspect_err(|e| warn!(path = %target.display(), error = %e, "Save failed"))?;
        info!(path = %target.display(), "Masked image saved");
        Ok(target)
    }

    fn toggle_highlight(&mut self) -> Outcome {
        self.highlight = !self.highlight;
        debug!(active = self.highlight, "Highlight toggled");
        if self.refresh() {
            Outcome::Recomputed
        } else {
            Outcome::ModeChanged
        }
    }

    fn replace_thresholds(&mut self, next: ThresholdState) -> Outcome {
        if !self.is_loaded() {
            return Outcome::Ignored;
        }
        self.thresholds = next;
        self.refresh();
        Outcome::Recomputed
    }

    fn apply_preset(&mut self, preset: MaskPreset) -> Outcome {
        if !self.is_loaded() {
            return Outcome::Ignored;
        }
        self.highlight = preset.highlight;
        self.replace_thresholds(preset.thresholds)
    }

    fn click(&mut self, pane: Pane, point: Point) -> Outcome {
        if pane != Pane::Input || !self.click_sample {
            return Outcome::Ignored;
        }
        let ViewerState::ImageLoaded(session) = &self.state else {
            return Outcome::Ignored;
        };
        match thresholds_from_click(&session.source, &self.input_view, point) {
            Ok(pinned) => {
                debug!(thresholds = %pinned, "Thresholds pinned from click");
                self.replace_thresholds(pinned)
            }
            Err(e) => {
                debug!(error = %e, "Click outside image ignored");
                Outcome::Ignored
            }
        }
    }

    fn update_view(&mut self, pane: Pane, f: impl FnOnce(&mut ViewportTransform)) -> Outcome {
        if !self.is_loaded() {
            return Outcome::Ignored;
        }
        f(self.view_mut(pane));
        Outcome::ViewChanged
    }

    /// Recompute the current session's mask. False when no image is loaded.
    fn refresh(&mut self) -> bool {
        let mut state = std::mem::replace(&mut self.state, ViewerState::NoImage);
        let loaded = match &mut state {
            ViewerState::ImageLoaded(session) => {
                self.recompute(session);
                true
            }
            ViewerState::NoImage => false,
        };
        self.state = state;
        loaded
    }

    fn recompute(&mut self, session: &mut Session) {
        let start = Instant::now();
        session.processed = compute_mask(&session.source, &self.thresholds, false);
        session.highlighted = self
            .highlight
            .then(|| compute_mask(&session.source, &self.thresholds, true));
        session.stats = mask_stats(&session.source, &self.thresholds);
        self.revision += 1;
        debug!(
            thresholds = %self.thresholds,
            masked = session.stats.masked,
            total = session.stats.total,
            highlight = self.highlight,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Mask recomputed"
        );
    }

    fn session(&self) -> Option<&Session> {
        match &self.state {
            ViewerState::ImageLoaded(session) => Some(session),
            ViewerState::NoImage => None,
        }
    }

    fn view_mut(&mut self, pane: Pane) -> &mut ViewportTransform {
        match pane {
            Pane::Input => &mut self.input_view,
            Pane::Output => &mut self.output_view,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ViewerState::ImageLoaded(_))
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.session().map(|s| s.path.as_path())
    }

    /// Image dimensions as a point, for view fitting.
    pub fn image_size(&self) -> Option<Point> {
        self.source()
            .map(|b| Point::new(b.width() as f64, b.height() as f64))
    }

    /// The loaded (orientation-corrected) source image.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.session().map(|s| &s.source)
    }

    /// What the output pane should show: highlighted while highlight is on.
    pub fn preview(&self) -> Option<&PixelBuffer> {
        self.session()
            .map(|s| s.highlighted.as_ref().unwrap_or(&s.processed))
    }

    /// The masked buffer `save` would write. Never highlighted.
    pub fn processed(&self) -> Option<&PixelBuffer> {
        self.session().map(|s| &s.processed)
    }

    pub fn stats(&self) -> Option<MaskStats> {
        self.session().map(|s| s.stats)
    }

    pub fn thresholds(&self) -> ThresholdState {
        self.thresholds
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn click_sample_active(&self) -> bool {
        self.click_sample
    }

    pub fn preset(&self) -> MaskPreset {
        MaskPreset::new(self.thresholds, self.highlight)
    }

    pub fn view(&self, pane: Pane) -> &ViewportTransform {
        match pane {
            Pane::Input => &self.input_view,
            Pane::Output => &self.output_view,
        }
    }

    /// Bumped on every mask recompute; shells compare it to know when to
    /// re-upload the output texture.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
