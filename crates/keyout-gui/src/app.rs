use std::sync::mpsc;

use keyout_core::controller::{Outcome, ViewerController, ViewerEvent};
use keyout_core::histogram::channel_histograms;
use tracing::warn;

use crate::convert::buffer_to_color_image;
use crate::messages::DialogResult;
use crate::panels;
use crate::states::{PaneTexture, PaneTextures, UIState};

pub struct KeyoutApp {
    pub viewer: ViewerController,
    pub dialog_tx: mpsc::Sender<DialogResult>,
    pub dialog_rx: mpsc::Receiver<DialogResult>,
    pub ui_state: UIState,
    pub textures: PaneTextures,
}

impl KeyoutApp {
    pub fn new() -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();
        Self {
            viewer: ViewerController::default(),
            dialog_tx,
            dialog_rx,
            ui_state: UIState::default(),
            textures: PaneTextures::default(),
        }
    }

    /// Feed one event to the controller and log what it did.
    pub fn dispatch(&mut self, event: ViewerEvent) {
        match self.viewer.handle(event) {
            Ok(Outcome::Loaded { width, height }) => {
                self.textures.input = PaneTexture::default();
                self.ui_state.histograms = self.viewer.source().map(channel_histograms);
                let name = self
                    .viewer
                    .image_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                self.ui_state.add_log(format!("Opened: {name} ({width}x{height})"));
            }
            Ok(Outcome::Saved(path)) => {
                self.ui_state.add_log(format!("Saved: {}", path.display()));
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Event failed");
                self.ui_state.add_log(format!("ERROR: {e}"));
            }
        }
    }

    /// Drain everything the dialog threads have sent.
    fn poll_dialogs(&mut self) {
        while let Ok(result) = self.dialog_rx.try_recv() {
            match result {
                DialogResult::OpenImage { path } => self.dispatch(ViewerEvent::LoadImage(path)),
                DialogResult::SaveImage { path } => self.dispatch(ViewerEvent::SaveImage(path)),
                DialogResult::PresetImported { path, preset } => {
                    self.ui_state
                        .add_log(format!("Preset imported: {}", path.display()));
                    self.dispatch(ViewerEvent::ApplyPreset(preset));
                }
                DialogResult::PresetExported { path } => {
                    self.ui_state
                        .add_log(format!("Preset exported: {}", path.display()));
                }
                DialogResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn textures_stale(&self) -> bool {
        self.viewer.is_loaded()
            && (self.textures.input.texture.is_none()
                || self.textures.output.revision != Some(self.viewer.revision()))
    }

    /// Re-upload pane textures whose buffers changed since the last frame.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let revision = self.viewer.revision();

        if self.textures.input.texture.is_none() {
            if let Some(source) = self.viewer.source() {
                self.textures.input = PaneTexture {
                    texture: Some(ctx.load_texture(
                        "input",
                        buffer_to_color_image(source),
                        egui::TextureOptions::NEAREST,
                    )),
                    revision: Some(revision),
                };
            }
        }

        if self.textures.output.revision != Some(revision) {
            if let Some(preview) = self.viewer.preview() {
                self.textures.output = PaneTexture {
                    texture: Some(ctx.load_texture(
                        "output",
                        buffer_to_color_image(preview),
                        egui::TextureOptions::NEAREST,
                    )),
                    revision: Some(revision),
                };
            }
        }
    }
}

impl eframe::App for KeyoutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dialogs();
        self.sync_textures(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        // Events handled this frame are drawn on the next one.
        if self.textures_stale() {
            ctx.request_repaint();
        }

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About keyout")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("keyout");
                        ui.label("Color-key masking");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
