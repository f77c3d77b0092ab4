use keyout_core::controller::{Pane, ViewerEvent};
use keyout_core::preset::MaskPreset;

use crate::app::KeyoutApp;
use crate::messages::DialogResult;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp", "gif",
];

const OPEN_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
const SAVE_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
const QUIT_SHORTCUT: egui::KeyboardShortcut =
    egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

pub fn show(ctx: &egui::Context, app: &mut KeyoutApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open = egui::Button::new("Open...")
                    .shortcut_text(ctx.format_shortcut(&OPEN_SHORTCUT));
                if ui.add(open).clicked() {
                    ui.close();
                    open_file(ctx, app);
                }

                let save = egui::Button::new("Save As...")
                    .shortcut_text(ctx.format_shortcut(&SAVE_SHORTCUT));
                if ui.add_enabled(app.viewer.is_loaded(), save).clicked() {
                    ui.close();
                    save_file(ctx, app);
                }

                ui.separator();

                if ui.button("Import Preset...").clicked() {
                    ui.close();
                    import_preset(ctx, app);
                }

                if ui.button("Export Preset...").clicked() {
                    ui.close();
                    export_preset(ctx, app);
                }

                ui.separator();

                let quit = egui::Button::new("Quit")
                    .shortcut_text(ctx.format_shortcut(&QUIT_SHORTCUT));
                if ui.add(quit).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Thresholds").clicked() {
                    ui.close();
                    app.dispatch(ViewerEvent::ResetThresholds);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    if let Some(size) = app.ui_state.pane_size {
                        for pane in [Pane::Input, Pane::Output] {
                            app.dispatch(ViewerEvent::FitView {
                                pane,
                                view_size: size,
                            });
                        }
                    }
                }
                if ui.button("Actual Size").clicked() {
                    ui.close();
                    app.dispatch(ViewerEvent::ResetViews);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN_SHORTCUT)) {
            open_file(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SAVE_SHORTCUT)) && app.viewer.is_loaded() {
            save_file(ctx, app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT_SHORTCUT)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_file(ctx: &egui::Context, app: &KeyoutApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = tx.send(DialogResult::OpenImage { path });
            ctx.request_repaint();
        }
    });
}

pub(crate) fn save_file(ctx: &egui::Context, app: &KeyoutApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("BMP", &["bmp"])
            .set_file_name("masked.png")
            .save_file()
        {
            let _ = tx.send(DialogResult::SaveImage { path });
            ctx.request_repaint();
        }
    });
}

fn import_preset(ctx: &egui::Context, app: &KeyoutApp) {
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| {
                toml::from_str::<MaskPreset>(&content).map_err(anyhow::Error::from)
            });
        let msg = match result {
            Ok(preset) => DialogResult::PresetImported { path, preset },
            Err(e) => DialogResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = tx.send(msg);
        ctx.request_repaint();
    });
}

fn export_preset(ctx: &egui::Context, app: &KeyoutApp) {
    let preset = app.viewer.preset();
    let tx = app.dialog_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("keyout_preset.toml")
            .save_file()
        else {
            return;
        };
        let result = toml::to_string_pretty(&preset)
            .map_err(anyhow::Error::from)
            .and_then(|content| std::fs::write(&path, content).map_err(anyhow::Error::from));
        let msg = match result {
            Ok(()) => DialogResult::PresetExported { path },
            Err(e) => DialogResult::Error {
                message: format!("Failed to export {}: {e}", path.display()),
            },
        };
        let _ = tx.send(msg);
        ctx.request_repaint();
    });
}
