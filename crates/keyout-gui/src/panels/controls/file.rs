use crate::app::KeyoutApp;
use crate::panels::menu_bar::{open_file, save_file};

pub(super) fn file_section(ui: &mut egui::Ui, app: &mut KeyoutApp) {
    crate::panels::section_header(ui, "File", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Open...").clicked() {
            open_file(ui.ctx(), app);
        }
        if ui
            .add_enabled(app.viewer.is_loaded(), egui::Button::new("Save As..."))
            .clicked()
        {
            save_file(ui.ctx(), app);
        }
    });

    if let Some(path) = app.viewer.image_path() {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }
    if let Some(size) = app.viewer.image_size() {
        ui.small(format!("{}x{}", size.x, size.y));
    }
}
