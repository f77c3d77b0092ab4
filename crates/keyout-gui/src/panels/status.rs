use keyout_core::controller::Pane;

use crate::app::KeyoutApp;

pub fn show(ctx: &egui::Context, app: &mut KeyoutApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(size) = app.viewer.image_size() {
                ui.label(format!("{}x{}", size.x, size.y));
                ui.separator();
            }
            for pane in [Pane::Input, Pane::Output] {
                ui.label(format!("{pane}: {:.0}%", app.viewer.view(pane).scale() * 100.0));
                ui.separator();
            }
            if let Some(stats) = app.viewer.stats() {
                ui.label(format!("Masked: {} / {}", stats.masked, stats.total));
                ui.separator();
            }
            ui.label(format!("Ranges: {}", app.viewer.thresholds()));
            if app.viewer.click_sample_active() {
                ui.separator();
                ui.colored_label(egui::Color32::from_rgb(255, 160, 40), "Click to pick");
            }
        });

        ui.add_space(2.0);
    });
}
