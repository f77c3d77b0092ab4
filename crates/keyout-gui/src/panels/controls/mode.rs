use keyout_core::controller::ViewerEvent;

use crate::app::KeyoutApp;

pub(super) fn mode_section(ui: &mut egui::Ui, app: &mut KeyoutApp) {
    crate::panels::section_header(ui, "Mode", None);
    ui.add_space(4.0);

    let mut highlight = app.viewer.highlight();
    if ui
        .checkbox(&mut highlight, "Highlight masked pixels")
        .on_hover_text(
            "Tint keyed-out pixels red in the output pane. Saving never includes the tint.",
        )
        .changed()
    {
        app.dispatch(ViewerEvent::ToggleHighlight);
    }

    let mut click_sample = app.viewer.click_sample_active();
    if ui
        .checkbox(&mut click_sample, "Pick color by clicking")
        .on_hover_text("Click the input pane to key out exactly that color.")
        .changed()
    {
        app.dispatch(ViewerEvent::ToggleClickSample);
    }
}
