use keyout_core::controller::ViewerEvent;
use keyout_core::threshold::{Bound, Channel};

use super::histogram::channel_chart;
use crate::app::KeyoutApp;

pub(super) fn threshold_section(ui: &mut egui::Ui, app: &mut KeyoutApp) {
    let status = app
        .viewer
        .stats()
        .map(|s| format!("{:.1}% masked", s.fraction() * 100.0));
    crate::panels::section_header(ui, "Color Ranges", status.as_deref());
    ui.add_space(4.0);

    let loaded = app.viewer.is_loaded();
    let mut events = Vec::new();

    ui.add_enabled_ui(loaded, |ui| {
        let thresholds = app.viewer.thresholds();
        for channel in Channel::ALL {
            match app.ui_state.histograms {
                Some(ref histograms) => {
                    channel_chart(ui, channel, histograms, thresholds.range(channel));
                }
                None => {
                    ui.small(channel.to_string());
                }
            }
            for bound in [Bound::Lower, Bound::Upper] {
                let mut value = thresholds.get(channel, bound);
                if ui
                    .add(egui::Slider::new(&mut value, 0..=255).text(bound.to_string()))
                    .changed()
                {
                    events.push(ViewerEvent::SetThreshold {
                        channel,
                        bound,
                        value,
                    });
                }
            }
            if thresholds.range(channel).is_inverted() {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 160, 40),
                    "Lower is above upper: nothing is masked",
                );
            }
            ui.add_space(4.0);
        }

        if ui.button("Reset Ranges").clicked() {
            events.push(ViewerEvent::ResetThresholds);
        }
    });

    for event in events {
        app.dispatch(event);
    }
}
