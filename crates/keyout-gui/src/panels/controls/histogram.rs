use egui_plot::{Bar, BarChart, Plot, VLine};
use keyout_core::histogram::ChannelHistograms;
use keyout_core::threshold::{Channel, ChannelRange};

/// Height of each channel histogram in pixels.
const CHART_HEIGHT: f32 = 60.0;

fn channel_color(channel: Channel) -> egui::Color32 {
    match channel {
        Channel::Red => egui::Color32::from_rgb(220, 70, 70),
        Channel::Green => egui::Color32::from_rgb(80, 180, 80),
        Channel::Blue => egui::Color32::from_rgb(80, 120, 230),
    }
}

/// Value histogram of one channel with the current range bounds marked.
/// Bins inside the range are drawn in the channel color, the rest in gray.
/// All three charts share the y scale of the tallest bin.
pub(super) fn channel_chart(
    ui: &mut egui::Ui,
    channel: Channel,
    histograms: &ChannelHistograms,
    range: ChannelRange,
) {
    let color = channel_color(channel);
    ui.small(format!(
        "{channel}: {} px in range",
        histograms.count_in(channel, range)
    ));
    let outside = egui::Color32::from_rgb(110, 110, 110);

    let bars: Vec<Bar> = histograms
        .channel(channel)
        .iter()
        .enumerate()
        .map(|(value, &count)| {
            let fill = if range.contains(value as u8) { color } else { outside };
            Bar::new(value as f64, count as f64).fill(fill).width(1.0)
        })
        .collect();

    let chart = BarChart::new(channel.to_string(), bars);
    let marker = egui::Color32::from_rgb(255, 160, 40);

    Plot::new(format!("histogram_{channel}"))
        .height(CHART_HEIGHT)
        .include_x(0.0)
        .include_x(255.0)
        .include_y(0.0)
        .include_y(histograms.peak() as f64)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.vline(VLine::new("lower", range.lower as f64).color(marker).width(1.5));
            plot_ui.vline(VLine::new("upper", range.upper as f64).color(marker).width(1.5));
        });
}
