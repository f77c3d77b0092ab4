use std::path::Path;

use console::Style;
use keyout_core::controller::ViewerController;
use keyout_core::threshold::{Channel, ChannelRange};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    inverted: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            inverted: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_mask_summary(viewer: &ViewerController, input: &Path, output: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Keyout Mask"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(11)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    if let Some(size) = viewer.image_size() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Size"),
            s.value.apply_to(format!("{}x{}", size.x, size.y))
        );
    }

    let thresholds = viewer.thresholds();
    for channel in Channel::ALL {
        let range = thresholds.range(channel);
        println!(
            "  {:<14}{}",
            s.label.apply_to(channel.to_string()),
            format_range(&s, range)
        );
    }

    if let Some(stats) = viewer.stats() {
        println!(
            "  {:<14}{} of {} ({:.1}%)",
            s.label.apply_to("Masked"),
            s.value.apply_to(stats.masked),
            stats.total,
            stats.fraction() * 100.0
        );
    }
    println!();
}

fn format_range(s: &Styles, range: ChannelRange) -> String {
    let text = format!("{}-{}", range.lower, range.upper);
    if range.is_inverted() {
        format!("{} {}", s.inverted.apply_to(text), s.inverted.apply_to("(matches nothing)"))
    } else {
        s.value.apply_to(text).to_string()
    }
}
