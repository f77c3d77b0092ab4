use keyout_core::histogram::ChannelHistograms;

/// Shell-side state that the controller does not own.
#[derive(Default)]
pub struct UIState {
    /// Log messages.
    pub log_messages: Vec<String>,

    /// Channel histograms of the loaded source, computed once per load.
    pub histograms: Option<ChannelHistograms>,

    /// Size of one image pane at the last layout, used by "Fit to Window".
    pub pane_size: Option<keyout_core::viewport::Point>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
