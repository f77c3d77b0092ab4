use keyout_core::controller::Pane;

/// GPU texture for one pane plus the controller revision it was built from.
#[derive(Default)]
pub struct PaneTexture {
    pub texture: Option<egui::TextureHandle>,
    pub revision: Option<u64>,
}

#[derive(Default)]
pub struct PaneTextures {
    pub input: PaneTexture,
    pub output: PaneTexture,
}

impl PaneTextures {
    pub fn get(&self, pane: Pane) -> &PaneTexture {
        match pane {
            Pane::Input => &self.input,
            Pane::Output => &self.output,
        }
    }
}
