use crate::config::{AppConfig, Density};

pub struct UiState {
    pub density: Density,
    pub show_mesh: bool,
    pub vsync_enabled: bool,
    pub show_stats: bool,
    pub show_questions: bool,
    /// Label of the last picked object, if any.
    pub focused: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl UiState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            density: config.density,
            show_mesh: config.show_mesh,
            vsync_enabled: config.vsync,
            show_stats: true,
            show_questions: true,
            focused: None,
        }
    }

    pub fn toggle_mesh(&mut self) {
        self.show_mesh = !self.show_mesh;
    }

    pub fn mesh_toggle_label(&self) -> &'static str {
        if self.show_mesh { "Hide mesh" } else { "Show mesh" }
    }

    /// Applies a slider value. Returns true when the density actually changed.
    pub fn set_density(&mut self, value: u32) -> bool {
        match Density::new(value) {
            Ok(density) if density != self.density => {
                self.density = density;
                true
            }
            _ => false,
        }
    }
}
