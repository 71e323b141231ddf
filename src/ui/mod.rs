pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{SceneSummary, UiActions, draw_question_overlay, draw_side_panel};
pub use state::UiState;
pub use theme::apply_theme;
