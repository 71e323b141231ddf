use egui::{Color32, Context, RichText, ScrollArea, Ui};
use std::sync::atomic::Ordering;

use crate::config::Density;
use crate::scene::BuildStats;
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub rebuild: bool,
    pub reset_camera: bool,
    pub toggle_mesh: bool,
}

/// What the panel shows about the scene currently on screen.
pub struct SceneSummary {
    pub objects: usize,
    pub generation: u64,
    pub pending: bool,
}

pub const LESSON_QUESTIONS: [&str; 4] = [
    "1. How many segments does the smooth planet need before it looks round?",
    "2. Why do the small craters vanish at low density while the big hills survive?",
    "3. Which shape shows faceting first when you lower the density, and why?",
    "4. What does the mesh overlay tell you about where the triangles are spent?",
];

pub const CONTROL_HINTS: &str =
    "LMB click - Focus | LMB drag - Rotate | RMB drag - Pan | Scroll - Zoom";

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    stats: &BuildStats,
    summary: &SceneSummary,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(260.0)
        .max_width(360.0)
        .default_width(290.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Mesh Density").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Displaced planets, donuts and terrain")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(16.0);

                section_header(ui, "RESOLUTION");
                let mut value = state.density.get();
                let slider = egui::Slider::new(&mut value, Density::SLIDER_RANGE)
                    .text("segments")
                    .clamping(egui::SliderClamping::Always);
                if ui.add(slider).changed() && state.set_density(value) {
                    actions.rebuild = true;
                }
                if summary.pending {
                    ui.label(RichText::new("rebuilding...").color(ACCENT_ORANGE).size(11.0));
                }
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                ui.horizontal(|ui| {
                    let mesh_btn = egui::Button::new(RichText::new(state.mesh_toggle_label()))
                        .min_size(egui::vec2(110.0, 30.0));
                    if ui.add(mesh_btn).clicked() {
                        actions.toggle_mesh = true;
                    }
                    let reset_btn =
                        egui::Button::new("Reset camera").min_size(egui::vec2(110.0, 30.0));
                    if ui.add(reset_btn).clicked() {
                        actions.reset_camera = true;
                    }
                });
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.vsync_enabled, "VSync");
                    ui.checkbox(&mut state.show_stats, "Stats");
                    ui.checkbox(&mut state.show_questions, "Questions");
                });
                ui.add_space(12.0);

                legend(ui);

                if let Some(label) = &state.focused {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Focus:").color(TEXT_MUTED));
                        ui.label(RichText::new(label).color(Color32::WHITE));
                    });
                }

                if state.show_stats {
                    ui.add_space(16.0);
                    stats_panel(ui, stats, summary);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn legend(ui: &mut Ui) {
    section_header(ui, "RELIEF");
    for (color, name) in [
        (ACCENT_PURPLE, "Smooth"),
        (ACCENT_GREEN, "Big"),
        (ACCENT_PINK, "Small"),
    ] {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 3.0, color);
            ui.label(name);
        });
    }
}

fn stats_panel(ui: &mut Ui, stats: &BuildStats, summary: &SceneSummary) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps = *stats.fps.lock();
            let fps_color = if fps >= 60.0 {
                ACCENT_GREEN
            } else if fps >= 30.0 {
                ACCENT_ORANGE
            } else {
                ACCENT_RED
            };

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    stat_row(ui, "FPS", format!("{fps:.0}"), fps_color);
                    stat_row(ui, "Objects", summary.objects.to_string(), TEXT_PRIMARY);
                    stat_row(
                        ui,
                        "Vertices",
                        fmt_num(stats.vertices.load(Ordering::Relaxed)),
                        TEXT_PRIMARY,
                    );
                    stat_row(
                        ui,
                        "Triangles",
                        fmt_num(stats.triangles.load(Ordering::Relaxed)),
                        TEXT_PRIMARY,
                    );
                    stat_row(
                        ui,
                        "Build ms",
                        format!("{:.1}", *stats.last_build_ms.lock()),
                        TEXT_PRIMARY,
                    );
                    stat_row(ui, "Generation", summary.generation.to_string(), TEXT_MUTED);
                });
        });
}

fn stat_row(ui: &mut Ui, label: &str, value: String, color: Color32) {
    ui.label(RichText::new(label).color(TEXT_MUTED));
    ui.label(RichText::new(value).color(color));
    ui.end_row();
}

/// Static lesson questions and control hints, bottom-left.
pub fn draw_question_overlay(ctx: &Context) {
    egui::Area::new(egui::Id::new("question_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(170))
                .rounding(6.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_max_width(420.0);
                    ui.label(RichText::new("Questions").strong().color(Color32::WHITE));
                    ui.add_space(4.0);
                    for question in LESSON_QUESTIONS {
                        ui.label(RichText::new(question).color(TEXT_PRIMARY).size(12.0));
                    }
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new(CONTROL_HINTS)
                            .color(TEXT_MUTED)
                            .font(egui::FontId::new(11.0, egui::FontFamily::Monospace)),
                    );
                });
        });
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}
