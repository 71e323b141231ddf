use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

// Navy palette picked to sit on top of the background gradient.
pub const BG_DEEP: Color32 = Color32::from_rgb(15, 31, 61);
pub const BG_PANEL: Color32 = Color32::from_rgba_premultiplied(12, 24, 48, 235);
pub const BG_WIDGET: Color32 = Color32::from_rgb(30, 48, 90);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(44, 66, 118);
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(56, 85, 148);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(214, 222, 240);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(140, 156, 190);

pub const ACCENT_PINK: Color32 = Color32::from_rgb(255, 102, 153);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(68, 204, 136);
pub const ACCENT_PURPLE: Color32 = Color32::from_rgb(153, 95, 211);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(230, 160, 60);
pub const ACCENT_RED: Color32 = Color32::from_rgb(210, 70, 70);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(90, 110, 170, 90);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(126, 151, 206);

fn widget(bg: Color32, stroke: Stroke, fg: Color32, expansion: f32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: stroke,
        rounding: Rounding::same(5.0),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.widgets = egui::style::Widgets {
        noninteractive: widget(BG_PANEL, Stroke::new(1.0, BORDER_SUBTLE), TEXT_MUTED, 0.0),
        inactive: widget(BG_WIDGET, Stroke::new(1.0, BORDER_SUBTLE), TEXT_PRIMARY, 0.0),
        hovered: widget(BG_WIDGET_HOVER, Stroke::new(1.0, BORDER_ACCENT), Color32::WHITE, 1.0),
        active: widget(BG_WIDGET_ACTIVE, Stroke::new(2.0, ACCENT_PURPLE), Color32::WHITE, 1.0),
        open: widget(BG_WIDGET_ACTIVE, Stroke::new(1.0, BORDER_ACCENT), Color32::WHITE, 0.0),
    };
    visuals.selection = egui::style::Selection {
        bg_fill: ACCENT_PURPLE.gamma_multiply(0.5),
        stroke: Stroke::new(1.0, ACCENT_PURPLE),
    };
    visuals.extreme_bg_color = BG_DEEP;
    visuals.faint_bg_color = BG_PANEL;
    visuals.warn_fg_color = ACCENT_ORANGE;
    visuals.error_fg_color = ACCENT_RED;
    visuals.window_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(8.0);
    visuals.panel_fill = BG_PANEL;
    visuals.slider_trailing_fill = true;
    visuals.handle_shape = egui::style::HandleShape::Circle;
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.slider_width = 180.0;

    style.text_styles = [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into();

    ctx.set_style(style);
}
