use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle};
use std::collections::BTreeMap;

/// Theme configuration
pub struct Theme {
    pub name: String,
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Story Dark".to_string(),
            dark_mode: true,
        }
    }
}

/// Apply the viewer theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut style = Style::default();
    let mut visuals = if theme.dark_mode { Visuals::dark() } else { Visuals::light() };

    let panel_bg = if theme.dark_mode { Color32::from_rgb(18, 22, 28) } else { Color32::from_rgb(244, 246, 248) };
    let widget_bg = if theme.dark_mode { Color32::from_rgb(36, 42, 52) } else { Color32::from_rgb(225, 230, 236) };
    let text_color = if theme.dark_mode { Color32::from_rgb(225, 228, 232) } else { Color32::from_rgb(30, 34, 40) };
    let accent = accent_color();

    visuals.window_fill = panel_bg;
    visuals.panel_fill = panel_bg;
    visuals.extreme_bg_color = panel_bg;

    visuals.widgets.inactive.bg_fill = widget_bg;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = widget_bg.linear_multiply(1.3);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = accent.linear_multiply(0.6);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, text_color);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = accent.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(12.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(16.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(16.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(34.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 150, 250)
}

/// Background for page `idx`, cycling through the story's chapters
pub fn page_background(idx: usize) -> Color32 {
    const PAGES: [Color32; 5] = [
        Color32::from_rgb(20, 28, 40),
        Color32::from_rgb(46, 24, 22),
        Color32::from_rgb(24, 38, 44),
        Color32::from_rgb(18, 34, 52),
        Color32::from_rgb(30, 40, 26),
    ];
    PAGES[idx % PAGES.len()]
}
