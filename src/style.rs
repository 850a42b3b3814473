use eframe::egui;

pub struct ColorPalette;

impl ColorPalette {
    pub const BRAND_BLUE: egui::Color32 = egui::Color32::from_rgb(0x2B, 0x37, 0x80);
    pub const BRAND_BLUE_HOVER: egui::Color32 = egui::Color32::from_rgb(0x22, 0x2C, 0x66);
    pub const PRIMARY_BLUE: egui::Color32 = egui::Color32::from_rgb(0x2F, 0x39, 0x8E);
    pub const PARAGRAPH_GRAY: egui::Color32 = egui::Color32::from_rgb(0x8D, 0x8D, 0x8D);
    pub const WARNING_ORANGE: egui::Color32 = egui::Color32::from_rgb(0xF5, 0x9E, 0x42);
    pub const LAVENDER: egui::Color32 = egui::Color32::from_rgb(230, 230, 250);

    pub const SLATE_50: egui::Color32 = egui::Color32::from_rgb(248, 250, 252);
    pub const SLATE_100: egui::Color32 = egui::Color32::from_rgb(241, 245, 249);
    pub const SLATE_200: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
    pub const SLATE_300: egui::Color32 = egui::Color32::from_rgb(203, 213, 225);
    pub const SLATE_400: egui::Color32 = egui::Color32::from_rgb(148, 163, 184);
    pub const SLATE_600: egui::Color32 = egui::Color32::from_rgb(71, 85, 105);
    pub const SLATE_700: egui::Color32 = egui::Color32::from_rgb(51, 65, 85);

    pub const RED_500: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
}

/// Font families resolved from the loaded asset bundle. A family whose
/// file failed to load is the default proportional family.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeFonts {
    pub black: egui::FontFamily,
    pub semibold: egui::FontFamily,
    pub bold: egui::FontFamily,
    pub medium: egui::FontFamily,
    pub regular: egui::FontFamily,
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self {
            black: egui::FontFamily::Proportional,
            semibold: egui::FontFamily::Proportional,
            bold: egui::FontFamily::Proportional,
            medium: egui::FontFamily::Proportional,
            regular: egui::FontFamily::Proportional,
        }
    }
}

/// Immutable look of the admin window, handed to every component.
#[derive(Debug, Clone)]
pub struct Theme {
    pub fonts: ThemeFonts,
    pub background: egui::Color32,
    pub title: egui::Color32,
    pub paragraph: egui::Color32,
    pub text_dark: egui::Color32,
    pub trigger: egui::Color32,
    pub trigger_hover: egui::Color32,
    pub item_bg: egui::Color32,
    pub item_hover: egui::Color32,
    pub item_text: egui::Color32,
    pub panel_fill: egui::Color32,
    pub panel_border: egui::Color32,
    pub secondary_fill: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,
}

impl Theme {
    pub fn new(fonts: ThemeFonts) -> Self {
        Self {
            fonts,
            background: egui::Color32::WHITE,
            title: ColorPalette::BRAND_BLUE,
            paragraph: ColorPalette::PARAGRAPH_GRAY,
            text_dark: ColorPalette::SLATE_600,
            trigger: ColorPalette::BRAND_BLUE,
            trigger_hover: ColorPalette::BRAND_BLUE_HOVER,
            item_bg: egui::Color32::WHITE,
            item_hover: ColorPalette::SLATE_100,
            item_text: ColorPalette::SLATE_700,
            panel_fill: egui::Color32::WHITE,
            panel_border: ColorPalette::SLATE_200,
            secondary_fill: ColorPalette::SLATE_200,
            warning: ColorPalette::WARNING_ORANGE,
            error: ColorPalette::RED_500,
        }
    }

    pub fn font(&self, family: &egui::FontFamily, size: f32) -> egui::FontId {
        egui::FontId::new(size, family.clone())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeFonts::default())
    }
}

pub fn apply_theme(ctx: &egui::Context, theme: &Theme) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = false;
    style.visuals.panel_fill = theme.background;
    style.visuals.window_fill = theme.panel_fill;
    style.visuals.faint_bg_color = ColorPalette::SLATE_50;
    style.visuals.extreme_bg_color = egui::Color32::WHITE;

    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(6);

    style.visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, theme.panel_border);
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, theme.text_dark);
    style.visuals.widgets.inactive.bg_fill = ColorPalette::SLATE_50;
    style.visuals.widgets.inactive.weak_bg_fill = ColorPalette::SLATE_100;
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, ColorPalette::SLATE_300);
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, theme.item_text);
    style.visuals.widgets.hovered.bg_fill = ColorPalette::SLATE_100;
    style.visuals.widgets.hovered.weak_bg_fill = ColorPalette::SLATE_200;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ColorPalette::SLATE_400);
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, theme.item_text);
    style.visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);

    style.visuals.selection.bg_fill = egui::Color32::from_rgba_premultiplied(43, 55, 128, 60);
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ColorPalette::BRAND_BLUE);
    style.visuals.hyperlink_color = ColorPalette::PRIMARY_BLUE;

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    ctx.set_style(style);
}

pub fn primary_button(ui: &mut egui::Ui, text: &str, theme: &Theme) -> egui::Response {
    ui.scope(|ui| {
        let style = ui.style_mut();
        for visuals in [
            &mut style.visuals.widgets.inactive,
            &mut style.visuals.widgets.hovered,
            &mut style.visuals.widgets.active,
        ] {
            visuals.bg_fill = theme.trigger;
            visuals.weak_bg_fill = theme.trigger;
            visuals.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
            visuals.bg_stroke = egui::Stroke::NONE;
        }
        style.visuals.widgets.hovered.weak_bg_fill = theme.trigger_hover;

        let button = egui::Button::new(
            egui::RichText::new(text).font(theme.font(&theme.fonts.bold, 14.0))
        )
        .min_size(egui::vec2(80.0, 30.0));

        ui.add(button)
    }).inner
}

pub fn secondary_button(ui: &mut egui::Ui, text: &str, theme: &Theme) -> egui::Response {
    ui.scope(|ui| {
        let style = ui.style_mut();
        for visuals in [
            &mut style.visuals.widgets.inactive,
            &mut style.visuals.widgets.hovered,
            &mut style.visuals.widgets.active,
        ] {
            visuals.bg_fill = theme.secondary_fill;
            visuals.weak_bg_fill = theme.secondary_fill;
            visuals.fg_stroke = egui::Stroke::new(1.0, theme.trigger);
            visuals.bg_stroke = egui::Stroke::NONE;
        }
        style.visuals.widgets.hovered.weak_bg_fill = ColorPalette::SLATE_300;

        let button = egui::Button::new(
            egui::RichText::new(text).font(theme.font(&theme.fonts.bold, 14.0))
        )
        .min_size(egui::vec2(80.0, 30.0));

        ui.add(button)
    }).inner
}
