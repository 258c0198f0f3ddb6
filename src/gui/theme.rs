use eframe::egui::{
    self,
    RichText,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

use crate::core::dashboard::{
    Rgba,
    Tone,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::cardio()
    }
}

impl Theme {
    pub fn cardio() -> Self {
        Theme { dark: ThemeDetails::midnight(), light: ThemeDetails::daylight() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).foreground).strong()
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).accent
    }

    pub fn secondary(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).secondary
    }

    pub fn success(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).success
    }

    pub fn warning(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).warning
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).muted
    }

    pub fn track(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).track
    }

    pub fn card(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).card
    }

    pub fn tone(&self, tone: Tone) -> Color32 {
        to_color(match tone {
            Tone::Warm => crate::core::dashboard::WARM,
            Tone::Cool => crate::core::dashboard::COOL,
        })
    }
}

#[derive(Clone)]
pub struct ThemeDetails {
    background: Color32,
    card: Color32,
    foreground: Color32,
    muted: Color32,
    selection: Color32,
    border: Color32,
    track: Color32,
    accent: Color32,
    secondary: Color32,
    success: Color32,
    warning: Color32,
    danger: Color32,
}

impl ThemeDetails {
    fn midnight() -> Self {
        Self {
            background: Color32::from_rgb(0x0a, 0x0f, 0x29),
            card: Color32::from_rgb(0x12, 0x19, 0x3a),
            foreground: Color32::from_rgb(0xf8, 0xfa, 0xfc),
            muted: Color32::from_rgb(0x94, 0xa3, 0xb8),
            selection: Color32::from_rgb(0x1e, 0x29, 0x52),
            border: Color32::from_rgb(0x26, 0x31, 0x5c),
            track: Color32::from_rgba_unmultiplied(255, 255, 255, 13),
            accent: Color32::from_rgb(0x00, 0xf2, 0xea),
            secondary: Color32::from_rgb(0x70, 0x00, 0xff),
            success: Color32::from_rgb(0x10, 0xb9, 0x81),
            warning: Color32::from_rgb(0xea, 0xb3, 0x08),
            danger: Color32::from_rgb(0xff, 0x00, 0x55),
        }
    }

    fn daylight() -> Self {
        Self {
            background: Color32::from_rgb(0xf1, 0xf5, 0xf9),
            card: Color32::from_rgb(0xff, 0xff, 0xff),
            foreground: Color32::from_rgb(0x0f, 0x17, 0x2a),
            muted: Color32::from_rgb(0x47, 0x55, 0x69),
            selection: Color32::from_rgb(0xcc, 0xf5, 0xf3),
            border: Color32::from_rgb(0xcb, 0xd5, 0xe1),
            track: Color32::from_rgba_unmultiplied(15, 23, 42, 20),
            accent: Color32::from_rgb(0x0d, 0x94, 0x88),
            secondary: Color32::from_rgb(0x6d, 0x28, 0xd9),
            success: Color32::from_rgb(0x05, 0x96, 0x69),
            warning: Color32::from_rgb(0xca, 0x8a, 0x04),
            danger: Color32::from_rgb(0xe1, 0x1d, 0x48),
        }
    }
}

pub fn to_color(rgba: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

pub fn blend_colors(color_a: Color32, color_b: Color32, t: f32) -> Color32 {
    let blend_channel = |a: u8, b: u8| ((1.0 - t) * (a as f32) + t * (b as f32)).round() as u8;
    Color32::from_rgba_unmultiplied(
        blend_channel(color_a.r(), color_b.r()),
        blend_channel(color_a.g(), color_b.g()),
        blend_channel(color_a.b(), color_b.b()),
        blend_channel(color_a.a(), color_b.a()),
    )
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: WidgetVisuals {
                    bg_fill: theme.card,
                    weak_bg_fill: theme.card,
                    bg_stroke: Stroke { color: theme.border, ..default.widgets.noninteractive.bg_stroke },
                    fg_stroke: Stroke {
                        color: theme.foreground,
                        ..default.widgets.noninteractive.fg_stroke
                    },
                    ..default.widgets.noninteractive
                },
                inactive: WidgetVisuals {
                    bg_fill: theme.selection,
                    weak_bg_fill: theme.card,
                    bg_stroke: Stroke { color: theme.border, ..default.widgets.inactive.bg_stroke },
                    fg_stroke: Stroke { color: theme.foreground, ..default.widgets.inactive.fg_stroke },
                    ..default.widgets.inactive
                },
                hovered: WidgetVisuals {
                    bg_fill: theme.selection,
                    weak_bg_fill: theme.selection,
                    bg_stroke: Stroke { color: theme.accent, ..default.widgets.hovered.bg_stroke },
                    fg_stroke: Stroke { color: theme.foreground, ..default.widgets.hovered.fg_stroke },
                    ..default.widgets.hovered
                },
                active: WidgetVisuals {
                    bg_fill: theme.selection,
                    weak_bg_fill: theme.selection,
                    bg_stroke: Stroke { color: theme.accent, ..default.widgets.active.bg_stroke },
                    fg_stroke: Stroke { color: theme.foreground, ..default.widgets.active.fg_stroke },
                    ..default.widgets.active
                },
                open: WidgetVisuals {
                    bg_fill: theme.background,
                    weak_bg_fill: theme.card,
                    bg_stroke: Stroke { color: theme.accent, ..default.widgets.open.bg_stroke },
                    fg_stroke: Stroke { color: theme.foreground, ..default.widgets.open.fg_stroke },
                    ..default.widgets.open
                },
            },
            selection: Selection {
                bg_fill: theme.selection,
                stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
            },
            hyperlink_color: theme.accent,
            faint_bg_color: theme.card,
            extreme_bg_color: theme.background,
            code_bg_color: theme.card,
            error_fg_color: theme.danger,
            warn_fg_color: theme.warning,
            window_shadow: Shadow { color: theme.background, ..default.window_shadow },
            window_fill: theme.card,
            window_stroke: Stroke { color: theme.border, ..default.window_stroke },
            panel_fill: theme.background,
            popup_shadow: Shadow { color: theme.background, ..default.popup_shadow },
            ..default
        },
    );
}
