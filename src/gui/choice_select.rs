use eframe::egui;

use crate::{
    core::{
        choice::{
            ChoiceSelector,
            OutsidePressRegistry,
            Region,
        },
        schema::FieldDescriptor,
    },
    gui::theme::Theme,
};

const HEADER_HEIGHT: f32 = 36.0;
const PANEL_GAP: f32 = 4.0;

fn to_region(rect: egui::Rect) -> Region {
    Region { min: (rect.min.x, rect.min.y), max: (rect.max.x, rect.max.y) }
}

/// Draws a dropdown for `field`. `on_change` receives `(field_id, code)` when
/// an option is picked.
pub fn choice_select<F>(
    ui: &mut egui::Ui,
    selector: &mut ChoiceSelector,
    registry: &OutsidePressRegistry,
    field: &FieldDescriptor,
    value: f64,
    theme: &Theme,
    on_change: F,
) where
    F: FnOnce(&'static str, i64),
{
    selector.sync();

    let options = field.options();
    let label = ChoiceSelector::selected_label(value, options).unwrap_or_default();
    let arrow = if selector.is_open() { "⏶" } else { "⏷" };
    let stroke_color = if selector.is_open() { theme.accent(ui.ctx()) } else { theme.muted(ui.ctx()) };

    let header = ui.add_sized(
        [ui.available_width(), HEADER_HEIGHT],
        egui::Button::new(format!("{label}    {arrow}"))
            .stroke(egui::Stroke::new(1.0, stroke_color))
            .corner_radius(10.0),
    );

    if header.clicked() {
        selector.toggle(registry);
    }

    if !selector.is_open() {
        return;
    }

    let mut picked = None;
    let accent = theme.accent(ui.ctx());
    let panel = egui::Area::new(ui.id().with(("choice_panel", field.id)))
        .order(egui::Order::Foreground)
        .fixed_pos(header.rect.left_bottom() + egui::vec2(0.0, PANEL_GAP))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_min_width(header.rect.width() - 12.0);
                for option in options {
                    let selected = option.code as f64 == value;
                    let text = if selected {
                        egui::RichText::new(format!("{}  ✔", option.display)).color(accent)
                    } else {
                        egui::RichText::new(option.display)
                    };
                    if ui.selectable_label(selected, text).clicked() {
                        picked = Some(option.code);
                    }
                }
            });
        });

    selector.set_region(to_region(header.rect.union(panel.response.rect)));

    if let Some(code) = picked {
        selector.select(code, on_change);
    }
}
