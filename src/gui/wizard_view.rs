use std::collections::HashMap;

use eframe::egui;

use super::{
    choice_select::choice_select,
    theme::Theme,
};
use crate::core::{
    choice::{
        ChoiceSelector,
        OutsidePressRegistry,
    },
    schema::{
        FieldDescriptor,
        FieldKind,
    },
    RawInput,
    Wizard,
};

const FIELD_SPACING: f32 = 18.0;
const INDICATOR_HEIGHT: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Submit,
}

/// Widget-side state for the wizard: live dropdowns for the visible step and
/// the raw text of numeric inputs.
#[derive(Default)]
pub struct WizardView {
    shown_step: Option<usize>,
    selectors: HashMap<&'static str, ChoiceSelector>,
    text_buffers: HashMap<&'static str, String>,
}

impl WizardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every dropdown (releasing their listeners) and forgets typed text.
    pub fn reset(&mut self) {
        self.shown_step = None;
        self.selectors.clear();
        self.text_buffers.clear();
    }

    fn sync_step(&mut self, wizard: &Wizard) {
        if self.shown_step == Some(wizard.cursor()) {
            return;
        }

        self.selectors.clear();
        for field in wizard.current_step().fields.iter().filter(|f| f.is_choice()) {
            self.selectors.insert(field.id, ChoiceSelector::new(field.id));
        }
        self.shown_step = Some(wizard.cursor());
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        wizard: &mut Wizard,
        registry: &OutsidePressRegistry,
        theme: &Theme,
        pending: bool,
    ) -> Option<WizardAction> {
        self.sync_step(wizard);
        let ctx = ui.ctx().clone();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(theme.heading(&ctx, wizard.current_step().title).size(30.0));
                ui.label(
                    egui::RichText::new(format!(
                        "STEP {} / {}",
                        wizard.cursor() + 1,
                        wizard.step_count()
                    ))
                    .color(theme.accent(&ctx))
                    .small(),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.step_indicators(ui, wizard, theme);
            });
        });

        ui.add_space(FIELD_SPACING);

        egui::Grid::new(("wizard_fields", wizard.cursor()))
            .num_columns(2)
            .spacing([24.0, FIELD_SPACING])
            .min_col_width(220.0)
            .show(ui, |ui| {
                for (i, field) in wizard.current_step().fields.iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(field.label.to_uppercase()).color(theme.muted(&ctx)).small());
                        self.field_input(ui, field, wizard, registry, theme);
                    });
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(FIELD_SPACING);
        ui.separator();

        let mut action = None;
        ui.horizontal(|ui| {
            if !wizard.is_first() && ui.button("⏴ Back").clicked() {
                wizard.retreat();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if wizard.is_terminal() {
                    let text = if pending { "Processing..." } else { "🔍 Analyze Now" };
                    let button = egui::Button::new(egui::RichText::new(text).strong())
                        .min_size(egui::vec2(160.0, 36.0));
                    if ui.add_enabled(!pending, button).clicked() {
                        action = Some(WizardAction::Submit);
                    }
                    if pending {
                        ui.spinner();
                    }
                } else if ui
                    .add(egui::Button::new("Next Step ⏵").min_size(egui::vec2(140.0, 36.0)))
                    .clicked()
                {
                    wizard.advance();
                }
            });
        });

        action
    }

    fn step_indicators(&self, ui: &mut egui::Ui, wizard: &mut Wizard, theme: &Theme) {
        let ctx = ui.ctx().clone();
        // right_to_left layout, so walk the steps backwards.
        for index in (0..wizard.step_count()).rev() {
            let current = index == wizard.cursor();
            let width = if current { 32.0 } else { 12.0 };
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(width, INDICATOR_HEIGHT), egui::Sense::click());
            let fill = if current { theme.accent(&ctx) } else { theme.muted(&ctx).gamma_multiply(0.4) };
            ui.painter().rect_filled(rect, INDICATOR_HEIGHT / 2.0, fill);

            if response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                if let Err(e) = wizard.jump_to(index) {
                    log::warn!("Ignoring step jump: {}", e);
                }
            }
        }
    }

    fn field_input(
        &mut self,
        ui: &mut egui::Ui,
        field: &'static FieldDescriptor,
        wizard: &mut Wizard,
        registry: &OutsidePressRegistry,
        theme: &Theme,
    ) {
        let value = wizard.answers().get(field.id).unwrap_or(f64::NAN);

        match field.kind {
            FieldKind::Choice(_) => {
                let Some(selector) = self.selectors.get_mut(field.id) else {
                    return;
                };
                choice_select(ui, selector, registry, field, value, theme, |field_id, code| {
                    if let Err(e) = wizard.set_field(field_id, RawInput::Code(code)) {
                        log::warn!("Rejected selection: {}", e);
                    }
                });
            }
            FieldKind::Numeric => {
                let buffer =
                    self.text_buffers.entry(field.id).or_insert_with(|| format_value(value));
                let response = ui.add(
                    egui::TextEdit::singleline(buffer)
                        .hint_text("0")
                        .desired_width(f32::INFINITY)
                        .min_size(egui::vec2(0.0, 32.0)),
                );
                if response.changed() {
                    if let Err(e) = wizard.set_field(field.id, RawInput::Text(buffer.clone())) {
                        log::warn!("Rejected input: {}", e);
                    }
                }
            }
        }
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(170.0), "170");
        assert_eq!(format_value(72.5), "72.5");
        assert_eq!(format_value(f64::NAN), "");
    }

    #[test]
    fn test_step_change_rebuilds_selectors() {
        let registry = OutsidePressRegistry::new();
        let mut view = WizardView::new();
        let mut wizard = Wizard::new();

        view.sync_step(&wizard);
        assert_eq!(view.selectors.len(), 1);
        view.selectors.get_mut("gender").unwrap().toggle(&registry);
        assert_eq!(registry.active_count(), 1);

        wizard.advance();
        view.sync_step(&wizard);
        assert_eq!(view.selectors.len(), 2);
        assert!(view.selectors.contains_key("cholesterol"));
        assert_eq!(registry.active_count(), 0);

        view.reset();
        assert!(view.selectors.is_empty());
    }
}
