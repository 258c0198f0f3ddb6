use eframe::egui;

use super::data::SettingsData;

/// Edits a copy of the settings; the app only sees it again on Save.
pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
    timeout_text: String,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default(), timeout_text: String::new() }
    }

    pub fn open_settings(&mut self, current_settings: SettingsData) {
        self.timeout_text = current_settings.request_timeout_secs.to_string();
        self.draft = current_settings;
        self.open = true;
    }

    /// Returns the edited settings once the user saves.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut saved = None;
        let draft = &mut self.draft;
        let timeout_text = &mut self.timeout_text;

        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(460.0);
            ui.heading("Settings");
            ui.add_space(8.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Prediction URL:");
                ui.add(egui::TextEdit::singleline(&mut draft.prediction_url).desired_width(280.0));
                ui.end_row();

                ui.label("Request timeout (s):");
                let timeout_valid = timeout_text.trim().parse::<u64>().is_ok();
                let mut edit = egui::TextEdit::singleline(timeout_text).desired_width(60.0);
                if !timeout_valid {
                    edit = edit.text_color(ui.visuals().error_fg_color);
                }
                if ui.add(edit).changed() {
                    if let Ok(secs) = timeout_text.trim().parse::<u64>() {
                        draft.request_timeout_secs = secs;
                    }
                }
                ui.end_row();

                ui.label("Reduce motion:");
                ui.checkbox(&mut draft.reduce_motion, "Skip celebration effects");
                ui.end_row();
            });

            ui.add_space(10.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    saved = Some(draft.clone());
                    ui.close();
                }
                if ui.button("Cancel").clicked() {
                    ui.close();
                }
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        saved
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
