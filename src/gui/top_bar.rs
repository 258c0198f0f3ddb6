use eframe::egui::{
    self,
    containers,
};

use crate::gui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    OpenSettings,
    NewAssessment,
    Quit,
}

pub struct TopBar;

impl TopBar {
    pub fn show(ctx: &egui::Context, theme: &Theme, endpoint: &str, pending: bool) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.label(egui::RichText::new("♥").size(18.0).color(theme.secondary(ctx)));
                ui.label(theme.heading(ctx, "CardioScope").size(16.0));
                ui.add_space(12.0);

                egui::widgets::global_theme_preference_switch(ui);

                ui.menu_button("File", |ui| {
                    if ui.add_enabled(!pending, egui::Button::new("New Assessment")).clicked() {
                        action = Some(TopBarAction::NewAssessment);
                    }
                    if ui.button("Quit").clicked() {
                        action = Some(TopBarAction::Quit);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Prediction Service").clicked() {
                        action = Some(TopBarAction::OpenSettings);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (color, tooltip) = if pending {
                        (theme.warning(ctx), "Waiting for the prediction service")
                    } else {
                        (theme.muted(ctx), "Prediction service endpoint")
                    };
                    ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
                    ui.small(endpoint).on_hover_text(tooltip);
                });
            });
        });

        action
    }
}
