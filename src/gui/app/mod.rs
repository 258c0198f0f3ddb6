mod modals;

use eframe::egui;
use modals::Modals;

use super::{
    confetti::Confetti,
    dashboard_view::DashboardView,
    message_overlay::MessageOverlay,
    settings::{
        data::PREDICT_URL_ENV,
        SettingsData,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
    wizard_view::{
        WizardAction,
        WizardView,
    },
};
use crate::{
    core::{
        celebration::CelebrationGate,
        choice::OutsidePressRegistry,
        dashboard::DashboardAction,
        tasks::{
            TaskManager,
            TaskResult,
        },
        Assessment,
        CardioError,
        Phase,
    },
    persistence::load_json_or_default,
    predictor::PredictorClient,
};

const CONTENT_MAX_WIDTH: f32 = 1100.0;

pub struct CardioApp {
    // Assessment state
    pub assessment: Assessment,

    // Configuration
    pub settings_data: SettingsData,

    // UI State
    pub theme: Theme,
    pub wizard_view: WizardView,
    pub dashboard_view: DashboardView,
    pub message_overlay: MessageOverlay,
    confetti: Confetti,
    celebration_gate: CelebrationGate,
    press_registry: OutsidePressRegistry,

    // Modals
    pub modals: Modals,

    task_manager: TaskManager,
}

impl CardioApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, CardioError> {
        let task_manager = TaskManager::new()?;

        let settings_data = load_json_or_default::<SettingsData>(SettingsData::FILE_NAME)
            .with_env_override(std::env::var(PREDICT_URL_ENV).ok());

        let app = Self {
            assessment: Assessment::new(),
            dashboard_view: DashboardView::new(
                settings_data.gauge_delay(),
                settings_data.gauge_duration(),
            ),
            settings_data,

            theme: Theme::cardio(),
            wizard_view: WizardView::new(),
            message_overlay: MessageOverlay::new(),
            confetti: Confetti::new(),
            celebration_gate: CelebrationGate::new(),
            press_registry: OutsidePressRegistry::new(),

            modals: Modals::default(),

            task_manager,
        };

        app.setup_theme(cc);

        cc.egui_ctx.set_theme(if app.settings_data.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = if app.settings_data.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        log::info!("Prediction service: {}", app.settings_data.prediction_url);

        Ok(app)
    }

    fn setup_theme(&self, cc: &eframe::CreationContext<'_>) {
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);
        set_theme(&cc.egui_ctx, &self.theme);
    }
}

impl eframe::App for CardioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();

        for result in task_results {
            self.handle_task_result(result);
        }

        self.dispatch_pointer_presses(ctx);
        self.sync_dark_mode(ctx);

        if let Some(action) = TopBar::show(
            ctx,
            &self.theme,
            &self.settings_data.prediction_url,
            self.assessment.is_pending(),
        ) {
            match action {
                TopBarAction::OpenSettings => {
                    self.modals.settings.open_settings(self.settings_data.clone());
                }
                TopBarAction::NewAssessment => self.restart(),
                TopBarAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_MAX_WIDTH);
                    ui.add_space(24.0);
                    self.show_phase(ui);
                });
            });
        });

        self.update_celebration(ctx);

        self.message_overlay.show(ctx, &self.theme);
        self.modals.error.show(ctx, &self.theme);

        if let Some(settings) = self.modals.settings.show(ctx) {
            self.settings_data = settings;
            self.dashboard_view
                .set_timing(self.settings_data.gauge_delay(), self.settings_data.gauge_duration());
            self.save_settings();
        }
    }
}

impl CardioApp {
    fn show_phase(&mut self, ui: &mut egui::Ui) {
        let pending = self.assessment.is_pending();

        match self.assessment.phase() {
            Phase::Editing | Phase::Pending => {
                let action = self.wizard_view.show(
                    ui,
                    &mut self.assessment.wizard,
                    &self.press_registry,
                    &self.theme,
                    pending,
                );
                if let Some(WizardAction::Submit) = action {
                    self.submit(ui.ctx());
                }
            }
            Phase::Showing(dashboard) => {
                if let Some(DashboardAction::Restart) =
                    self.dashboard_view.show(ui, dashboard, &self.theme)
                {
                    self.restart();
                }
            }
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let client = match PredictorClient::new(self.settings_data.predictor_config()) {
            Ok(client) => client,
            Err(e) => {
                self.modals.error.show_error(
                    "Prediction Service",
                    "Could not prepare the request to the prediction service.",
                    Some(e.to_string()),
                );
                return;
            }
        };

        match self.assessment.begin_submission() {
            Ok(answers) => {
                log::info!("Submitting assessment with {} fields", answers.len());
                self.message_overlay.set_message("Analyzing your health profile...");
                self.task_manager.submit_prediction(client, answers, ctx.clone());
            }
            Err(e) => log::warn!("Submission ignored: {}", e),
        }
    }

    fn restart(&mut self) {
        if self.assessment.is_pending() {
            log::warn!("Restart ignored while a prediction is pending");
            return;
        }
        self.assessment.restart();
        self.wizard_view.reset();
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Prediction { outcome, error } => {
                self.message_overlay.clear_message();
                if let Some(error) = error {
                    log::warn!("Showing incomplete analysis: {}", error);
                    self.modals.error.show_error(
                        "Prediction Service",
                        "The prediction service could not be reached.",
                        Some(error),
                    );
                }
                if let Err(e) = self.assessment.resolve(outcome) {
                    log::error!("Dropping prediction result: {}", e);
                    self.modals.error.show_error(
                        "Unexpected Result",
                        "A prediction arrived that no assessment was waiting for.",
                        Some(e.to_string()),
                    );
                }
            }
            TaskResult::SettingsSaved(result) => match result {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => {
                    log::error!("Failed to save settings: {}", e);
                    self.modals.error.show_error(
                        "Settings",
                        "Your settings could not be saved.",
                        Some(e),
                    );
                }
            },
        }
    }

    /// Every press anywhere in the window is offered to open dropdowns so
    /// presses outside them close them.
    fn dispatch_pointer_presses(&self, ctx: &egui::Context) {
        let press = ctx.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });

        if let Some(pos) = press {
            self.press_registry.dispatch_press((pos.x, pos.y));
        }
    }

    fn sync_dark_mode(&mut self, ctx: &egui::Context) {
        let dark_mode = ctx.style().visuals.dark_mode;
        if dark_mode != self.settings_data.dark_mode {
            self.settings_data.dark_mode = dark_mode;
            self.save_settings();
        }
    }

    fn update_celebration(&mut self, ctx: &egui::Context) {
        let key = self.assessment.dashboard().and_then(|dashboard| dashboard.celebration_key());
        if self.celebration_gate.should_fire(key) {
            if self.settings_data.reduce_motion {
                log::info!("Celebration skipped (reduce motion)");
            } else {
                self.confetti.burst(ctx.screen_rect());
            }
        }

        if self.confetti.is_active() {
            let dt = ctx.input(|i| i.stable_dt).min(0.1);
            self.confetti.update(dt);
            self.confetti.paint(ctx);
            ctx.request_repaint();
        }
    }

    fn save_settings(&self) {
        self.task_manager.save_settings(self.settings_data.clone());
    }
}
