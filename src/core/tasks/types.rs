use crate::core::PredictionOutcome;

#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Completed request. Transport failures are carried as an incomplete
    /// outcome plus the error text for the modal.
    Prediction { outcome: PredictionOutcome, error: Option<String> },
    SettingsSaved(Result<(), String>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Prediction { .. } => "prediction",
            TaskResult::SettingsSaved(_) => "settings_saved",
        }
    }
}
