use super::{
    answers::AnswerRecord,
    dashboard::Dashboard,
    prediction::PredictionOutcome,
    wizard::Wizard,
    CardioError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Editing,
    Pending,
    Showing(Dashboard),
}

/// Host-level flow around the wizard: one submission at a time, then the
/// dashboard, then back to a fresh wizard on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub wizard: Wizard,
    phase: Phase,
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment {
    pub fn new() -> Self {
        Self { wizard: Wizard::new(), phase: Phase::Editing }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    pub fn begin_submission(&mut self) -> Result<AnswerRecord, CardioError> {
        match self.phase {
            Phase::Editing => {}
            Phase::Pending => return Err(CardioError::SubmissionInFlight),
            Phase::Showing(_) => {
                return Err(CardioError::Custom("A result is already being shown".to_string()))
            }
        }

        let answers = self.wizard.submit()?;
        self.phase = Phase::Pending;
        Ok(answers)
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.phase {
            Phase::Showing(dashboard) => Some(dashboard),
            _ => None,
        }
    }

    pub fn resolve(&mut self, outcome: PredictionOutcome) -> Result<(), CardioError> {
        if !self.is_pending() {
            return Err(CardioError::NoPendingSubmission);
        }

        self.phase = Phase::Showing(Dashboard::from_outcome(&outcome));
        Ok(())
    }

    pub fn restart(&mut self) {
        log::info!("Restarting assessment");
        self.wizard.reset();
        self.phase = Phase::Editing;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::{
        answers::RawInput,
        dashboard::DashboardAction,
    };

    fn ready() -> Assessment {
        let mut assessment = Assessment::new();
        assessment.wizard.jump_to(2).unwrap();
        assessment
    }

    #[test]
    fn test_single_outstanding_submission() {
        let mut assessment = ready();
        let answers = assessment.begin_submission().unwrap();
        assert_eq!(answers.len(), 11);
        assert!(assessment.is_pending());

        assert!(matches!(assessment.begin_submission(), Err(CardioError::SubmissionInFlight)));
    }

    #[test]
    fn test_submission_requires_final_step() {
        let mut assessment = Assessment::new();
        assert!(matches!(assessment.begin_submission(), Err(CardioError::NotAtFinalStep)));
        assert_eq!(assessment.phase(), &Phase::Editing);
    }

    #[test]
    fn test_resolve_without_pending_fails() {
        let mut assessment = Assessment::new();
        let err = assessment.resolve(PredictionOutcome::from_json(None)).unwrap_err();
        assert!(matches!(err, CardioError::NoPendingSubmission));
    }

    #[test]
    fn test_failed_request_shows_incomplete_view() {
        let mut assessment = ready();
        assessment.begin_submission().unwrap();
        assessment.resolve(PredictionOutcome::failed("connection refused")).unwrap();
        assert!(matches!(assessment.dashboard(), Some(Dashboard::Incomplete(_))));
    }

    #[test]
    fn test_restart_from_incomplete_view_resets_wizard() {
        let mut assessment = ready();
        assessment.wizard.set_field("age", RawInput::Number(70.0)).unwrap();
        assessment.begin_submission().unwrap();
        assessment.resolve(PredictionOutcome::from_json(None)).unwrap();
        let dashboard = assessment.dashboard().cloned().unwrap();

        let mut restarts = 0;
        for action in dashboard.actions() {
            match action {
                DashboardAction::Restart => {
                    restarts += 1;
                    assessment.restart();
                }
            }
        }

        assert_eq!(restarts, 1);
        assert_eq!(assessment, Assessment::new());
    }

    #[test]
    fn test_report_flow() {
        let mut assessment = ready();
        assessment.begin_submission().unwrap();
        assessment
            .resolve(PredictionOutcome::from_json(Some(json!({
                "prediction": 0,
                "probability": 18,
                "importance": [{ "feature": "active", "importance": 20, "impact": "Negative" }]
            }))))
            .unwrap();

        let Some(Dashboard::Report(report)) = assessment.dashboard() else {
            panic!("expected a report");
        };
        assert_eq!(report.gauge_target, 18.0);
        assert_eq!(report.narrative.strongest_protection, "active");
        assert!(matches!(assessment.phase(), Phase::Showing(_)));
    }
}
