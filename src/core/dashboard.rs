//! Turns a prediction outcome into plain display data: theme tokens, the
//! contribution bar series, and the two narrative callouts.

use uuid::Uuid;

use super::prediction::{
    ContributionEntry,
    Direction,
    IncompleteReason,
    PredictionOutcome,
    PredictionResult,
    RiskClass,
};

pub const PROTECTION_FALLBACK: &str = "Activity Level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `alpha` in 0.0..=1.0
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8, ..self }
    }
}

pub const WARM: Rgba = Rgba::rgb(0xff, 0x00, 0x55);
pub const VIOLET: Rgba = Rgba::rgb(0x70, 0x00, 0xff);
pub const COOL: Rgba = Rgba::rgb(0x00, 0xf2, 0xea);
pub const SKY: Rgba = Rgba::rgb(0x0e, 0xa5, 0xe9);
pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warm,
    Cool,
}

impl Tone {
    pub fn bar_color(self) -> Rgba {
        match self {
            Tone::Warm => WARM.with_alpha(0.8),
            Tone::Cool => COOL.with_alpha(0.8),
        }
    }
}

impl From<Direction> for Tone {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Positive => Tone::Warm,
            Direction::Negative => Tone::Cool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskTheme {
    pub label: &'static str,
    pub tone: Tone,
    pub gauge_start: Rgba,
    pub gauge_end: Rgba,
}

impl RiskTheme {
    pub fn for_class(class: RiskClass) -> Self {
        match class {
            RiskClass::High => {
                Self { label: "High Risk", tone: Tone::Warm, gauge_start: WARM, gauge_end: VIOLET }
            }
            RiskClass::Low => {
                Self { label: "Low Risk", tone: Tone::Cool, gauge_start: COOL, gauge_end: SKY }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub feature: String,
    pub value: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Narrative {
    pub primary_risk_factor: String,
    pub strongest_protection: String,
}

impl Narrative {
    /// Primary factor is the first entry. Protection is the first negative
    /// entry found scanning from the end, else the fixed fallback label.
    pub fn derive(contributions: &[ContributionEntry]) -> Option<Self> {
        let primary = contributions.first()?;
        let protection = contributions
            .iter()
            .rev()
            .find(|entry| entry.direction == Direction::Negative)
            .map(|entry| entry.feature.clone())
            .unwrap_or_else(|| PROTECTION_FALLBACK.to_string());

        Some(Self { primary_risk_factor: primary.feature.clone(), strongest_protection: protection })
    }
}

/// Keeps the collaborator's ordering; colors depend only on direction.
pub fn chart_series(contributions: &[ContributionEntry]) -> Vec<ChartBar> {
    contributions
        .iter()
        .map(|entry| ChartBar {
            feature: entry.feature.clone(),
            value: entry.weight_percent,
            color: Tone::from(entry.direction).bar_color(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub result_id: Uuid,
    pub assessed_at: String,
    pub classification: RiskClass,
    pub theme: RiskTheme,
    pub gauge_target: f64,
    pub bars: Vec<ChartBar>,
    pub narrative: Narrative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Restart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    Incomplete(IncompleteReason),
    Report(ReportView),
}

impl Dashboard {
    pub fn from_outcome(outcome: &PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Incomplete(reason) => Dashboard::Incomplete(reason.clone()),
            PredictionOutcome::Complete(result) => Self::from_result(result),
        }
    }

    fn from_result(result: &PredictionResult) -> Self {
        let narrative = match Narrative::derive(&result.contributions) {
            Some(narrative) => narrative,
            None => return Dashboard::Incomplete(IncompleteReason::MissingContributions),
        };

        Dashboard::Report(ReportView {
            result_id: result.id,
            assessed_at: result.received_at.format("%Y-%m-%d %H:%M").to_string(),
            classification: result.classification,
            theme: RiskTheme::for_class(result.classification),
            gauge_target: result.risk_percentage,
            bars: chart_series(&result.contributions),
            narrative,
        })
    }

    /// Actions the rendered view offers. The incomplete view only offers restart.
    pub fn actions(&self) -> &'static [DashboardAction] {
        &[DashboardAction::Restart]
    }

    /// The one-shot celebration applies to low-risk reports only.
    pub fn celebration_key(&self) -> Option<Uuid> {
        match self {
            Dashboard::Report(report) if report.classification == RiskClass::Low => {
                Some(report.result_id)
            }
            _ => None,
        }
    }
}
