use std::{
    f32::consts::{
        FRAC_PI_2,
        TAU,
    },
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui;
use egui_extras::{
    Size,
    StripBuilder,
};
use uuid::Uuid;

use super::theme::{
    blend_colors,
    to_color,
    Theme,
};
use crate::core::{
    dashboard::{
        ChartBar,
        Dashboard,
        DashboardAction,
        ReportView,
    },
    gauge::GaugeAnimation,
    prediction::IncompleteReason,
    schema,
};

const GAUGE_RADIUS: f32 = 100.0;
const GAUGE_STROKE: f32 = 16.0;
const GAUGE_SEGMENTS: usize = 120;
const BAR_HEIGHT: f32 = 26.0;
const BAR_LABEL_WIDTH: f32 = 120.0;
const CARD_PADDING: i8 = 24;

/// Per-result animation state. A new result id restarts the gauge sweep.
pub struct DashboardView {
    gauge: Option<(Uuid, GaugeAnimation, Instant)>,
    delay: Duration,
    duration: Duration,
}

impl DashboardView {
    pub fn new(delay: Duration, duration: Duration) -> Self {
        Self { gauge: None, delay, duration }
    }

    pub fn set_timing(&mut self, delay: Duration, duration: Duration) {
        self.delay = delay;
        self.duration = duration;
    }

    fn gauge_for(&mut self, report: &ReportView) -> (f64, bool) {
        let stale = self.gauge.as_ref().map(|(id, _, _)| *id != report.result_id).unwrap_or(true);
        if stale {
            let animation = GaugeAnimation::new(report.gauge_target, self.delay, self.duration);
            self.gauge = Some((report.result_id, animation, Instant::now()));
        }

        match &self.gauge {
            Some((_, animation, started)) => {
                let elapsed = started.elapsed();
                (animation.value_at(elapsed), animation.is_finished(elapsed))
            }
            None => (0.0, true),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        dashboard: &Dashboard,
        theme: &Theme,
    ) -> Option<DashboardAction> {
        match dashboard {
            Dashboard::Incomplete(reason) => show_incomplete(ui, reason, theme),
            Dashboard::Report(report) => self.show_report(ui, report, theme),
        }
    }

    fn show_report(
        &mut self,
        ui: &mut egui::Ui,
        report: &ReportView,
        theme: &Theme,
    ) -> Option<DashboardAction> {
        let (gauge_value, finished) = self.gauge_for(report);
        if !finished {
            ui.ctx().request_repaint();
        }

        let ctx = ui.ctx().clone();
        let mut action = None;

        StripBuilder::new(ui)
            .size(Size::exact(360.0))
            .size(Size::exact(150.0))
            .size(Size::exact(60.0))
            .vertical(|mut strip| {
                strip.strip(|builder| {
                    builder.size(Size::exact(320.0)).size(Size::remainder()).horizontal(|mut strip| {
                        strip.cell(|ui| {
                            card(ui, theme, |ui| gauge_card(ui, report, gauge_value, theme));
                        });
                        strip.cell(|ui| {
                            card(ui, theme, |ui| contribution_card(ui, &report.bars, theme));
                        });
                    });
                });
                strip.strip(|builder| {
                    builder.sizes(Size::remainder(), 2).horizontal(|mut strip| {
                        strip.cell(|ui| {
                            card(ui, theme, |ui| {
                                narrative_card(
                                    ui,
                                    "📈 Primary Risk Factor",
                                    theme.secondary(&ctx),
                                    &report.narrative.primary_risk_factor,
                                    "shows the highest deviation from optimal ranges, contributing significantly to the risk score.",
                                )
                            });
                        });
                        strip.cell(|ui| {
                            card(ui, theme, |ui| {
                                narrative_card(
                                    ui,
                                    "💚 Strongest Protection",
                                    theme.success(&ctx),
                                    &report.narrative.strongest_protection,
                                    "is your strongest health asset, helping to lower your overall risk.",
                                )
                            });
                        });
                    });
                });
                strip.cell(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(12.0);
                        if ui
                            .add(egui::Button::new("🔄 Start New Assessment").min_size(egui::vec2(220.0, 40.0)))
                            .clicked()
                        {
                            action = Some(DashboardAction::Restart);
                        }
                    });
                });
            });

        action
    }
}

fn card<R>(ui: &mut egui::Ui, theme: &Theme, content: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::new()
        .fill(theme.card(ui.ctx()))
        .corner_radius(16.0)
        .inner_margin(CARD_PADDING)
        .stroke(egui::Stroke::new(1.0, theme.track(ui.ctx())))
        .show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            content(ui)
        })
        .inner
}

fn show_incomplete(
    ui: &mut egui::Ui,
    reason: &IncompleteReason,
    theme: &Theme,
) -> Option<DashboardAction> {
    let ctx = ui.ctx().clone();
    let mut action = None;

    card(ui, theme, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(egui::RichText::new("⚠").size(64.0).color(theme.warning(&ctx)));
            ui.add_space(12.0);
            ui.label(theme.heading(&ctx, "Analysis Incomplete").size(28.0));
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "We couldn't retrieve your complete health profile. Please check your connection and try again.",
                )
                .color(theme.muted(&ctx)),
            );
            ui.add_space(4.0);
            ui.label(egui::RichText::new(reason.describe()).small().color(theme.muted(&ctx)));
            ui.add_space(20.0);
            if ui
                .add(egui::Button::new("Restart Assessment").min_size(egui::vec2(200.0, 40.0)))
                .clicked()
            {
                action = Some(DashboardAction::Restart);
            }
        });
    });

    action
}

fn gauge_card(ui: &mut egui::Ui, report: &ReportView, value: f64, theme: &Theme) {
    let ctx = ui.ctx().clone();
    let start = to_color(report.theme.gauge_start);
    let end = to_color(report.theme.gauge_end);

    ui.vertical_centered(|ui| {
        ui.label(theme.heading(&ctx, "Risk Index").size(22.0));
        ui.add_space(8.0);

        let size = egui::Vec2::splat(GAUGE_RADIUS * 2.0 + GAUGE_STROKE * 2.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();

        painter.circle_stroke(center, GAUGE_RADIUS, egui::Stroke::new(GAUGE_STROKE, theme.track(&ctx)));
        paint_arc(&painter, center, (value / 100.0) as f32, start, end);

        painter.text(
            center - egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            format!("{}%", value.round() as i64),
            egui::FontId::proportional(56.0),
            ctx.style().visuals.text_color(),
        );
        painter.text(
            center + egui::vec2(0.0, 36.0),
            egui::Align2::CENTER_CENTER,
            report.theme.label.to_uppercase(),
            egui::FontId::proportional(14.0),
            theme.tone(report.theme.tone),
        );

        ui.add_space(8.0);
        ui.label(egui::RichText::new(format!("Assessed {}", report.assessed_at)).small().color(theme.muted(&ctx)));
    });
}

/// Clockwise from twelve o'clock, blending `start` into `end` along the sweep.
fn paint_arc(painter: &egui::Painter, center: egui::Pos2, fraction: f32, start: egui::Color32, end: egui::Color32) {
    let fraction = fraction.clamp(0.0, 1.0);
    let segments = ((GAUGE_SEGMENTS as f32) * fraction).ceil() as usize;
    if segments == 0 {
        return;
    }

    let point = |t: f32| {
        let angle = -FRAC_PI_2 + TAU * fraction * t;
        center + egui::vec2(angle.cos(), angle.sin()) * GAUGE_RADIUS
    };

    for i in 0..segments {
        let t0 = i as f32 / segments as f32;
        let t1 = (i + 1) as f32 / segments as f32;
        let color = blend_colors(start, end, t0);
        painter.line_segment([point(t0), point(t1)], egui::Stroke::new(GAUGE_STROKE, color));
    }
    painter.circle_filled(point(0.0), GAUGE_STROKE / 2.0, start);
    painter.circle_filled(point(1.0), GAUGE_STROKE / 2.0, blend_colors(start, end, 1.0));
}

fn contribution_card(ui: &mut egui::Ui, bars: &[ChartBar], theme: &Theme) {
    let ctx = ui.ctx().clone();
    ui.horizontal(|ui| {
        ui.label(theme.heading(&ctx, "📊 Contribution Factors").size(22.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new("ℹ Model Weights").small().color(theme.muted(&ctx)));
        });
    });
    ui.add_space(16.0);

    let max = bars.iter().map(|bar| bar.value).fold(0.0_f64, f64::max).max(f64::EPSILON);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for bar in bars {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [BAR_LABEL_WIDTH, BAR_HEIGHT],
                    egui::Label::new(egui::RichText::new(schema::label_for(&bar.feature)).strong()),
                );

                let width = ui.available_width() - 56.0;
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(width.max(0.0), BAR_HEIGHT), egui::Sense::hover());
                let filled = rect.width() * (bar.value.max(0.0) / max) as f32;
                let bar_rect = egui::Rect::from_min_size(rect.min, egui::vec2(filled, rect.height()));
                ui.painter().rect_filled(rect, 8.0, theme.track(&ctx));
                ui.painter().rect_filled(bar_rect, 8.0, to_color(bar.color));
                response.on_hover_text(format!("{}: {:.1}%", bar.feature, bar.value));

                ui.label(egui::RichText::new(format!("{:.1}%", bar.value)).color(theme.muted(&ctx)));
            });
            ui.add_space(6.0);
        }
    });
}

fn narrative_card(ui: &mut egui::Ui, title: &str, accent: egui::Color32, feature: &str, tail: &str) {
    ui.label(egui::RichText::new(title).strong().size(18.0).color(accent));
    ui.add_space(6.0);
    let (subject, hint) = narrative_subject(feature);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label("Your");
        ui.label(egui::RichText::new(subject).strong()).on_hover_text(hint);
        ui.label(tail);
    });
}

/// Feature id as reported by the service, with its form label as the hover hint.
fn narrative_subject(feature: &str) -> (&str, &str) {
    (feature, schema::label_for(feature))
}
