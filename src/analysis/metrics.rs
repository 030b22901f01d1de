// src/analysis/metrics.rs

use crate::analysis::format::{format_amount, PLACEHOLDER};
use crate::model::TimelinePoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn glyph(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }
}

/// Percentage change between two consecutive forecast points.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthDelta {
    pub label: String,
    /// `None` when the previous value is zero and the change is undefined.
    pub percent: Option<f64>,
}

impl GrowthDelta {
    pub fn between(previous: &TimelinePoint, current: &TimelinePoint) -> Self {
        let percent = if previous.value == 0.0 {
            None
        } else {
            Some((current.value - previous.value) / previous.value * 100.0)
        };

        Self {
            label: current.period_label(),
            percent,
        }
    }

    pub fn trend(&self) -> Option<Trend> {
        self.percent
            .map(|p| if p >= 0.0 { Trend::Up } else { Trend::Down })
    }

    pub fn display(&self) -> String {
        match (self.percent, self.trend()) {
            (Some(percent), Some(trend)) => {
                format!("{} {:.1}% ({})", trend.glyph(), percent.abs(), self.label)
            }
            _ => format!("n/a ({})", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeakPeriod {
    pub label: String,
    pub value: f64,
}

/// Figures derived from a timeline. Recomputed from scratch on every frame so
/// they can never disagree with the timeline on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastMetrics {
    pub total_forecast: f64,
    pub avg_forecast: f64,
    pub actual_count: usize,
    pub avg_historical: f64,
    pub peak_actual: Option<PeakPeriod>,
    pub growth: Vec<GrowthDelta>,
}

impl ForecastMetrics {
    pub fn from_timeline(timeline: &[TimelinePoint]) -> Self {
        let forecast: Vec<&TimelinePoint> = timeline.iter().filter(|p| p.is_forecast()).collect();
        let actual: Vec<&TimelinePoint> = timeline.iter().filter(|p| p.is_actual()).collect();

        let total_forecast: f64 = forecast.iter().map(|p| p.value).sum();
        let historical_total: f64 = actual.iter().map(|p| p.value).sum();

        // First maximum wins on ties
        let peak_actual = actual
            .iter()
            .copied()
            .fold(None::<&TimelinePoint>, |best, point| match best {
                Some(b) if b.value >= point.value => Some(b),
                _ => Some(point),
            })
            .map(|point| PeakPeriod {
                label: point.period_label(),
                value: point.value,
            });

        let growth = forecast
            .windows(2)
            .map(|pair| GrowthDelta::between(pair[0], pair[1]))
            .collect();

        Self {
            total_forecast,
            avg_forecast: mean(total_forecast, forecast.len()),
            actual_count: actual.len(),
            avg_historical: mean(historical_total, actual.len()),
            peak_actual,
            growth,
        }
    }

    pub fn growth_summary(&self) -> String {
        growth_summary(&self.growth)
    }
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

pub fn growth_summary(deltas: &[GrowthDelta]) -> String {
    if deltas.is_empty() {
        return PLACEHOLDER.to_string();
    }
    deltas
        .iter()
        .map(GrowthDelta::display)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Half-width of the confidence band for a table row ("±100"), or the
/// placeholder for actual rows.
pub fn range_display(point: &TimelinePoint) -> String {
    match (point.is_forecast(), point.upper) {
        (true, Some(upper)) => format!("±{}", format_amount((upper - point.value).round())),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Category breakdown of a forecast point, largest amount first.
pub fn sorted_breakdown(point: &TimelinePoint) -> Vec<(&str, f64)> {
    let mut rows: Vec<(&str, f64)> = point
        .category_breakdown
        .iter()
        .flatten()
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();

    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    rows
}
