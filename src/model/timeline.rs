// src/model/timeline.rs
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use super::whole_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Actual,
    Forecast,
}

/// One period of a forecast timeline.
///
/// Forecast points carry `lower <= value <= upper` bounds and an optional
/// per-category breakdown. The bound ordering is a backend contract and is
/// not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    #[serde(default, deserialize_with = "period_index", skip_serializing_if = "Option::is_none")]
    pub week: Option<i64>,
    #[serde(default, deserialize_with = "period_index", skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_breakdown: Option<BTreeMap<String, f64>>,
    // Fields we don't render (month_start, ...) still go back to the explainer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn period_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_i64()
        .or_else(|| number.as_f64().and_then(whole_number))
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("period index {} is not a whole number", number)))
}

#[cfg(test)]
impl TimelinePoint {
    pub fn actual(week: i64, value: f64) -> Self {
        Self {
            week: Some(week),
            month: None,
            label: None,
            kind: PointKind::Actual,
            value,
            upper: None,
            lower: None,
            category_breakdown: None,
            extra: Map::new(),
        }
    }

    pub fn forecast(week: i64, value: f64, lower: f64, upper: f64) -> Self {
        Self {
            kind: PointKind::Forecast,
            upper: Some(upper),
            lower: Some(lower),
            ..Self::actual(week, value)
        }
    }
}

impl TimelinePoint {
    pub fn is_forecast(&self) -> bool {
        self.kind == PointKind::Forecast
    }

    pub fn is_actual(&self) -> bool {
        self.kind == PointKind::Actual
    }

    /// Human-readable period name: the backend label, else the period index.
    pub fn period_label(&self) -> String {
        if let Some(label) = self.label.as_deref().filter(|l| !l.trim().is_empty()) {
            return label.to_string();
        }
        match (self.week, self.month) {
            (Some(week), _) => format!("week {}", week),
            (None, Some(month)) => format!("month {}", month),
            (None, None) => "period ?".to_string(),
        }
    }

    pub fn has_breakdown(&self) -> bool {
        self.category_breakdown
            .as_ref()
            .is_some_and(|breakdown| !breakdown.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_forecast_point() {
        let point: TimelinePoint = serde_json::from_str(
            r#"{
                "month": 2,
                "type": "forecast",
                "value": 15230.5,
                "lower": 13707.45,
                "upper": 16753.55,
                "category_breakdown": {"Whiskey_Sales": 6100.2, "Vodka_Sales": 4800.0},
                "month_start": "2024-02-01",
                "label": "February 2024"
            }"#,
        )
        .unwrap();

        assert!(point.is_forecast());
        assert_eq!(point.month, Some(2));
        assert_eq!(point.upper, Some(16753.55));
        assert_eq!(point.period_label(), "February 2024");
        assert!(point.has_breakdown());
        assert_eq!(point.extra.get("month_start"), Some(&Value::from("2024-02-01")));
    }

    #[test]
    fn test_unknown_fields_are_echoed_back() {
        let raw = r#"{"week":-6,"type":"actual","value":1000.0,"month_start":"2023-07-01"}"#;
        let point: TimelinePoint = serde_json::from_str(raw).unwrap();
        let echoed = serde_json::to_value(&point).unwrap();

        assert_eq!(echoed["month_start"], "2023-07-01");
        assert_eq!(echoed["type"], "actual");
        assert!(echoed.get("upper").is_none());
    }

    #[test]
    fn test_float_period_indices() {
        let point: TimelinePoint =
            serde_json::from_str(r#"{"week": 1.0, "type": "forecast", "value": 10.0}"#).unwrap();
        assert_eq!(point.week, Some(1));
        assert_eq!(point.period_label(), "week 1");

        let point: TimelinePoint =
            serde_json::from_str(r#"{"month": null, "type": "actual", "value": 3.0}"#).unwrap();
        assert_eq!(point.month, None);

        let fractional =
            serde_json::from_str::<TimelinePoint>(r#"{"week": 1.5, "type": "actual", "value": 1.0}"#);
        assert!(fractional.is_err());
    }

    #[test]
    fn test_period_label_fallbacks() {
        assert_eq!(TimelinePoint::actual(3, 1.0).period_label(), "week 3");

        let mut point = TimelinePoint::actual(3, 1.0);
        point.week = None;
        point.month = Some(5);
        assert_eq!(point.period_label(), "month 5");

        point.month = None;
        assert_eq!(point.period_label(), "period ?");

        point.label = Some("  ".to_string());
        assert_eq!(point.period_label(), "period ?");
    }

    #[test]
    fn test_empty_breakdown_is_not_shown() {
        let mut point = TimelinePoint::forecast(2, 10.0, 9.0, 11.0);
        assert!(!point.has_breakdown());
        point.category_breakdown = Some(BTreeMap::new());
        assert!(!point.has_breakdown());
    }
}
