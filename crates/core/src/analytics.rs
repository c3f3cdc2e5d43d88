//! Sales forecasting and trend series for the analytics dashboard.
//!
//! The prediction API returns one row per category and month. The dashboard
//! sums the rows per month when no category is selected, and shows the rows
//! as-is otherwise.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{CategoryId, sum_amounts};

/// A forecast row from the prediction API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// First day of the forecast period (dates and datetimes are accepted).
    #[serde(rename = "periodo_inicio", deserialize_with = "lenient_date")]
    pub period_start: NaiveDate,
    #[serde(rename = "venta_predicha")]
    pub predicted_sales: Decimal,
    #[serde(rename = "categoria", default)]
    pub category: Option<CategoryId>,
}

/// Historical totals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    /// Month as `YYYY-MM`.
    #[serde(rename = "mes")]
    pub month: String,
    #[serde(rename = "cantidad_ventas")]
    pub sales_count: u32,
    #[serde(rename = "monto_total")]
    pub total_amount: Decimal,
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let day = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

/// How many months of forecast the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastHorizon {
    #[default]
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl ForecastHorizon {
    #[must_use]
    pub const fn months(self) -> usize {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
        }
    }
}

impl TryFrom<u32> for ForecastHorizon {
    type Error = String;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        match months {
            3 => Ok(Self::ThreeMonths),
            6 => Ok(Self::SixMonths),
            12 => Ok(Self::TwelveMonths),
            other => Err(format!("unsupported forecast horizon: {other} months")),
        }
    }
}

/// One point of the forecast chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPoint {
    /// First day of the month.
    pub month: NaiveDate,
    /// `YYYY-MM` label.
    pub label: String,
    pub predicted_sales: Decimal,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Build the forecast series shown on the dashboard.
///
/// Rows arrive newest first. Without a category filter they are summed per
/// month and sorted oldest first; with a filter each row is one point, oldest
/// first. Either way only the first `horizon` points are kept.
#[must_use]
pub fn forecast_series(
    predictions: &[Prediction],
    category_filtered: bool,
    horizon: ForecastHorizon,
) -> Vec<ForecastPoint> {
    let points: Vec<ForecastPoint> = if category_filtered {
        predictions
            .iter()
            .rev()
            .map(|p| ForecastPoint {
                month: month_start(p.period_start),
                label: month_label(p.period_start),
                predicted_sales: p.predicted_sales,
            })
            .collect()
    } else {
        let mut by_month: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for p in predictions {
            let slot = by_month.entry(month_start(p.period_start)).or_default();
            *slot = slot.saturating_add(p.predicted_sales);
        }
        by_month
            .into_iter()
            .map(|(month, predicted_sales)| ForecastPoint {
                month,
                label: month_label(month),
                predicted_sales,
            })
            .collect()
    };

    points.into_iter().take(horizon.months()).collect()
}

/// Sum of the predicted sales of the shown points.
#[must_use]
pub fn forecast_total(points: &[ForecastPoint]) -> Decimal {
    sum_amounts(points.iter().map(|p| p.predicted_sales))
}

/// One point of the historical trend chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub month: NaiveDate,
    pub label: String,
    pub sales_count: u32,
    pub total_amount: Decimal,
}

/// One point per month, in API order. Rows whose month is not `YYYY-MM` are
/// dropped.
#[must_use]
pub fn trend_series(trends: &[Trend]) -> Vec<TrendPoint> {
    trends
        .iter()
        .filter_map(|t| {
            let first_day = format!("{}-01", t.month.trim());
            let month = NaiveDate::parse_from_str(&first_day, "%Y-%m-%d").ok()?;
            Some(TrendPoint {
                month,
                label: month_label(month),
                sales_count: t.sales_count,
                total_amount: t.total_amount,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rows() -> Vec<Prediction> {
        serde_json::from_value(json!([
            {"periodo_inicio": "2025-03-01", "venta_predicha": "300.00", "categoria": 1},
            {"periodo_inicio": "2025-03-01", "venta_predicha": "50.50", "categoria": 2},
            {"periodo_inicio": "2025-02-01T00:00:00Z", "venta_predicha": 200, "categoria": 1},
            {"periodo_inicio": "2025-01-01", "venta_predicha": "100", "categoria": 1},
            {"periodo_inicio": "2025-04-01", "venta_predicha": "10", "categoria": 2}
        ]))
        .unwrap()
    }

    #[test]
    fn test_all_categories_groups_by_month() {
        let points = forecast_series(&rows(), false, ForecastHorizon::ThreeMonths);
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["2025-01", "2025-02", "2025-03"]);
        assert_eq!(points[2].predicted_sales, Decimal::new(35050, 2));
        assert_eq!(forecast_total(&points), Decimal::new(65050, 2));
    }

    #[test]
    fn test_single_category_keeps_rows_in_reverse_order() {
        let filtered: Vec<_> = rows()
            .into_iter()
            .filter(|p| p.category == Some(CategoryId::new(1)))
            .collect();
        let points = forecast_series(&filtered, true, ForecastHorizon::SixMonths);
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn test_trend_series() {
        let trends: Vec<Trend> = serde_json::from_value(json!([
            {"mes": "2024-11", "cantidad_ventas": 4, "monto_total": "5200.00"},
            {"mes": "noviembre", "cantidad_ventas": 1, "monto_total": "1"},
            {"mes": "2024-12", "cantidad_ventas": 9, "monto_total": 12000}
        ]))
        .unwrap();
        let points = trend_series(&trends);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "2024-11");
        assert_eq!(points[1].sales_count, 9);
        assert_eq!(points[1].total_amount, Decimal::new(12000, 0));
    }

    #[test]
    fn test_horizon_parse() {
        assert_eq!(ForecastHorizon::try_from(12).unwrap().months(), 12);
        assert!(ForecastHorizon::try_from(4).is_err());
    }

    #[test]
    fn test_bad_period_fails_decode() {
        let bad = serde_json::from_value::<Prediction>(json!({
            "periodo_inicio": "marzo", "venta_predicha": 1
        }));
        assert!(bad.is_err());
    }
}
