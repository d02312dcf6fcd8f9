#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Statistics dashboard panels.
//!
//! Turns the fetched aggregates into labeled chart series and summary
//! cards — direct pass-through display formatting, no derived statistics.
//! Rendering goes through the [`ChartRenderer`] capability trait so the
//! panels never depend on a concrete charting backend; [`terminal`]
//! provides the plain-terminal implementation the shell uses.

pub mod format;
pub mod terminal;

use taxi_viz_client_models::{DailyRevenue, RevenueAnalytics, TripStatsSummary, TripSummaryDatum};

/// Weekday labels indexed by the API's day-of-week encoding (Sunday = 0).
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One labeled value in a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Axis label.
    pub label: String,
    /// Data value.
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A titled value for the key-metric cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    /// Card title.
    pub title: &'static str,
    /// Pre-formatted display value.
    pub value: String,
}

/// The capability every charting backend satisfies: render a series of
/// labeled points as a line, bar, or pie visual.
pub trait ChartRenderer {
    /// Renders a trend line.
    fn line(&mut self, title: &str, series: &[SeriesPoint]);

    /// Renders vertical quantities as bars.
    fn bars(&mut self, title: &str, series: &[SeriesPoint]);

    /// Renders proportional shares.
    fn pie(&mut self, title: &str, series: &[SeriesPoint]);
}

/// The four key-metric cards shown above the charts.
#[must_use]
pub fn summary_cards(stats: &TripStatsSummary) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            title: "Total Trips",
            value: format::count(stats.total_trips),
        },
        SummaryCard {
            title: "Total Revenue",
            value: format::usd(stats.total_revenue),
        },
        SummaryCard {
            title: "Avg Fare",
            value: format::usd(stats.avg_fare),
        },
        SummaryCard {
            title: "Avg Distance",
            value: format::miles(stats.avg_distance),
        },
    ]
}

/// The secondary "trip details" cards.
#[must_use]
pub fn trip_detail_cards(stats: &TripStatsSummary) -> Vec<SummaryCard> {
    vec![
        SummaryCard {
            title: "Average Tip",
            value: format::usd(stats.avg_tip),
        },
        SummaryCard {
            title: "Unique Pickup Locations",
            value: format::count(stats.unique_pickup_locations),
        },
        SummaryCard {
            title: "Unique Dropoff Locations",
            value: format::count(stats.unique_dropoff_locations),
        },
        SummaryCard {
            title: "Earliest Trip",
            value: format::date_full(stats.earliest_trip.date()),
        },
        SummaryCard {
            title: "Latest Trip",
            value: format::date_full(stats.latest_trip.date()),
        },
    ]
}

/// Daily trip counts for the trend line, labeled `MM/dd`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn daily_trip_series(summary: &[TripSummaryDatum]) -> Vec<SeriesPoint> {
    summary
        .iter()
        .map(|row| SeriesPoint::new(format::date_short(row.date), row.total_trips as f64))
        .collect()
}

/// Daily average fares for the trend line, labeled `MM/dd`.
#[must_use]
pub fn daily_avg_fare_series(summary: &[TripSummaryDatum]) -> Vec<SeriesPoint> {
    summary
        .iter()
        .map(|row| SeriesPoint::new(format::date_short(row.date), row.avg_fare))
        .collect()
}

/// Trips per hour of day, labeled `H:00`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn hourly_trip_series(revenue: &RevenueAnalytics) -> Vec<SeriesPoint> {
    revenue
        .hourly
        .iter()
        .map(|row| SeriesPoint::new(format!("{}:00", row.hour), row.trips as f64))
        .collect()
}

/// Trips per weekday, Sunday first.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weekday_trip_series(revenue: &RevenueAnalytics) -> Vec<SeriesPoint> {
    revenue
        .daily
        .iter()
        .map(|row| SeriesPoint::new(weekday_label(row), row.trips as f64))
        .collect()
}

/// Revenue per weekday, Sunday first.
#[must_use]
pub fn weekday_revenue_series(revenue: &RevenueAnalytics) -> Vec<SeriesPoint> {
    revenue
        .daily
        .iter()
        .map(|row| SeriesPoint::new(weekday_label(row), row.revenue))
        .collect()
}

/// Each weekday's share of the period's revenue, as percentages summing
/// to 100 (all zeros when there is no revenue at all).
#[must_use]
pub fn weekday_revenue_shares(revenue: &RevenueAnalytics) -> Vec<SeriesPoint> {
    let total: f64 = revenue.daily.iter().map(|row| row.revenue).sum();
    revenue
        .daily
        .iter()
        .map(|row| {
            let share = if total > 0.0 {
                row.revenue / total * 100.0
            } else {
                0.0
            };
            SeriesPoint::new(weekday_label(row), share)
        })
        .collect()
}

fn weekday_label(row: &DailyRevenue) -> &'static str {
    WEEKDAY_LABELS.get(usize::from(row.day)).unwrap_or(&"?")
}
