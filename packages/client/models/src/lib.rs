#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wire types for the taxi data REST API.
//!
//! These mirror the JSON contract served under `/taxi-data/` exactly:
//! snake_case field names, ISO 8601 dates, plain numbers (distance in
//! miles, currency in USD). They are separate from any derived/display
//! types so the API contract can evolve independently.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A (year, month) pair identifying one monthly dataset slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Calendar year (e.g. 2024).
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl Period {
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// One month advertised as available by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailablePeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Source parquet file URL for this month.
    pub url: String,
}

impl AvailablePeriod {
    /// The (year, month) slice this entry advertises.
    #[must_use]
    pub const fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }
}

/// `GET /taxi-data/status/` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    /// Every (year, month) slice the backend can serve.
    pub available_data: Vec<AvailablePeriod>,
    /// Human-readable status message.
    pub message: String,
}

/// Envelope wrapping every per-period response: `{year, month, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodEnvelope<T> {
    /// Year the payload was computed for.
    pub year: i32,
    /// Month the payload was computed for.
    pub month: u32,
    /// The payload itself.
    pub data: T,
}

/// Per-zone pickup aggregate for the heatmap, one row per zone per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapDatum {
    /// TLC pickup zone id.
    #[serde(rename = "pickup_location_id")]
    pub pickup_zone_id: u16,
    /// Number of pickups in the zone over the period.
    pub trip_count: u64,
    /// Average fare in USD.
    pub avg_fare: f64,
    /// Average trip distance in miles.
    pub avg_distance: f64,
}

/// Daily aggregate for trend charts, one row per day in the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummaryDatum {
    /// Calendar day.
    pub date: NaiveDate,
    /// Total trips on this day.
    pub total_trips: u64,
    /// Total revenue in USD.
    pub total_revenue: f64,
    /// Average fare in USD.
    pub avg_fare: f64,
    /// Average trip distance in miles.
    pub avg_distance: f64,
    /// Average tip in USD.
    pub avg_tip: f64,
    /// Average passenger count.
    pub avg_passengers: f64,
}

/// Whole-period statistics for the summary cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStatsSummary {
    /// Total trips in the period.
    pub total_trips: u64,
    /// Total revenue in USD.
    pub total_revenue: f64,
    /// Average fare in USD.
    pub avg_fare: f64,
    /// Average trip distance in miles.
    pub avg_distance: f64,
    /// Average tip in USD.
    pub avg_tip: f64,
    /// Timestamp of the first trip in the period.
    pub earliest_trip: NaiveDateTime,
    /// Timestamp of the last trip in the period.
    pub latest_trip: NaiveDateTime,
    /// Distinct pickup zones seen in the period.
    pub unique_pickup_locations: u64,
    /// Distinct dropoff zones seen in the period.
    pub unique_dropoff_locations: u64,
}

/// Revenue aggregated by hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRevenue {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Trips starting in this hour.
    pub trips: u64,
    /// Revenue in USD.
    pub revenue: f64,
    /// Average fare in USD.
    pub avg_fare: f64,
}

/// Revenue aggregated by day of week (Sunday = 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// Day of week, 0 (Sunday) - 6 (Saturday).
    pub day: u8,
    /// Trips starting on this weekday.
    pub trips: u64,
    /// Revenue in USD.
    pub revenue: f64,
    /// Average fare in USD.
    pub avg_fare: f64,
}

/// `GET /taxi-data/revenue/` payload: hourly and weekday breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueAnalytics {
    /// One entry per hour of day, ordered 0-23.
    pub hourly: Vec<HourlyRevenue>,
    /// One entry per day of week, ordered Sunday-Saturday.
    pub daily: Vec<DailyRevenue>,
}

/// A single raw trip record from `GET /taxi-data/trips/`.
///
/// Fetched but not rendered by any current panel; the endpoint is kept as
/// a reserved capability of the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSample {
    /// Pickup timestamp.
    pub pickup_datetime: NaiveDateTime,
    /// Dropoff timestamp.
    pub dropoff_datetime: NaiveDateTime,
    /// Passengers on the trip.
    pub passenger_count: u32,
    /// Trip distance in miles.
    pub trip_distance: f64,
    /// TLC pickup zone id.
    pub pickup_location_id: u16,
    /// TLC dropoff zone id.
    pub dropoff_location_id: u16,
    /// Metered fare in USD.
    pub fare_amount: f64,
    /// Tip in USD.
    pub tip_amount: f64,
    /// Total charged in USD.
    pub total_amount: f64,
}

/// `GET /taxi-data/trips/` response: envelope plus a row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSampleResponse {
    /// Year the payload was computed for.
    pub year: i32,
    /// Month the payload was computed for.
    pub month: u32,
    /// Number of rows returned.
    pub count: u64,
    /// The sampled trips.
    pub data: Vec<TripSample>,
}

/// All four per-period aggregate views, replaced wholesale on every
/// period change.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodData {
    /// Daily trend rows, ordered by date.
    pub summary: Vec<TripSummaryDatum>,
    /// Whole-period statistics.
    pub stats: TripStatsSummary,
    /// Hourly/weekday revenue breakdowns.
    pub revenue: RevenueAnalytics,
    /// Per-zone pickup aggregates.
    pub heatmap: Vec<HeatmapDatum>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_data_status() {
        let json = r#"{
            "available_data": [
                {"year": 2023, "month": 12, "url": "https://example.com/yellow_tripdata_2023-12.parquet"},
                {"year": 2024, "month": 1, "url": "https://example.com/yellow_tripdata_2024-01.parquet"}
            ],
            "message": "Data is queried directly from parquet files"
        }"#;
        let status: DataStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.available_data.len(), 2);
        assert_eq!(status.available_data[1].period(), Period::new(2024, 1));
    }

    #[test]
    fn deserializes_heatmap_envelope_with_wire_field_name() {
        let json = r#"{
            "year": 2024,
            "month": 1,
            "data": [
                {"pickup_location_id": 161, "trip_count": 140253, "avg_fare": 17.42, "avg_distance": 2.31}
            ]
        }"#;
        let envelope: PeriodEnvelope<Vec<HeatmapDatum>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data[0].pickup_zone_id, 161);
        assert_eq!(envelope.data[0].trip_count, 140_253);
    }

    #[test]
    fn serializes_heatmap_zone_id_back_to_wire_name() {
        let datum = HeatmapDatum {
            pickup_zone_id: 237,
            trip_count: 1,
            avg_fare: 10.0,
            avg_distance: 1.0,
        };
        let json = serde_json::to_value(&datum).unwrap();
        assert!(json.get("pickup_location_id").is_some());
        assert!(json.get("pickup_zone_id").is_none());
    }

    #[test]
    fn deserializes_trip_summary_dates() {
        let json = r#"{
            "date": "2024-01-15",
            "total_trips": 104211,
            "total_revenue": 2034551.25,
            "avg_fare": 18.12,
            "avg_distance": 3.02,
            "avg_tip": 3.41,
            "avg_passengers": 1.38
        }"#;
        let row: TripSummaryDatum = serde_json::from_str(json).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn deserializes_trip_stats_timestamps() {
        let json = r#"{
            "total_trips": 2964624,
            "total_revenue": 54183921.5,
            "avg_fare": 18.27,
            "avg_distance": 3.39,
            "avg_tip": 3.35,
            "earliest_trip": "2024-01-01T00:00:04",
            "latest_trip": "2024-01-31T23:59:58",
            "unique_pickup_locations": 260,
            "unique_dropoff_locations": 261
        }"#;
        let stats: TripStatsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(stats.earliest_trip.date().to_string(), "2024-01-01");
        assert_eq!(stats.unique_pickup_locations, 260);
    }

    #[test]
    fn deserializes_revenue_analytics() {
        let json = r#"{
            "year": 2024,
            "month": 1,
            "data": {
                "hourly": [{"hour": 0, "trips": 51230, "revenue": 903412.5, "avg_fare": 17.63}],
                "daily": [{"day": 0, "trips": 355102, "revenue": 6401233.0, "avg_fare": 18.03}]
            }
        }"#;
        let envelope: PeriodEnvelope<RevenueAnalytics> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.hourly[0].hour, 0);
        assert_eq!(envelope.data.daily[0].day, 0);
    }

    #[test]
    fn deserializes_trip_sample_response() {
        let json = r#"{
            "year": 2024,
            "month": 1,
            "count": 1,
            "data": [{
                "pickup_datetime": "2024-01-03T08:15:21",
                "dropoff_datetime": "2024-01-03T08:32:10",
                "passenger_count": 2,
                "trip_distance": 4.1,
                "pickup_location_id": 138,
                "dropoff_location_id": 230,
                "fare_amount": 22.5,
                "tip_amount": 4.5,
                "total_amount": 31.25
            }]
        }"#;
        let response: TripSampleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.data[0].pickup_location_id, 138);
    }

    #[test]
    fn period_display_zero_pads_month() {
        assert_eq!(Period::new(2023, 5).to_string(), "2023-05");
    }
}
