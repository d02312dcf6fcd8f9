#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the taxi data REST API.
//!
//! One method per endpoint, plus [`AnalyticsClient::fetch_period`] which
//! fans out the four per-period requests concurrently and fails if any of
//! them fails. No caching and no retries — a failed request surfaces
//! immediately and the caller decides what to do about it.

use std::time::Duration;

use serde::de::DeserializeOwned;
use taxi_viz_client_models::{
    DataStatus, HeatmapDatum, Period, PeriodData, PeriodEnvelope, RevenueAnalytics,
    TripSampleResponse, TripStatsSummary, TripSummaryDatum,
};

/// Base URL used when no configuration is provided.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Transport-level request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from API requests.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport failed, the server returned a non-2xx status, or the
    /// response body failed to decode.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the read-only `/taxi-data/` contract.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyticsClient {
    /// Creates a client against `base_url` (no trailing slash) with the
    /// fixed 30-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the underlying HTTP client fails to
    /// initialize.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, ClientError> {
        let url = format!("{}{path_and_query}", self.base_url);
        log::debug!("GET {url}");
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// `GET /taxi-data/status/` — which (year, month) slices exist.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn data_status(&self) -> Result<DataStatus, ClientError> {
        self.get_json("/taxi-data/status/").await
    }

    /// `GET /taxi-data/summary/` — daily trend rows for a period.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn trip_summary(&self, period: Period) -> Result<Vec<TripSummaryDatum>, ClientError> {
        let envelope: PeriodEnvelope<Vec<TripSummaryDatum>> = self
            .get_json(&format!(
                "/taxi-data/summary/?year={}&month={}",
                period.year, period.month
            ))
            .await?;
        Ok(envelope.data)
    }

    /// `GET /taxi-data/stats/` — whole-period statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn trip_stats(&self, period: Period) -> Result<TripStatsSummary, ClientError> {
        let envelope: PeriodEnvelope<TripStatsSummary> = self
            .get_json(&format!(
                "/taxi-data/stats/?year={}&month={}",
                period.year, period.month
            ))
            .await?;
        Ok(envelope.data)
    }

    /// `GET /taxi-data/heatmap/` — per-zone pickup aggregates.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn heatmap(&self, period: Period) -> Result<Vec<HeatmapDatum>, ClientError> {
        let envelope: PeriodEnvelope<Vec<HeatmapDatum>> = self
            .get_json(&format!(
                "/taxi-data/heatmap/?year={}&month={}",
                period.year, period.month
            ))
            .await?;
        Ok(envelope.data)
    }

    /// `GET /taxi-data/revenue/` — hourly/weekday revenue breakdowns.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn revenue(&self, period: Period) -> Result<RevenueAnalytics, ClientError> {
        let envelope: PeriodEnvelope<RevenueAnalytics> = self
            .get_json(&format!(
                "/taxi-data/revenue/?year={}&month={}",
                period.year, period.month
            ))
            .await?;
        Ok(envelope.data)
    }

    /// `GET /taxi-data/trips/` — raw trip samples. Reserved capability;
    /// no current panel renders these.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request or decode fails.
    pub async fn sample_trips(
        &self,
        period: Period,
        limit: u32,
    ) -> Result<TripSampleResponse, ClientError> {
        self.get_json(&format!(
            "/taxi-data/trips/?year={}&month={}&limit={limit}",
            period.year, period.month
        ))
        .await
    }

    /// Fetches all four per-period views concurrently as one atomic
    /// period load: all four succeed, or the first failure wins and no
    /// partial data is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if any of the four requests fails.
    pub async fn fetch_period(&self, period: Period) -> Result<PeriodData, ClientError> {
        let (summary, stats, revenue, heatmap) = futures::try_join!(
            self.trip_summary(period),
            self.trip_stats(period),
            self.revenue(period),
            self.heatmap(period),
        )?;

        Ok(PeriodData {
            summary,
            stats,
            revenue,
            heatmap,
        })
    }
}
