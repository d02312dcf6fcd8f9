#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive terminal shell for the taxi trip dashboard.
//!
//! Composition layer only: loads the availability list once at startup,
//! defaults to the latest advertised period, runs the four-fetch period
//! load cycle, and loops on a `dialoguer` menu switching between the map
//! and statistics views. All dashboard state lives in one
//! [`DashboardState`] container; every mutation happens on this thread.
//!
//! Configuration is environment-driven:
//! - `TAXI_VIZ_API_URL` — API base URL (default `http://127.0.0.1:8000/api`)
//! - `TAXI_VIZ_ZONES_CSV` — path to a replacement zone centroid table
//! - `TAXI_VIZ_SURFACE_UNRESOLVED` — when set, dropped zone ids are
//!   reported as warnings instead of developer-level debug output

mod views;

use std::path::Path;

use dialoguer::{Input, Select};
use taxi_viz_client::{AnalyticsClient, DEFAULT_BASE_URL};
use taxi_viz_client_models::Period;
use taxi_viz_state::{AvailablePeriods, DashboardState};
use taxi_viz_zones::ZoneDirectory;

/// Month names indexed by `month - 1`, for the period picker.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Top-level menu actions.
enum Action {
    MapView,
    Statistics,
    ChangePeriod,
    ToggleZone,
    Reload,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::MapView,
        Self::Statistics,
        Self::ChangePeriod,
        Self::ToggleZone,
        Self::Reload,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::MapView => "Map view",
            Self::Statistics => "Statistics",
            Self::ChangePeriod => "Change period",
            Self::ToggleZone => "Select/deselect a zone",
            Self::Reload => "Reload current period",
            Self::Quit => "Quit",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    println!("NYC Taxi Data Dashboard");
    println!();

    let base_url =
        std::env::var("TAXI_VIZ_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let unresolved_policy = if std::env::var("TAXI_VIZ_SURFACE_UNRESOLVED").is_ok() {
        views::UnresolvedZonePolicy::Surface
    } else {
        views::UnresolvedZonePolicy::Quiet
    };

    let zones = match std::env::var("TAXI_VIZ_ZONES_CSV") {
        Ok(path) => ZoneDirectory::from_csv_path(Path::new(&path))?,
        Err(_) => ZoneDirectory::embedded()?,
    };
    log::info!("Loaded {} taxi zones", zones.len());

    let client = AnalyticsClient::new(base_url)?;

    // A failed availability fetch is a startup error with a message, not
    // an indefinite loading state.
    log::info!("Fetching data availability...");
    let status = client
        .data_status()
        .await
        .map_err(|e| format!("Failed to load data status: {e}"))?;
    log::info!("Backend: {}", status.message);

    let periods = AvailablePeriods::new(status.available_data)?;
    let mut state = DashboardState::new(periods);

    let initial = state.period();
    load_period(&mut state, &client, initial).await;
    views::render_map(&state, &zones, unresolved_policy);

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    loop {
        println!();
        let idx = Select::new()
            .with_prompt(format!("Period {}", state.period()))
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::MapView => views::render_map(&state, &zones, unresolved_policy),
            Action::Statistics => views::render_stats(&state),
            Action::ChangePeriod => {
                if let Some(period) = pick_period(&state)? {
                    load_period(&mut state, &client, period).await;
                    views::render_map(&state, &zones, unresolved_policy);
                }
            }
            Action::ToggleZone => {
                let zone_id: u16 = Input::new().with_prompt("Zone id").interact_text()?;
                state.toggle_zone(zone_id);
                views::render_map(&state, &zones, unresolved_policy);
            }
            Action::Reload => {
                let current = state.period();
                load_period(&mut state, &client, current).await;
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Runs one period load cycle: stamp a generation, fan out the four
/// fetches, and apply the completion. Any fetch failure collapses to the
/// single aggregate error banner; the previous period's datasets stay in
/// place.
async fn load_period(state: &mut DashboardState, client: &AnalyticsClient, period: Period) {
    let generation = match state.begin_load(period) {
        Ok(generation) => generation,
        Err(e) => {
            views::render_error(&e.to_string());
            return;
        }
    };

    println!("Loading data for {period}...");
    let result = client.fetch_period(period).await.map_err(|e| {
        log::error!("Period load failed: {e}");
        "Failed to load taxi data".to_string()
    });
    state.finish_load(generation, result);

    if let Some(message) = state.error() {
        views::render_error(message);
    }
}

/// Year-then-month picker constrained to the advertised set. Switching
/// years starts from that year's first available month.
fn pick_period(state: &DashboardState) -> Result<Option<Period>, dialoguer::Error> {
    let years = state.periods().years();
    let year_labels: Vec<String> = years.iter().map(ToString::to_string).collect();
    let year_idx = Select::new()
        .with_prompt("Year")
        .items(&year_labels)
        .default(0)
        .interact()?;
    let year = years[year_idx];

    let months = state.periods().months_of(year);
    if months.is_empty() {
        return Ok(None);
    }
    let month_labels: Vec<&str> = months
        .iter()
        .map(|&m| {
            MONTH_NAMES
                .get(m.saturating_sub(1) as usize)
                .copied()
                .unwrap_or("Unknown")
        })
        .collect();
    let month_idx = Select::new()
        .with_prompt("Month")
        .items(&month_labels)
        .default(0)
        .interact()?;

    Ok(Some(Period::new(year, months[month_idx])))
}
