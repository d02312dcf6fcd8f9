#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection and period state for the taxi dashboard.
//!
//! Two independent-but-interacting state variables live here: the current
//! (year, month) period, constrained to the backend-advertised set, and the
//! optional selected zone. [`DashboardState`] is the single explicit state
//! container owned by the shell — fetched aggregates, the loading flag, the
//! aggregate error, and a load generation counter that discards stale fetch
//! completions after rapid period changes.
//!
//! Everything here is synchronous; the async fetch fan-out lives in the
//! client and the shell.

use taxi_viz_client_models::{AvailablePeriod, Period, PeriodData};

/// Errors from state transitions.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The backend advertised no data at all.
    #[error("No datasets are advertised as available")]
    NoAvailableData,

    /// A period outside the advertised set was requested.
    #[error("Period {period} is not in the advertised availability set")]
    UnknownPeriod {
        /// The rejected period.
        period: Period,
    },
}

/// The optional selected zone. At most one zone is selected at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<u16>);

impl Selection {
    /// Toggles a zone: selecting the already-selected zone clears the
    /// selection, selecting any other zone replaces it.
    pub fn toggle(&mut self, zone_id: u16) {
        self.0 = if self.0 == Some(zone_id) {
            None
        } else {
            Some(zone_id)
        };
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// The selected zone id, if any.
    #[must_use]
    pub const fn zone(self) -> Option<u16> {
        self.0
    }
}

/// The validated, non-empty set of periods the backend can serve.
///
/// Defines the legal domain of the period state and the rules the date
/// picker follows: years are offered newest-first, months oldest-first
/// within a year, and switching years lands on that year's first
/// available month.
#[derive(Debug, Clone)]
pub struct AvailablePeriods {
    entries: Vec<AvailablePeriod>,
}

impl AvailablePeriods {
    /// Wraps the advertised availability list.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoAvailableData`] if the list is empty.
    pub fn new(entries: Vec<AvailablePeriod>) -> Result<Self, StateError> {
        if entries.is_empty() {
            return Err(StateError::NoAvailableData);
        }
        Ok(Self { entries })
    }

    /// The chronologically latest period: the last entry in list order.
    #[must_use]
    pub fn latest(&self) -> Period {
        // Construction rejects empty lists.
        self.entries[self.entries.len() - 1].period()
    }

    /// Whether a period is advertised.
    #[must_use]
    pub fn contains(&self, period: Period) -> bool {
        self.entries.iter().any(|entry| entry.period() == period)
    }

    /// Advertised years, newest first, de-duplicated.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.entries.iter().map(|entry| entry.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }

    /// Advertised months for a year, ascending.
    #[must_use]
    pub fn months_of(&self, year: i32) -> Vec<u32> {
        let mut months: Vec<u32> = self
            .entries
            .iter()
            .filter(|entry| entry.year == year)
            .map(|entry| entry.month)
            .collect();
        months.sort_unstable();
        months
    }

    /// The first available month of a year, if the year is advertised.
    #[must_use]
    pub fn first_month_of(&self, year: i32) -> Option<u32> {
        self.months_of(year).first().copied()
    }

    /// Iterates the advertised entries in list order.
    pub fn iter(&self) -> impl Iterator<Item = &AvailablePeriod> {
        self.entries.iter()
    }
}

/// The explicit state container for the whole dashboard.
///
/// Owned by the shell and mutated only on the control thread. The four
/// per-period datasets are held as one optional [`PeriodData`] so a load
/// either replaces all of them or none of them.
#[derive(Debug)]
pub struct DashboardState {
    periods: AvailablePeriods,
    period: Period,
    selection: Selection,
    data: Option<PeriodData>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl DashboardState {
    /// Creates the container with the current period defaulted to the
    /// latest advertised one.
    #[must_use]
    pub fn new(periods: AvailablePeriods) -> Self {
        let period = periods.latest();
        Self {
            periods,
            period,
            selection: Selection::default(),
            data: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// The advertised availability set.
    #[must_use]
    pub const fn periods(&self) -> &AvailablePeriods {
        &self.periods
    }

    /// The current period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// The selected zone, if any.
    #[must_use]
    pub const fn selected_zone(&self) -> Option<u16> {
        self.selection.zone()
    }

    /// The current period's datasets, if a load has completed.
    #[must_use]
    pub fn data(&self) -> Option<&PeriodData> {
        self.data.as_ref()
    }

    /// Whether a period load is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// The aggregate load error, if the last load failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Begins a load cycle for `period`, which may be the current period
    /// (a re-fetch). Resets the selection, clears the error, marks the
    /// load in progress, and returns the generation stamp the completion
    /// must present to [`Self::finish_load`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownPeriod`] if the period is not in the
    /// advertised set; no state changes in that case.
    pub fn begin_load(&mut self, period: Period) -> Result<u64, StateError> {
        if !self.periods.contains(period) {
            return Err(StateError::UnknownPeriod { period });
        }

        self.period = period;
        self.selection.clear();
        self.error = None;
        self.loading = true;
        self.generation += 1;
        Ok(self.generation)
    }

    /// Completes a load cycle.
    ///
    /// A completion whose generation no longer matches the current one is
    /// a stale fetch that lost a race with a newer period change; it is
    /// discarded without touching any state. Returns whether the
    /// completion was applied.
    ///
    /// On success all four datasets are replaced at once; on failure the
    /// previous datasets stay in place and only the error message is set.
    pub fn finish_load(&mut self, generation: u64, result: Result<PeriodData, String>) -> bool {
        if generation != self.generation {
            log::debug!(
                "Discarding stale load completion (generation {generation}, current {})",
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    /// Toggles the zone selection. Synchronous and local — never triggers
    /// a re-fetch and touches nothing but the selection.
    pub fn toggle_zone(&mut self, zone_id: u16) {
        self.selection.toggle(zone_id);
    }
}
