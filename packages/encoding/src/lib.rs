#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Visual encoding engine for the pickup heatmap.
//!
//! Pure functions that turn per-zone aggregate rows into renderable marker
//! descriptors: centroid position, volume-scaled radius, fare-bucketed
//! color, and selection-dependent emphasis. No I/O and no logging — the
//! caller owns what to do with zones that fail to resolve.

use strum_macros::{Display, EnumIter};
use taxi_viz_client_models::HeatmapDatum;
use taxi_viz_zones::ZoneDirectory;

/// Smallest rendered marker radius, in pixels.
pub const MIN_RADIUS: f64 = 4.0;
/// Largest rendered marker radius, in pixels.
pub const MAX_RADIUS: f64 = 20.0;
/// Radius used when every zone in the period has the same trip count, so
/// there is no range to scale against.
pub const DEFAULT_RADIUS: f64 = 8.0;

/// Fill opacity for markers when nothing is selected, and for the selected
/// marker itself.
pub const FULL_OPACITY: f64 = 0.8;
/// Fill opacity for non-selected markers while a selection is active.
pub const DIMMED_OPACITY: f64 = 0.3;
/// Stroke weight of the selected marker's outline.
pub const SELECTED_STROKE_WEIGHT: f64 = 3.0;

/// A geographic bounding box (`west`/`south`/`east`/`north` edges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western longitude edge.
    pub west: f64,
    /// Southern latitude edge.
    pub south: f64,
    /// Eastern longitude edge.
    pub east: f64,
    /// Northern latitude edge.
    pub north: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Whether a point lies within the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south
            && latitude <= self.north
            && longitude >= self.west
            && longitude <= self.east
    }
}

/// The fixed service coverage area used to fit the viewport on load.
///
/// This is a policy constant covering the five boroughs plus Newark
/// Airport — it is never derived from the data.
#[must_use]
pub const fn coverage_bounds() -> BoundingBox {
    BoundingBox::new(-74.26, 40.49, -73.69, 40.92)
}

/// Color bucket for a zone's average fare.
///
/// Thresholds are policy constants with half-open intervals: a fare of
/// exactly 10.0 lands in `Medium`, 20.0 in `High`, 30.0 in `VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum FareBucket {
    /// Average fare below $10.
    Low,
    /// Average fare in [$10, $20).
    Medium,
    /// Average fare in [$20, $30).
    High,
    /// Average fare of $30 or more.
    VeryHigh,
}

impl FareBucket {
    /// Buckets a non-negative average fare. Total over all fares.
    #[must_use]
    pub fn for_fare(avg_fare: f64) -> Self {
        if avg_fare < 10.0 {
            Self::Low
        } else if avg_fare < 20.0 {
            Self::Medium
        } else if avg_fare < 30.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Hex fill color for this bucket.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#3B82F6",
            Self::Medium => "#10B981",
            Self::High => "#F59E0B",
            Self::VeryHigh => "#EF4444",
        }
    }

    /// Legend label for this bucket.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "< $10",
            Self::Medium => "$10 - $20",
            Self::High => "$20 - $30",
            Self::VeryHigh => ">= $30",
        }
    }
}

/// Selection-dependent marker styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emphasis {
    /// Fill opacity, 0.0-1.0.
    pub fill_opacity: f64,
    /// Outline stroke weight in pixels.
    pub stroke_weight: f64,
    /// Whether the outline is drawn at all.
    pub stroke_visible: bool,
}

/// Computes the highlighting rule for one marker.
///
/// With no selection every marker gets full opacity and no stroke. With a
/// selection the matching marker gets full opacity plus a thick visible
/// stroke, and every other marker is dimmed with no stroke. Purely a
/// function of ids — data values never influence emphasis.
#[must_use]
pub fn emphasis(zone_id: u16, selected_zone: Option<u16>) -> Emphasis {
    match selected_zone {
        None => Emphasis {
            fill_opacity: FULL_OPACITY,
            stroke_weight: 0.0,
            stroke_visible: false,
        },
        Some(selected) if selected == zone_id => Emphasis {
            fill_opacity: FULL_OPACITY,
            stroke_weight: SELECTED_STROKE_WEIGHT,
            stroke_visible: true,
        },
        Some(_) => Emphasis {
            fill_opacity: DIMMED_OPACITY,
            stroke_weight: 0.0,
            stroke_visible: false,
        },
    }
}

/// Linearly scales a trip count from `[lo, hi]` to
/// `[MIN_RADIUS, MAX_RADIUS]`, clamped.
///
/// When `lo == hi` (a single zone, or every zone carrying the same count)
/// there is no range to interpolate over and [`DEFAULT_RADIUS`] is
/// returned instead. Never returns `NaN` or an infinite value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scale_radius(trip_count: u64, lo: u64, hi: u64) -> f64 {
    if lo == hi {
        return DEFAULT_RADIUS;
    }
    let fraction = (trip_count.saturating_sub(lo)) as f64 / (hi - lo) as f64;
    MIN_RADIUS + fraction.clamp(0.0, 1.0) * (MAX_RADIUS - MIN_RADIUS)
}

/// One renderable circle marker plus the display fields its popup needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    /// TLC zone id this marker encodes.
    pub zone_id: u16,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
    /// Volume-scaled radius in pixels.
    pub radius: f64,
    /// Fare color bucket.
    pub bucket: FareBucket,
    /// Selection-dependent styling.
    pub emphasis: Emphasis,
    /// Zone display name.
    pub zone_name: String,
    /// Borough display name.
    pub borough: String,
    /// Pickup count over the period.
    pub trip_count: u64,
    /// Average fare in USD.
    pub avg_fare: f64,
    /// Average distance in miles.
    pub avg_distance: f64,
}

/// Result of a marker build: the renderable markers in input order, plus
/// the zone ids that had no directory entry and were left off the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    /// Markers in heatmap input order.
    pub markers: Vec<MarkerDescriptor>,
    /// Zone ids that failed to resolve, in input order.
    pub unresolved: Vec<u16>,
}

/// Builds marker descriptors for every heatmap row that resolves to a
/// known zone.
///
/// Radius scaling uses the min/max trip count of the *input* rows,
/// computed before the unresolved filter, so dropping an unknown zone
/// never reshuffles the radii of the zones that remain. Rows whose zone
/// id is missing from the directory are recorded in
/// [`MarkerSet::unresolved`] rather than rendered; surfacing them is the
/// caller's decision. An empty input yields an empty set.
#[must_use]
pub fn build_markers(
    heatmap: &[HeatmapDatum],
    selected_zone: Option<u16>,
    zones: &ZoneDirectory,
) -> MarkerSet {
    let Some(lo) = heatmap.iter().map(|d| d.trip_count).min() else {
        return MarkerSet::default();
    };
    // min() returned Some, so max() does too.
    let hi = heatmap.iter().map(|d| d.trip_count).max().unwrap_or(lo);

    let mut set = MarkerSet::default();
    for datum in heatmap {
        let Some(zone) = zones.get(datum.pickup_zone_id) else {
            set.unresolved.push(datum.pickup_zone_id);
            continue;
        };

        set.markers.push(MarkerDescriptor {
            zone_id: datum.pickup_zone_id,
            latitude: zone.latitude,
            longitude: zone.longitude,
            radius: scale_radius(datum.trip_count, lo, hi),
            bucket: FareBucket::for_fare(datum.avg_fare),
            emphasis: emphasis(datum.pickup_zone_id, selected_zone),
            zone_name: zone.name.clone(),
            borough: zone.borough.clone(),
            trip_count: datum.trip_count,
            avg_fare: datum.avg_fare,
            avg_distance: datum.avg_distance,
        });
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn datum(zone: u16, trips: u64, fare: f64) -> HeatmapDatum {
        HeatmapDatum {
            pickup_zone_id: zone,
            trip_count: trips,
            avg_fare: fare,
            avg_distance: 2.5,
        }
    }

    #[test]
    fn radius_stays_within_configured_range() {
        for count in [0_u64, 1, 500, 10_000, 1_000_000] {
            let radius = scale_radius(count, 0, 1_000_000);
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&radius));
        }
    }

    #[test]
    fn radius_is_monotonic_in_trip_count() {
        let counts = [10_u64, 250, 4_000, 90_000];
        let radii: Vec<f64> = counts.iter().map(|&c| scale_radius(c, 10, 90_000)).collect();
        for pair in radii.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn radius_hits_endpoints_at_extremes() {
        assert!((scale_radius(10, 10, 100) - MIN_RADIUS).abs() < f64::EPSILON);
        assert!((scale_radius(100, 10, 100) - MAX_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn uniform_counts_fall_back_to_default_radius() {
        let radius = scale_radius(42, 42, 42);
        assert!((radius - DEFAULT_RADIUS).abs() < f64::EPSILON);
        assert!(radius.is_finite());
    }

    #[test]
    fn out_of_range_count_is_clamped_not_extrapolated() {
        // lo/hi come from the input set, so a count outside them only
        // happens via the clamp path; it must not escape the range.
        assert!((scale_radius(5, 10, 100) - MIN_RADIUS).abs() < f64::EPSILON);
        assert!((scale_radius(200, 10, 100) - MAX_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn fare_buckets_use_half_open_boundaries() {
        assert_eq!(FareBucket::for_fare(0.0), FareBucket::Low);
        assert_eq!(FareBucket::for_fare(9.99), FareBucket::Low);
        assert_eq!(FareBucket::for_fare(10.0), FareBucket::Medium);
        assert_eq!(FareBucket::for_fare(19.99), FareBucket::Medium);
        assert_eq!(FareBucket::for_fare(20.0), FareBucket::High);
        assert_eq!(FareBucket::for_fare(29.99), FareBucket::High);
        assert_eq!(FareBucket::for_fare(30.0), FareBucket::VeryHigh);
        assert_eq!(FareBucket::for_fare(250.0), FareBucket::VeryHigh);
    }

    #[test]
    fn every_bucket_has_color_and_label() {
        for bucket in FareBucket::iter() {
            assert!(bucket.color().starts_with('#'));
            assert!(!bucket.label().is_empty());
        }
    }

    #[test]
    fn no_selection_gives_full_opacity_and_no_stroke() {
        let style = emphasis(161, None);
        assert!((style.fill_opacity - FULL_OPACITY).abs() < f64::EPSILON);
        assert!(!style.stroke_visible);
    }

    #[test]
    fn selection_emphasizes_match_and_dims_others() {
        let selected = emphasis(161, Some(161));
        assert!((selected.fill_opacity - FULL_OPACITY).abs() < f64::EPSILON);
        assert!(selected.stroke_visible);
        assert!((selected.stroke_weight - SELECTED_STROKE_WEIGHT).abs() < f64::EPSILON);

        let other = emphasis(237, Some(161));
        assert!((other.fill_opacity - DIMMED_OPACITY).abs() < f64::EPSILON);
        assert!(!other.stroke_visible);
    }

    #[test]
    fn empty_heatmap_builds_empty_set() {
        let zones = ZoneDirectory::embedded().unwrap();
        let set = build_markers(&[], None, &zones);
        assert!(set.markers.is_empty());
        assert!(set.unresolved.is_empty());
    }

    #[test]
    fn unresolved_zones_are_excluded_but_still_scale_the_rest() {
        let zones = ZoneDirectory::embedded().unwrap();
        // Zone 161 resolves; zone 999 does not. The scaling range is
        // computed over both rows, so the surviving marker sits at the
        // bottom of the range rather than falling back to the default.
        let heatmap = [datum(161, 100, 5.0), datum(999, 1000, 25.0)];
        let set = build_markers(&heatmap, None, &zones);

        assert_eq!(set.markers.len(), 1);
        assert_eq!(set.markers[0].zone_id, 161);
        assert!((set.markers[0].radius - MIN_RADIUS).abs() < f64::EPSILON);
        assert_eq!(set.unresolved, vec![999]);
    }

    #[test]
    fn markers_follow_input_order() {
        let zones = ZoneDirectory::embedded().unwrap();
        let heatmap = [
            datum(237, 500, 15.0),
            datum(132, 900, 52.0),
            datum(161, 100, 18.0),
        ];
        let set = build_markers(&heatmap, None, &zones);
        let ids: Vec<u16> = set.markers.iter().map(|m| m.zone_id).collect();
        assert_eq!(ids, vec![237, 132, 161]);
    }

    #[test]
    fn marker_carries_zone_metadata_and_bucket() {
        let zones = ZoneDirectory::embedded().unwrap();
        let set = build_markers(&[datum(132, 800, 52.0)], None, &zones);
        let marker = &set.markers[0];
        assert_eq!(marker.zone_name, "JFK Airport");
        assert_eq!(marker.borough, "Queens");
        assert_eq!(marker.bucket, FareBucket::VeryHigh);
        // Single row: degenerate scaling, default radius.
        assert!((marker.radius - DEFAULT_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn selection_only_changes_emphasis() {
        let zones = ZoneDirectory::embedded().unwrap();
        let heatmap = [datum(161, 100, 18.0), datum(237, 900, 12.0)];

        let unselected = build_markers(&heatmap, None, &zones);
        let selected = build_markers(&heatmap, Some(237), &zones);

        for (a, b) in unselected.markers.iter().zip(&selected.markers) {
            assert!((a.radius - b.radius).abs() < f64::EPSILON);
            assert_eq!(a.bucket, b.bucket);
        }
        assert!(selected.markers[1].emphasis.stroke_visible);
        assert!(
            (selected.markers[0].emphasis.fill_opacity - DIMMED_OPACITY).abs() < f64::EPSILON
        );
    }

    #[test]
    fn coverage_bounds_span_the_service_area() {
        let bounds = coverage_bounds();
        // Manhattan centroid and JFK both sit inside the fixed box.
        assert!(bounds.contains(40.7589, -73.9851));
        assert!(bounds.contains(40.6413, -73.7781));
        assert!(!bounds.contains(41.5, -73.9));
    }
}
