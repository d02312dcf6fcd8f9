//! Terminal rendering of the map and statistics views.
//!
//! The map view prints the marker table the encoding engine produces,
//! with selection emphasis and the fare legend; the statistics view feeds
//! the dashboard panels through the terminal chart renderer.

use console::{Style, style};
use strum::IntoEnumIterator;
use taxi_viz_dashboard::terminal::TerminalCharts;
use taxi_viz_dashboard::{self as dashboard, ChartRenderer};
use taxi_viz_encoding::{self as encoding, FareBucket, MarkerDescriptor};
use taxi_viz_state::DashboardState;
use taxi_viz_zones::ZoneDirectory;

/// How to report heatmap rows whose zone id has no directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedZonePolicy {
    /// Developer diagnostics only.
    Quiet,
    /// Surface dropped zones to the user as warnings.
    Surface,
}

/// Prints the single aggregate error banner.
pub fn render_error(message: &str) {
    println!();
    println!("{} {message}", style("error:").red().bold());
    println!("The previously loaded data is still shown. Pick a period to retry.");
}

/// Renders the heatmap view: one row per marker, selection emphasis, the
/// fare legend, and the dropped-zone report.
pub fn render_map(state: &DashboardState, zones: &ZoneDirectory, policy: UnresolvedZonePolicy) {
    let Some(data) = state.data() else {
        println!("No data loaded yet.");
        return;
    };

    let set = encoding::build_markers(&data.heatmap, state.selected_zone(), zones);
    let bounds = encoding::coverage_bounds();

    println!();
    println!(
        "{} - {} pickup zones (viewport {:.2},{:.2} to {:.2},{:.2})",
        style(format!("Pickup activity {}", state.period())).bold(),
        set.markers.len(),
        bounds.south,
        bounds.west,
        bounds.north,
        bounds.east,
    );

    for marker in &set.markers {
        print_marker_row(marker);
    }
    if set.markers.is_empty() {
        println!("  (no markers for this period)");
    }

    print_legend();

    if let Some(selected) = state.selected_zone() {
        print_popup(&set.markers, selected);
    }

    report_unresolved(&set.unresolved, policy);
}

fn print_marker_row(marker: &MarkerDescriptor) {
    // Radius maps to glyph count so relative pickup volume stays visible
    // in a terminal.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let glyphs = marker.radius.round() as usize;
    let dot_bar: String = std::iter::repeat_n('o', glyphs).collect();

    let name_style = if marker.emphasis.stroke_visible {
        Style::new().bold().underlined()
    } else if marker.emphasis.fill_opacity < encoding::FULL_OPACITY {
        Style::new().dim()
    } else {
        Style::new()
    };

    println!(
        "  {:>3}  {:<32} {:<12} {:>10}  {:>8}  {}",
        marker.zone_id,
        name_style.apply_to(&marker.zone_name),
        marker.borough,
        dashboard::format::count(marker.trip_count),
        dashboard::format::usd(marker.avg_fare),
        bucket_style(marker.bucket).apply_to(dot_bar),
    );
}

fn print_legend() {
    println!();
    println!("{}", style("Average fare range:").bold());
    for bucket in FareBucket::iter() {
        println!(
            "  {} {}",
            bucket_style(bucket).apply_to("o"),
            bucket.label()
        );
    }
    println!("Circle size: pickup volume, scaled to this period's min/max.");
}

fn print_popup(markers: &[MarkerDescriptor], selected: u16) {
    let Some(marker) = markers.iter().find(|m| m.zone_id == selected) else {
        return;
    };
    println!();
    println!(
        "{} ({})",
        style(&marker.zone_name).bold(),
        marker.borough
    );
    println!("  Trips:        {}", dashboard::format::count(marker.trip_count));
    println!("  Avg Fare:     {}", dashboard::format::usd(marker.avg_fare));
    println!("  Avg Distance: {}", dashboard::format::miles(marker.avg_distance));
}

fn report_unresolved(unresolved: &[u16], policy: UnresolvedZonePolicy) {
    if unresolved.is_empty() {
        return;
    }
    if policy == UnresolvedZonePolicy::Surface {
        log::warn!(
            "{} zone id(s) missing from the zone table and dropped from the map: {unresolved:?}",
            unresolved.len()
        );
        println!(
            "{} {} zone(s) had no entry in the zone table and are not shown.",
            style("note:").yellow(),
            unresolved.len()
        );
    } else {
        log::debug!(
            "Dropped {} heatmap row(s) with unknown zone ids: {unresolved:?}",
            unresolved.len()
        );
    }
}

fn bucket_style(bucket: FareBucket) -> Style {
    match bucket {
        FareBucket::Low => Style::new().blue(),
        FareBucket::Medium => Style::new().green(),
        FareBucket::High => Style::new().yellow(),
        FareBucket::VeryHigh => Style::new().red(),
    }
}

/// Renders the statistics view: key-metric cards, trend and distribution
/// charts, and the trip detail cards.
pub fn render_stats(state: &DashboardState) {
    let Some(data) = state.data() else {
        println!("No data loaded yet.");
        return;
    };

    println!();
    println!("{}", style(format!("Statistics {}", state.period())).bold());
    for card in dashboard::summary_cards(&data.stats) {
        println!("  {:<26} {}", card.title, style(card.value).bold());
    }

    let mut charts = TerminalCharts::default();
    charts.line("Daily Trip Trends", &dashboard::daily_trip_series(&data.summary));
    charts.line(
        "Daily Average Fare",
        &dashboard::daily_avg_fare_series(&data.summary),
    );
    charts.bars(
        "Hourly Activity Pattern",
        &dashboard::hourly_trip_series(&data.revenue),
    );
    charts.bars(
        "Weekly Trip Distribution",
        &dashboard::weekday_trip_series(&data.revenue),
    );
    charts.pie(
        "Weekly Revenue Distribution",
        &dashboard::weekday_revenue_shares(&data.revenue),
    );

    println!();
    println!("{}", style("Trip Details").bold());
    for card in dashboard::trip_detail_cards(&data.stats) {
        println!("  {:<26} {}", card.title, card.value);
    }
}
