//! Plain-terminal chart renderer.
//!
//! Draws each series as rows of scaled horizontal bars with `console`
//! styling. Good enough to make the shell binary usable on its own; the
//! panels only ever talk to the [`ChartRenderer`] trait.

use console::style;

use crate::{ChartRenderer, SeriesPoint, format};

/// Default bar width in terminal cells.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// [`ChartRenderer`] that prints to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalCharts {
    width: usize,
}

impl Default for TerminalCharts {
    fn default() -> Self {
        Self {
            width: DEFAULT_BAR_WIDTH,
        }
    }
}

impl TerminalCharts {
    /// Creates a renderer with a custom maximum bar width.
    #[must_use]
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    fn render_rows(self, title: &str, series: &[SeriesPoint], fill: char) {
        println!();
        println!("{}", style(title).bold());
        if series.is_empty() {
            println!("  (no data)");
            return;
        }

        let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
        let label_width = series.iter().map(|p| p.label.len()).max().unwrap_or(0);

        for point in series {
            let cells = bar_cells(point.value, max, self.width);
            let bar: String = std::iter::repeat_n(fill, cells).collect();
            println!(
                "  {:>label_width$}  {} {}",
                point.label,
                style(bar).cyan(),
                style(value_label(point.value)).dim(),
            );
        }
    }
}

impl ChartRenderer for TerminalCharts {
    fn line(&mut self, title: &str, series: &[SeriesPoint]) {
        self.render_rows(title, series, '·');
    }

    fn bars(&mut self, title: &str, series: &[SeriesPoint]) {
        self.render_rows(title, series, '#');
    }

    fn pie(&mut self, title: &str, series: &[SeriesPoint]) {
        println!();
        println!("{}", style(title).bold());
        let label_width = series.iter().map(|p| p.label.len()).max().unwrap_or(0);
        for point in series {
            let cells = bar_cells(point.value, 100.0, self.width);
            let bar: String = std::iter::repeat_n('#', cells).collect();
            println!(
                "  {:>label_width$}  {:>5.1}% {}",
                point.label,
                point.value,
                style(bar).cyan(),
            );
        }
    }
}

/// Number of filled cells for a value against the series maximum. A
/// non-positive maximum (all-zero series) draws nothing.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// Compact value label: grouped integer for whole values, two decimals
/// otherwise.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn value_label(value: f64) -> String {
    if value >= 0.0 && (value - value.round()).abs() < 1e-9 {
        format::count(value.round() as u64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_cells_scale_against_series_maximum() {
        assert_eq!(bar_cells(50.0, 100.0, 40), 20);
        assert_eq!(bar_cells(100.0, 100.0, 40), 40);
    }

    #[test]
    fn bar_cells_handle_zero_maximum() {
        assert_eq!(bar_cells(0.0, 0.0, 40), 0);
    }

    #[test]
    fn value_label_groups_whole_numbers() {
        assert_eq!(value_label(104_211.0), "104,211");
        assert_eq!(value_label(18.27), "18.27");
    }
}
