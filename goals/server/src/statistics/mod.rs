use goals_core::{GoalStatistics, GoalStatus};
use std::f64::consts::PI;

pub mod api;
pub mod web;

const CENTER: f64 = 100.0;
const RADIUS: f64 = 90.0;

/// Chart colour for each status.
pub fn status_color(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Completed => "#4caf50",
        GoalStatus::InProgress => "#ffeb3b",
        GoalStatus::Canceled => "#f44336",
        GoalStatus::NotStarted => "#9e9e9e",
    }
}

/// One wedge of the pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
    /// SVG path data; empty when `full` is set.
    pub path: String,
    /// The slice covers the whole chart and is drawn as a circle.
    pub full: bool,
}

/// Legend line shown under the chart, one per status even when empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

/// Pie chart of goal counts per status, laid out in a 200x200 view box.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    pub legend: Vec<LegendEntry>,
}

impl PieChart {
    pub fn from_statistics(stats: &GoalStatistics) -> Self {
        let legend = GoalStatus::ALL
            .into_iter()
            .map(|status| LegendEntry {
                label: status.label(),
                color: status_color(status),
                count: stats.count(status),
            })
            .collect();

        let mut slices = Vec::new();
        if stats.total > 0 {
            let total = stats.total as f64;
            let mut start = 0.0;
            for status in GoalStatus::ALL {
                let count = stats.count(status);
                if count == 0 {
                    continue;
                }
                let end = start + count as f64 / total;
                let full = count == stats.total;
                slices.push(PieSlice {
                    label: status.label(),
                    color: status_color(status),
                    count,
                    path: if full {
                        String::new()
                    } else {
                        wedge_path(start, end)
                    },
                    full,
                });
                start = end;
            }
        }

        Self { slices, legend }
    }
}

/// Point on the circle at `fraction` of a full turn, clockwise from 12 o'clock.
fn point_at(fraction: f64) -> (f64, f64) {
    let angle = fraction * 2.0 * PI - PI / 2.0;
    (CENTER + RADIUS * angle.cos(), CENTER + RADIUS * angle.sin())
}

fn wedge_path(start: f64, end: f64) -> String {
    let (x0, y0) = point_at(start);
    let (x1, y1) = point_at(end);
    let large_arc = if end - start > 0.5 { 1 } else { 0 };
    format!(
        "M {CENTER} {CENTER} L {x0:.2} {y0:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x1:.2} {y1:.2} Z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(
        completed: usize,
        in_progress: usize,
        canceled: usize,
        not_started: usize,
    ) -> GoalStatistics {
        GoalStatistics {
            total: completed + in_progress + canceled + not_started,
            completed,
            in_progress,
            canceled,
            not_started,
        }
    }

    #[test]
    fn empty_statistics_have_no_slices_but_full_legend() {
        let chart = PieChart::from_statistics(&stats(0, 0, 0, 0));

        assert!(chart.slices.is_empty());
        assert_eq!(chart.legend.len(), 4);
        assert!(chart.legend.iter().all(|entry| entry.count == 0));
    }

    #[test]
    fn single_status_is_drawn_as_full_circle() {
        let chart = PieChart::from_statistics(&stats(0, 3, 0, 0));

        assert_eq!(chart.slices.len(), 1);
        assert!(chart.slices[0].full);
        assert_eq!(chart.slices[0].label, "In progress");
        assert_eq!(chart.slices[0].color, "#ffeb3b");
    }

    #[test]
    fn skips_empty_statuses_and_keeps_counts() {
        let chart = PieChart::from_statistics(&stats(1, 0, 1, 2));

        let counts: Vec<(&str, usize)> = chart.slices.iter().map(|s| (s.label, s.count)).collect();
        assert_eq!(
            counts,
            vec![("Completed", 1), ("Canceled", 1), ("Not started", 2)]
        );
        assert!(chart.slices.iter().all(|slice| !slice.full));
    }

    #[test]
    fn half_and_half_produces_two_semicircles() {
        let chart = PieChart::from_statistics(&stats(1, 0, 0, 1));

        assert_eq!(
            chart.slices[0].path,
            "M 100 100 L 100.00 10.00 A 90 90 0 0 1 100.00 190.00 Z"
        );
        assert_eq!(
            chart.slices[1].path,
            "M 100 100 L 100.00 190.00 A 90 90 0 0 1 100.00 10.00 Z"
        );
    }

    #[test]
    fn majority_slice_uses_large_arc() {
        let chart = PieChart::from_statistics(&stats(3, 1, 0, 0));

        assert!(chart.slices[0].path.contains(" 0 1 1 "));
        assert!(chart.slices[1].path.contains(" 0 0 1 "));
    }
}
