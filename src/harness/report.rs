//! Comparison metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Unresolved | Applicants without a reservation after a run |
//! | Percentage | `unresolved / applicants * 100` |
//! | Elapsed | Wall time of the `allocate` call |
//! | Mean unresolved | Average over independent trials |

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::models::SlotSpace;

/// Outcome of one strategy on one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyResult {
    /// Strategy name.
    pub name: String,
    /// Applicants left without a reservation.
    pub unresolved: usize,
    /// Applicants in the scenario.
    pub total: usize,
    /// `unresolved / total * 100`.
    pub percentage: f64,
    /// Wall time of the allocation (ms).
    pub elapsed_ms: f64,
}

impl StrategyResult {
    /// Creates a result line.
    pub fn new(name: impl Into<String>, unresolved: usize, total: usize, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            unresolved,
            total,
            percentage: percentage(unresolved, total),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    /// Applicants holding a reservation.
    pub fn resolved(&self) -> usize {
        self.total - self.unresolved
    }
}

impl fmt::Display for StrategyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} not distributed -> {:.2}%",
            self.name, self.unresolved, self.percentage
        )
    }
}

/// Every strategy's outcome on one shared scenario, in strategy order.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub space: SlotSpace,
    pub applicants: usize,
    pub results: Vec<StrategyResult>,
}

impl ComparisonReport {
    /// Result for the named strategy.
    pub fn result(&self, name: &str) -> Option<&StrategyResult> {
        self.results.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Testing with {} slots and {} applications",
            self.space.len(),
            self.applicants
        )?;
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        Ok(())
    }
}

/// Per-strategy aggregate over several trials.
#[derive(Debug, Clone, Serialize)]
pub struct TrialRow {
    pub name: String,
    pub mean_unresolved: f64,
    pub mean_percentage: f64,
    pub min_unresolved: usize,
    pub max_unresolved: usize,
}

/// Aggregate of independent comparison runs.
#[derive(Debug, Clone, Serialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub rows: Vec<TrialRow>,
    pub reports: Vec<ComparisonReport>,
}

impl TrialSummary {
    /// Aggregates reports produced by the same strategy list.
    ///
    /// Rows follow the strategy order of the first report.
    pub fn from_reports(reports: &[ComparisonReport]) -> Self {
        let names: Vec<&str> = reports
            .first()
            .map(|r| r.results.iter().map(|x| x.name.as_str()).collect())
            .unwrap_or_default();

        let rows = names
            .iter()
            .map(|&name| {
                let results: Vec<&StrategyResult> =
                    reports.iter().filter_map(|r| r.result(name)).collect();
                let n = results.len().max(1) as f64;
                TrialRow {
                    name: name.to_string(),
                    mean_unresolved: results.iter().map(|r| r.unresolved as f64).sum::<f64>() / n,
                    mean_percentage: results.iter().map(|r| r.percentage).sum::<f64>() / n,
                    min_unresolved: results.iter().map(|r| r.unresolved).min().unwrap_or(0),
                    max_unresolved: results.iter().map(|r| r.unresolved).max().unwrap_or(0),
                }
            })
            .collect();

        Self {
            trials: reports.len(),
            rows,
            reports: reports.to_vec(),
        }
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary over {} trials", self.trials)?;
        for row in &self.rows {
            writeln!(
                f,
                "{}: mean {:.2} not distributed -> {:.2}% (min {}, max {})",
                row.name, row.mean_unresolved, row.mean_percentage, row.min_unresolved, row.max_unresolved
            )?;
        }
        Ok(())
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(values: &[(&str, usize)], total: usize) -> ComparisonReport {
        ComparisonReport {
            space: SlotSpace::new(0, 150).unwrap(),
            applicants: total,
            results: values
                .iter()
                .map(|&(name, unresolved)| {
                    StrategyResult::new(name, unresolved, total, Duration::from_millis(2))
                })
                .collect(),
        }
    }

    #[test]
    fn test_result_percentage() {
        let r = StrategyResult::new("X", 15, 60, Duration::from_micros(1500));
        assert!((r.percentage - 25.0).abs() < 1e-10);
        assert!((r.elapsed_ms - 1.5).abs() < 1e-10);
        assert_eq!(r.resolved(), 45);
        assert_eq!(r.to_string(), "X: 15 not distributed -> 25.00%");
    }

    #[test]
    fn test_zero_total_percentage() {
        let r = StrategyResult::new("X", 0, 0, Duration::ZERO);
        assert!((r.percentage - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_report_display_keeps_order() {
        let text = report(&[("B", 3), ("A", 1)], 60).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Testing with 151 slots and 60 applications");
        assert!(lines[1].starts_with("B:"));
        assert!(lines[2].starts_with("A:"));
    }

    #[test]
    fn test_report_display_full_range() {
        let mut r = report(&[("A", 1)], 10);
        r.space = SlotSpace::new(i64::MIN, i64::MAX).unwrap();
        let text = r.to_string();
        assert!(text.starts_with("Testing with 18446744073709551616 slots and 10 applications"));
    }

    #[test]
    fn test_trial_summary() {
        let reports = vec![
            report(&[("A", 2), ("B", 6)], 20),
            report(&[("A", 4), ("B", 2)], 20),
        ];
        let summary = TrialSummary::from_reports(&reports);

        assert_eq!(summary.trials, 2);
        assert_eq!(summary.rows[0].name, "A");
        assert!((summary.rows[0].mean_unresolved - 3.0).abs() < 1e-10);
        assert!((summary.rows[0].mean_percentage - 15.0).abs() < 1e-10);
        assert_eq!(summary.rows[1].min_unresolved, 2);
        assert_eq!(summary.rows[1].max_unresolved, 6);
    }

    #[test]
    fn test_trial_summary_empty() {
        let summary = TrialSummary::from_reports(&[]);
        assert_eq!(summary.trials, 0);
        assert!(summary.rows.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(report(&[("A", 1)], 10)).unwrap();
        assert_eq!(json["applicants"], 10);
        assert_eq!(json["results"][0]["name"], "A");
        assert_eq!(json["space"]["hi"], 150);
    }
}
