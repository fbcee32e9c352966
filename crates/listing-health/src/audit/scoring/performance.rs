//! Performance: seven interaction metrics against vertical benchmarks.
//!
//! Each metric earns a base for sitting above, at, or below its benchmark,
//! shifted by half the period-over-period change capped at fifteen points
//! either way. The category score is the weighted sum, rounded.

use super::{fail, pass, rec};
use crate::audit::domain::{Category, CategoryScoreResult, Priority};
use crate::audit::signals::{NormalizedPerformance, PerformanceMetric};

const CATEGORY: Category = Category::Performance;

const METRIC_WEIGHTS: &[(&str, f64)] = &[
    ("total_interactions", 0.20),
    ("calls", 0.10),
    ("bookings", 0.15),
    ("direction_requests", 0.15),
    ("website_clicks", 0.15),
    ("messages", 0.10),
    ("searches", 0.15),
];

pub(crate) fn score(performance: &NormalizedPerformance) -> CategoryScoreResult {
    let mut weighted = 0.0;
    let mut checks = Vec::new();
    let mut recommendations = Vec::new();

    for (name, metric) in performance.metrics() {
        let points = metric_score(&metric);
        weighted += points * weight_for(name);

        let observed = format!(
            "{:.1} against a benchmark of {:.1} ({:+.1}% change)",
            metric.value, metric.benchmark, metric.change_pct
        );
        if metric.value > metric.benchmark {
            checks.push(pass(name, observed, "above the vertical benchmark"));
        } else {
            checks.push(fail(
                name,
                observed,
                "above the vertical benchmark",
                format!("Lift {} above the benchmark", label_for(name)),
            ));
            recommendations.push(rec(
                CATEGORY,
                Priority::Medium,
                format!("{} sit at or below the vertical benchmark", label_for(name)),
                format!(
                    "Investigate what suppresses {} and make that surface more prominent",
                    label_for(name)
                ),
                "Benchmark gaps mark interactions rivals capture instead",
            ));
        }
    }

    CategoryScoreResult {
        category: CATEGORY,
        score: weighted.round() as u8,
        checks,
        recommendations,
    }
}

fn metric_score(metric: &PerformanceMetric) -> f64 {
    let base = if metric.value > metric.benchmark {
        85.0
    } else if metric.value < metric.benchmark {
        50.0
    } else {
        70.0
    };
    let momentum = (metric.change_pct / 2.0).clamp(-15.0, 15.0);
    (base + momentum).clamp(0.0, 100.0)
}

fn weight_for(name: &str) -> f64 {
    METRIC_WEIGHTS
        .iter()
        .find(|(metric, _)| *metric == name)
        .map(|(_, weight)| *weight)
        .unwrap_or(0.0)
}

fn label_for(name: &str) -> &'static str {
    match name {
        "total_interactions" => "total interactions",
        "calls" => "calls",
        "bookings" => "bookings",
        "direction_requests" => "direction requests",
        "website_clicks" => "website clicks",
        "messages" => "messages",
        _ => "search appearances",
    }
}
