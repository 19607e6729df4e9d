// Threshold alert evaluation

use crate::models::{Alert, MetricKind, Severity, Thresholds, TickSnapshot};

/// Evaluate one completed tick's snapshot against the static thresholds.
///
/// Pure function: at most one alert per metric (critical dominates warning),
/// output in the fixed `MetricKind::ALL` order regardless of severity. The
/// empty list is meaningful: consumers must clear previously shown alerts.
pub fn evaluate(snapshot: &TickSnapshot, thresholds: &Thresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for kind in MetricKind::ALL {
        let value = snapshot.get(kind);
        let pair = thresholds.get(kind);
        if value >= pair.critical {
            alerts.push(Alert {
                severity: Severity::Critical,
                metric: kind,
                value,
                threshold: pair.critical,
            });
        } else if value >= pair.warning {
            alerts.push(Alert {
                severity: Severity::Warning,
                metric: kind,
                value,
                threshold: pair.warning,
            });
        }
    }
    alerts
}
