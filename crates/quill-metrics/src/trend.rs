//! Trend classification over a trailing window.

use quill_core::config::{defaults, MetricsConfig};
use quill_core::models::{TrendDirection, TrendKind, TrendReport};

/// Windows shorter than this are "insufficient data".
pub const MIN_POINTS: usize = defaults::MIN_TREND_POINTS;

/// Percent change that counts as movement, per series kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendThresholds {
    pub ratio_pct: f64,
    pub absolute_pct: f64,
}

impl TrendThresholds {
    pub fn from_config(config: &MetricsConfig) -> Self {
        Self {
            ratio_pct: config.ratio_trend_threshold_pct,
            absolute_pct: config.absolute_trend_threshold_pct,
        }
    }

    pub fn for_kind(&self, kind: TrendKind) -> f64 {
        match kind {
            TrendKind::Ratio => self.ratio_pct,
            TrendKind::Absolute => self.absolute_pct,
        }
    }
}

impl Default for TrendThresholds {
    fn default() -> Self {
        Self::from_config(&MetricsConfig::default())
    }
}

/// Classify the last `lookback` points of an oldest-first series.
///
/// The window splits into a first half of `floor(n/2)` points and a second
/// half of the rest. The change is `(second - first) / |first| * 100`,
/// compared against the threshold for `kind`. A zero first-half mean has no
/// defined percentage; the direction then follows the sign of the second
/// half.
pub fn classify_trend(
    series: &[f64],
    lookback: usize,
    kind: TrendKind,
    thresholds: &TrendThresholds,
) -> TrendReport {
    let finite: Vec<f64> = series.iter().copied().filter(|v| v.is_finite()).collect();
    let n = finite.len().min(lookback);
    if n < MIN_POINTS {
        return TrendReport::insufficient(n, kind);
    }
    let window = &finite[finite.len() - n..];
    let (first, second) = window.split_at(n / 2);
    let first_avg = mean(first);
    let second_avg = mean(second);

    let (direction, change_pct) = if first_avg == 0.0 {
        let direction = if second_avg > 0.0 {
            TrendDirection::Improving
        } else if second_avg < 0.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };
        (direction, None)
    } else {
        let change = (second_avg - first_avg) / first_avg.abs() * 100.0;
        if !change.is_finite() {
            return TrendReport::insufficient(n, kind);
        }
        let threshold = thresholds.for_kind(kind);
        let direction = if change > threshold {
            TrendDirection::Improving
        } else if change < -threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };
        (direction, Some(change))
    };

    TrendReport {
        direction,
        change_pct,
        points: n,
        kind,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(series: &[f64], kind: TrendKind) -> TrendReport {
        classify_trend(series, 5, kind, &TrendThresholds::default())
    }

    #[test]
    fn rising_tail_is_improving() {
        let report = classify(&[100.0, 100.0, 100.0, 100.0, 130.0, 130.0], TrendKind::Absolute);
        assert_eq!(report.direction, TrendDirection::Improving);
        assert_eq!(report.points, 5);
        // first half [100,100], second half [100,130,130].
        let change = report.change_pct.unwrap();
        assert!((change - 20.0).abs() < 1e-9);
    }

    #[test]
    fn flat_is_stable() {
        let report = classify(&[7.0; 6], TrendKind::Ratio);
        assert_eq!(report.direction, TrendDirection::Stable);
        assert_eq!(report.change_pct, Some(0.0));
    }

    #[test]
    fn short_window_is_insufficient() {
        let report = classify(&[1.0, 2.0], TrendKind::Ratio);
        assert_eq!(report.direction, TrendDirection::InsufficientData);
        assert_eq!(report.points, 2);
    }

    #[test]
    fn non_finite_points_do_not_count() {
        let report = classify(&[1.0, f64::NAN, 2.0], TrendKind::Ratio);
        assert_eq!(report.direction, TrendDirection::InsufficientData);
    }

    #[test]
    fn ratio_threshold_is_tighter_than_absolute() {
        // +7.5% lands between the 5% ratio and 10% absolute thresholds.
        let series = [100.0, 100.0, 107.5, 107.5];
        assert_eq!(classify(&series, TrendKind::Ratio).direction, TrendDirection::Improving);
        assert_eq!(classify(&series, TrendKind::Absolute).direction, TrendDirection::Stable);
    }

    #[test]
    fn falling_series_is_declining() {
        let report = classify(&[0.30, 0.28, 0.20, 0.18, 0.15], TrendKind::Ratio);
        assert_eq!(report.direction, TrendDirection::Declining);
    }

    #[test]
    fn negative_base_uses_absolute_denominator() {
        // Losses shrinking: -100 -> -50 is an improvement.
        let report = classify(&[-100.0, -100.0, -50.0, -50.0], TrendKind::Absolute);
        assert_eq!(report.direction, TrendDirection::Improving);
        assert!((report.change_pct.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_first_half_follows_second_half_sign() {
        let report = classify(&[0.0, 0.0, 5.0, 5.0], TrendKind::Absolute);
        assert_eq!(report.direction, TrendDirection::Improving);
        assert_eq!(report.change_pct, None);
    }
}
