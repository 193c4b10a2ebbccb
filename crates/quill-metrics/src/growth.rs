//! Growth rates over period series.

/// Compound growth rate `(end/start)^(1/periods) - 1`.
///
/// `None` when `start <= 0`, either bound is not finite, `periods <= 0`, or
/// the result is not a finite number (a negative `end` over a fractional
/// exponent).
pub fn compound_growth_rate(start: f64, end: f64, periods: f64) -> Option<f64> {
    if !start.is_finite() || !end.is_finite() || !periods.is_finite() {
        return None;
    }
    if start <= 0.0 || periods <= 0.0 {
        return None;
    }
    let rate = (end / start).powf(1.0 / periods) - 1.0;
    rate.is_finite().then_some(rate)
}

/// CAGR across the trailing `max_periods` periods of an oldest-first series.
/// Fewer than two points yields `None`.
pub fn series_cagr(series: &[f64], max_periods: usize) -> Option<f64> {
    if series.len() < 2 || max_periods == 0 {
        return None;
    }
    let window = series.len().min(max_periods + 1);
    let tail = &series[series.len() - window..];
    let start = *tail.first()?;
    let end = *tail.last()?;
    compound_growth_rate(start, end, (window - 1) as f64)
}

/// Growth of the latest period over the one before it.
pub fn period_growth(series: &[f64]) -> Option<f64> {
    match series {
        [.., prev, last] => compound_growth_rate(*prev, *last, 1.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_cases() {
        assert_eq!(compound_growth_rate(0.0, 100.0, 5.0), None);
        assert_eq!(compound_growth_rate(100.0, 0.0, -1.0), None);
        assert_eq!(compound_growth_rate(100.0, 200.0, 1.0), Some(1.0));
    }

    #[test]
    fn negative_end_over_fractional_exponent_is_none() {
        assert_eq!(compound_growth_rate(100.0, -50.0, 2.0), None);
    }

    #[test]
    fn total_loss_is_minus_one() {
        assert_eq!(compound_growth_rate(100.0, 0.0, 3.0), Some(-1.0));
    }

    #[test]
    fn non_finite_inputs_are_none() {
        assert_eq!(compound_growth_rate(f64::NAN, 100.0, 1.0), None);
        assert_eq!(compound_growth_rate(100.0, f64::INFINITY, 1.0), None);
    }

    #[test]
    fn series_cagr_uses_trailing_window() {
        // 7 points, 2-period window: 400 -> 1600 doubles twice.
        let series = [1.0, 1.0, 1.0, 1.0, 400.0, 800.0, 1600.0];
        let rate = series_cagr(&series, 2).unwrap();
        assert!((rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn series_cagr_needs_two_points() {
        assert_eq!(series_cagr(&[5.0], 5), None);
        assert_eq!(series_cagr(&[], 5), None);
    }

    #[test]
    fn period_growth_last_two() {
        assert_eq!(period_growth(&[50.0, 100.0, 150.0]), Some(0.5));
        assert_eq!(period_growth(&[100.0]), None);
    }
}
