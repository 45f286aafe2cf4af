//! Numeric helpers shared by the pipeline stages
//!
//! Every function is total over finite input: empty slices yield `None`
//! rather than NaN.

use std::cmp::Ordering;

/// Arithmetic mean
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); 0 for a single value
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    if data.len() < 2 {
        return Some(0.0);
    }
    let ss: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (data.len() - 1) as f64).sqrt())
}

/// Quantile with linear interpolation between closest ranks.
///
/// `p` is clamped to [0, 1]; the position is `(n - 1) * p` over the sorted data.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(quantile_sorted(&sorted, p))
}

/// [`quantile`] over data that is already sorted ascending and non-empty
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// Least-squares slope of `data` against its index 0, 1, 2, ...
///
/// `None` with fewer than two points.
pub fn ols_slope(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = mean(data)?;

    let (num, den) = data
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(num, den), (i, y)| {
            let dx = i as f64 - x_mean;
            (num + dx * (y - y_mean), den + dx * dx)
        });

    Some(num / den)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_sample_std_dev() {
        let sd = sample_std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((sd - 2.138089935299395).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[3.0]), Some(0.0));
        assert_eq!(sample_std_dev(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let data = [9.0, 10.0, 10.0, 11.0, 12.0, 13.0, 500.0];
        assert_eq!(quantile(&data, 0.25), Some(10.0));
        assert_eq!(quantile(&data, 0.75), Some(12.5));
        assert_eq!(quantile(&[1.0, 2.0], 0.5), Some(1.5));
    }

    #[test]
    fn test_quantile_unsorted_input() {
        assert_eq!(quantile(&[4.0, 1.0, 3.0, 2.0], 0.0), Some(1.0));
        assert_eq!(quantile(&[4.0, 1.0, 3.0, 2.0], 1.0), Some(4.0));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[10.0, 10.0, 11.0, 12.0, 13.0, 9.0]), Some(10.5));
        assert_eq!(median(&[7.0]), Some(7.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_ols_slope() {
        assert_eq!(ols_slope(&[1.0, 2.0, 3.0]), Some(1.0));
        assert_eq!(ols_slope(&[5.0, 5.0, 5.0, 5.0]), Some(0.0));
        let falling = ols_slope(&[6.0, 5.5, 5.0]).unwrap();
        assert!((falling + 0.5).abs() < 1e-12);
        assert_eq!(ols_slope(&[4.0]), None);
    }

    proptest! {
        #[test]
        fn prop_quantile_within_range(
            data in prop::collection::vec(-1e6f64..1e6, 1..50),
            p in 0.0f64..=1.0,
        ) {
            let q = quantile(&data, p).unwrap();
            let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(q >= lo - 1e-6 && q <= hi + 1e-6);
        }

        #[test]
        fn prop_std_dev_non_negative(data in prop::collection::vec(-1e3f64..1e3, 1..50)) {
            prop_assert!(sample_std_dev(&data).unwrap() >= 0.0);
        }
    }
}
