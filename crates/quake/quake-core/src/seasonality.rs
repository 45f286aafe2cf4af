//! Monthly seasonality of an event series

use crate::stats::{mean, sample_std_dev};
use quake_spi::{EventSeries, Season, SeasonalDistribution};

/// Months whose count clears `mean + PEAK_STD_FACTOR * std` are peaks
const PEAK_STD_FACTOR: f64 = 0.5;
/// Fallback peak count when no month clears the bar
const FALLBACK_PEAKS: usize = 3;

/// Compute the per-month distribution and its strength
pub fn monthly_distribution(series: &EventSeries) -> SeasonalDistribution {
    let mut counts = [0usize; 12];
    for event in series.iter() {
        counts[(event.month() - 1) as usize] += 1;
    }

    let total = series.len();
    if total == 0 {
        return SeasonalDistribution::default();
    }

    let mut frequencies = [0.0; 12];
    for (f, c) in frequencies.iter_mut().zip(counts.iter()) {
        *f = *c as f64 / total as f64;
    }

    let uniform = 1.0 / 12.0;
    let max_freq = frequencies.iter().copied().fold(0.0, f64::max);
    let strength = ((max_freq - uniform) / (1.0 - uniform)).clamp(0.0, 1.0);

    let (peak_season, peak_season_share) = peak_season(&counts, total);

    SeasonalDistribution {
        counts,
        frequencies,
        strength,
        peak_months: peak_months(&counts),
        peak_season,
        peak_season_share,
    }
}

fn peak_months(counts: &[usize; 12]) -> Vec<u32> {
    let values: Vec<f64> = counts.iter().map(|c| *c as f64).collect();
    let bar = match (mean(&values), sample_std_dev(&values)) {
        (Some(m), Some(s)) => m + PEAK_STD_FACTOR * s,
        _ => return Vec::new(),
    };

    let mut peaks: Vec<u32> = (1..=12u32)
        .filter(|m| {
            let c = counts[(*m - 1) as usize];
            c > 0 && c as f64 >= bar
        })
        .collect();

    if peaks.is_empty() {
        let mut ranked: Vec<u32> = (1..=12u32).filter(|m| counts[(*m - 1) as usize] > 0).collect();
        // Stable: equal counts keep calendar order
        ranked.sort_by(|a, b| counts[(*b - 1) as usize].cmp(&counts[(*a - 1) as usize]));
        ranked.truncate(FALLBACK_PEAKS);
        ranked.sort_unstable();
        peaks = ranked;
    }
    peaks
}

fn peak_season(counts: &[usize; 12], total: usize) -> (Option<Season>, f64) {
    let mut best: Option<(Season, usize)> = None;
    for season in Season::ALL {
        let n: usize = season.months().iter().map(|m| counts[(*m - 1) as usize]).sum();
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((season, n));
        }
    }
    match best {
        Some((season, n)) if n > 0 => (Some(season), n as f64 / total as f64),
        _ => (None, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use quake_spi::Event;

    fn series_in_months(months: &[u32]) -> EventSeries {
        let events = months
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let t = Utc.with_ymd_and_hms(2000 + i as i32, *m, 15, 0, 0, 0).unwrap();
                Event::new(t, 0.0, 0.0, 10.0, 5.0)
            })
            .collect();
        EventSeries::new(events)
    }

    #[test]
    fn test_empty_series() {
        let dist = monthly_distribution(&EventSeries::default());
        assert_eq!(dist.strength, 0.0);
        assert!(dist.peak_months.is_empty());
        assert_eq!(dist.peak_season, None);
    }

    #[test]
    fn test_uniform_year_has_zero_strength() {
        let dist = monthly_distribution(&series_in_months(&(1..=12).collect::<Vec<_>>()));
        assert!(dist.strength.abs() < 1e-12);
        assert!((dist.frequencies.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_month_has_full_strength() {
        let dist = monthly_distribution(&series_in_months(&[7, 7, 7, 7]));
        assert!((dist.strength - 1.0).abs() < 1e-12);
        assert_eq!(dist.peak_months, vec![7]);
        assert_eq!(dist.peak_season, Some(Season::Summer));
        assert_eq!(dist.peak_season_share, 1.0);
    }

    #[test]
    fn test_peak_months_above_bar() {
        let dist = monthly_distribution(&series_in_months(&[1, 1, 1, 2, 2, 2, 6, 9]));
        assert_eq!(dist.counts[0], 3);
        assert_eq!(dist.peak_months, vec![1, 2]);
        assert_eq!(dist.peak_season, Some(Season::Winter));
        assert!((dist.peak_season_share - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_strength_in_unit_range() {
        let dist = monthly_distribution(&series_in_months(&[3, 3, 4, 10, 11, 12]));
        assert!(dist.strength > 0.0 && dist.strength <= 1.0);
    }
}
