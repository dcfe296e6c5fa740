//! Period summary computation over raw metric samples.
//!
//! The dashboard's summary strip shows averages and totals for the selected
//! period against fixed patient baselines. Baselines match the seeded demo
//! patient; per-patient baselines would move into the `patients` table.

use crate::{CoreError, MetricSample, Period};

pub const BASELINE_HR: i64 = 70;
pub const BASELINE_SLEEP_PER_SAMPLE: f64 = 7.5;
pub const BASELINE_STEPS_DAILY: i64 = 5200;

/// Aggregated health metrics for one reporting period.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PeriodSummary {
    pub hr_current: i64,
    pub hr_resting: i64,
    pub hr_baseline: i64,
    pub sleep_total: f64,
    pub sleep_baseline: f64,
    pub steps: i64,
    /// Percent change of total steps against the period's step baseline.
    pub step_change: i64,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub activity_min: i64,
}

/// Aggregate `samples` into a [`PeriodSummary`].
///
/// Heart rate, resting heart rate, blood pressure and activity minutes are
/// averaged; steps and sleep are totalled. The sleep baseline scales with the
/// number of samples in the period.
///
/// # Errors
///
/// Returns [`CoreError::EmptySummaryInput`] when `samples` is empty: an
/// empty period has no meaningful summary and callers surface it as missing
/// data rather than a row of zeros.
pub fn summarize_metrics(
    period: Period,
    samples: &[MetricSample],
) -> Result<PeriodSummary, CoreError> {
    if samples.is_empty() {
        return Err(CoreError::EmptySummaryInput);
    }

    let n = samples.len();
    let avg = |f: fn(&MetricSample) -> i64| -> i64 {
        let sum: i64 = samples.iter().map(f).sum();
        round_div(sum, n as i64)
    };

    let total_steps: i64 = samples.iter().map(|s| s.steps).sum();
    let total_sleep: f64 = samples.iter().map(|s| s.sleep).sum();

    let baseline_steps = period.baseline_steps();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let step_change = (((total_steps - baseline_steps) as f64 / baseline_steps as f64) * 100.0)
        .round() as i64;
    #[allow(clippy::cast_precision_loss)]
    let sleep_baseline = round1(BASELINE_SLEEP_PER_SAMPLE * n as f64);

    Ok(PeriodSummary {
        hr_current: avg(|s| s.hr),
        hr_resting: avg(|s| s.resting_hr),
        hr_baseline: BASELINE_HR,
        sleep_total: round1(total_sleep),
        sleep_baseline,
        steps: total_steps,
        step_change,
        bp_sys: avg(|s| s.bp_sys),
        bp_dia: avg(|s| s.bp_dia),
        activity_min: avg(|s| s.activity_min),
    })
}

/// Integer division rounded to nearest, matching a float average then round.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn round_div(sum: i64, n: i64) -> i64 {
    (sum as f64 / n as f64).round() as i64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: &str, hr: i64, steps: i64, sleep: f64) -> MetricSample {
        MetricSample {
            label: label.to_owned(),
            hr,
            resting_hr: hr - 12,
            bp_sys: 118,
            bp_dia: 76,
            steps,
            sleep,
            activity_min: 40,
        }
    }

    #[test]
    fn empty_samples_are_an_error() {
        assert!(matches!(
            summarize_metrics(Period::Week, &[]),
            Err(CoreError::EmptySummaryInput)
        ));
    }

    #[test]
    fn averages_and_totals_for_a_week() {
        let samples = vec![
            sample("Mon", 68, 5500, 7.8),
            sample("Tue", 72, 5200, 7.5),
            sample("Wed", 74, 4800, 7.2),
        ];
        let summary = summarize_metrics(Period::Week, &samples).unwrap();
        assert_eq!(summary.hr_current, 71); // (68+72+74)/3 = 71.33 -> 71
        assert_eq!(summary.steps, 15_500);
        assert!((summary.sleep_total - 22.5).abs() < f64::EPSILON);
        assert!((summary.sleep_baseline - 22.5).abs() < f64::EPSILON);
        assert_eq!(summary.hr_baseline, BASELINE_HR);
    }

    #[test]
    fn step_change_is_percent_of_period_baseline() {
        // Week baseline is 5200 * 7 = 36400; 18200 total is a 50% deficit.
        let samples: Vec<MetricSample> =
            (0..7).map(|i| sample(&format!("d{i}"), 70, 2600, 7.0)).collect();
        let summary = summarize_metrics(Period::Week, &samples).unwrap();
        assert_eq!(summary.step_change, -50);
    }

    #[test]
    fn step_change_rounds_to_nearest_percent() {
        // Day baseline 5200; 5304 steps is +2%.
        let samples = vec![sample("6am", 70, 5304, 6.2)];
        let summary = summarize_metrics(Period::Day, &samples).unwrap();
        assert_eq!(summary.step_change, 2);
    }

    #[test]
    fn sleep_total_rounds_to_one_decimal() {
        let samples = vec![sample("Mon", 70, 5000, 7.25), sample("Tue", 70, 5000, 7.21)];
        let summary = summarize_metrics(Period::Week, &samples).unwrap();
        assert!((summary.sleep_total - 14.5).abs() < f64::EPSILON);
    }
}
