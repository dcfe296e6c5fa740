//! Demo dataset seeding.
//!
//! Inserts the single monitored patient, one vitals row and one trend
//! series per monitoring state, and metric samples for every reporting
//! period. Idempotent: a populated `patients` table skips the seed.

use sqlx::SqlitePool;

struct TrendSeed(&'static str, i64, i64);
struct MetricSeed(&'static str, i64, i64, i64, i64, i64, f64, i64);

const STABLE_TREND: &[TrendSeed] = &[
    TrendSeed("Mon", 85, 0),
    TrendSeed("Tue", 88, 1),
    TrendSeed("Wed", 90, 2),
    TrendSeed("Thu", 91, 3),
    TrendSeed("Fri", 92, 4),
    TrendSeed("Sat", 92, 5),
    TrendSeed("Sun", 92, 6),
];

const RISK_TREND: &[TrendSeed] = &[
    TrendSeed("Mon", 85, 0),
    TrendSeed("Tue", 88, 1),
    TrendSeed("Wed", 90, 2),
    TrendSeed("Thu", 82, 3),
    TrendSeed("Fri", 68, 4),
    TrendSeed("Sat", 55, 5),
    TrendSeed("Sun", 42, 6),
];

const DAY_METRICS: &[MetricSeed] = &[
    MetricSeed("6am", 72, 58, 118, 76, 3200, 6.2, 15),
    MetricSeed("8am", 75, 59, 120, 77, 3500, 6.2, 20),
    MetricSeed("10am", 78, 60, 119, 78, 4200, 6.2, 30),
    MetricSeed("12pm", 80, 59, 121, 76, 4800, 6.2, 35),
    MetricSeed("2pm", 76, 58, 118, 75, 5200, 6.2, 38),
    MetricSeed("4pm", 74, 58, 117, 76, 5800, 6.2, 42),
    MetricSeed("6pm", 73, 57, 118, 76, 6200, 6.2, 45),
    MetricSeed("8pm", 70, 57, 116, 75, 6500, 6.2, 42),
    MetricSeed("10pm", 68, 56, 115, 74, 6600, 7.2, 42),
];

const WEEK_METRICS: &[MetricSeed] = &[
    MetricSeed("Mon", 68, 56, 116, 74, 5500, 7.8, 35),
    MetricSeed("Tue", 72, 58, 118, 76, 5200, 7.5, 40),
    MetricSeed("Wed", 74, 59, 120, 77, 4800, 7.2, 38),
    MetricSeed("Thu", 70, 57, 117, 75, 5400, 7.6, 42),
    MetricSeed("Fri", 76, 60, 122, 78, 4200, 6.8, 30),
    MetricSeed("Sat", 69, 57, 116, 74, 6100, 8.2, 50),
    MetricSeed("Sun", 67, 56, 115, 73, 5200, 8.5, 25),
];

const MONTH_METRICS: &[MetricSeed] = &[
    MetricSeed("Week 1", 72, 58, 119, 76, 38_500, 52.5, 42),
    MetricSeed("Week 2", 71, 57, 118, 75, 37_200, 51.8, 40),
    MetricSeed("Week 3", 73, 59, 120, 77, 39_800, 53.2, 45),
    MetricSeed("Week 4", 70, 57, 117, 74, 40_500, 52.8, 38),
];

const YEAR_METRICS: &[MetricSeed] = &[
    MetricSeed("Jan", 74, 59, 121, 77, 162_000, 220.0, 38),
    MetricSeed("Feb", 72, 58, 119, 76, 155_000, 210.0, 40),
    MetricSeed("Mar", 70, 57, 118, 75, 168_000, 225.0, 42),
    MetricSeed("Apr", 71, 57, 117, 74, 160_000, 218.0, 41),
    MetricSeed("May", 73, 59, 120, 77, 172_000, 228.0, 45),
    MetricSeed("Jun", 69, 56, 116, 73, 165_000, 222.0, 43),
    MetricSeed("Jul", 68, 55, 115, 73, 170_000, 230.0, 44),
    MetricSeed("Aug", 70, 57, 118, 75, 158_000, 212.0, 40),
    MetricSeed("Sep", 72, 58, 119, 76, 163_000, 220.0, 42),
    MetricSeed("Oct", 71, 57, 117, 74, 160_000, 215.0, 39),
    MetricSeed("Nov", 73, 59, 121, 77, 155_000, 208.0, 38),
    MetricSeed("Dec", 70, 57, 118, 75, 150_000, 200.0, 35),
];

/// Seed the demo dataset. Returns `true` when rows were inserted,
/// `false` when the database was already populated.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any statement fails; the transaction rolls
/// back and nothing is half-seeded.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM patients")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    let patient_id: i64 = sqlx::query_scalar(
        "INSERT INTO patients \
            (name, age, address, device_name, device_status, device_battery, \
             caregiver_name, caregiver_relationship, caregiver_phone, caregiver_email, \
             current_state) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING id",
    )
    .bind("Esther Wanjiku")
    .bind(78)
    .bind("14 Riverside Dr, Nairobi, Kenya")
    .bind("Fitbit Sense 2")
    .bind("Connected")
    .bind("72%")
    .bind("Amina Odhiambo")
    .bind("Daughter")
    .bind("+254 712 345 678")
    .bind("amina.o@email.com")
    .bind("stable")
    .fetch_one(&mut *tx)
    .await?;

    let insert_vitals = "INSERT INTO vitals \
            (patient_id, state, hr, sleep_hours, steps, fatigue, stability_score, status, \
             bp_sys, bp_dia, resting_hr, activity_min, last_updated) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

    sqlx::query(insert_vitals)
        .bind(patient_id)
        .bind("stable")
        .bind(70)
        .bind(7.5)
        .bind(5200)
        .bind("Low")
        .bind(92)
        .bind("Stable")
        .bind(118)
        .bind(76)
        .bind(58)
        .bind(42)
        .bind("2025-11-14 08:30:00")
        .execute(&mut *tx)
        .await?;

    sqlx::query(insert_vitals)
        .bind(patient_id)
        .bind("risk")
        .bind(88)
        .bind(4.1)
        .bind(1200)
        .bind("High")
        .bind(42)
        .bind("High Risk")
        .bind(135)
        .bind(88)
        .bind(75)
        .bind(12)
        .bind(Option::<String>::None)
        .execute(&mut *tx)
        .await?;

    for (state, series) in [("stable", STABLE_TREND), ("risk", RISK_TREND)] {
        for &TrendSeed(label, score, order) in series {
            sqlx::query(
                "INSERT INTO trend_scores (patient_id, state, day_label, score, sort_order) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(patient_id)
            .bind(state)
            .bind(label)
            .bind(score)
            .bind(order)
            .execute(&mut *tx)
            .await?;
        }
    }

    for (period, samples) in [
        ("day", DAY_METRICS),
        ("week", WEEK_METRICS),
        ("month", MONTH_METRICS),
        ("year", YEAR_METRICS),
    ] {
        for &MetricSeed(label, hr, rhr, bp_sys, bp_dia, steps, sleep, activity) in samples {
            sqlx::query(
                "INSERT INTO health_metrics \
                    (patient_id, period_type, label, hr, resting_hr, bp_sys, bp_dia, \
                     steps, sleep, activity_min) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(patient_id)
            .bind(period)
            .bind(label)
            .bind(hr)
            .bind(rhr)
            .bind(bp_sys)
            .bind(bp_dia)
            .bind(steps)
            .bind(sleep)
            .bind(activity)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(true)
}
