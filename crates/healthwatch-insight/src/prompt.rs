//! Prompt construction and the rule-based fallback paragraph.
//!
//! Vitals reach the model as qualitative descriptors (``elevated``,
//! ``below normal``) so the completion reads like caregiver guidance
//! rather than a chart dump.

use healthwatch_core::{Patient, VitalsRecord};

fn hr_descriptor(hr: i64) -> &'static str {
    if hr > 80 {
        "elevated"
    } else {
        "normal"
    }
}

fn sleep_descriptor(sleep_hours: f64) -> &'static str {
    if sleep_hours < 5.0 {
        "very low"
    } else if sleep_hours < 6.5 {
        "below normal"
    } else {
        "good"
    }
}

fn activity_descriptor(steps: i64) -> &'static str {
    if steps < 2000 {
        "very little movement"
    } else if steps < 4000 {
        "less movement than usual"
    } else {
        "normal movement"
    }
}

fn bp_descriptor(bp_sys: i64) -> &'static str {
    if bp_sys > 130 {
        "high"
    } else {
        "normal"
    }
}

fn caregiver_name(patient: &Patient) -> &str {
    if patient.caregiver_name.trim().is_empty() {
        "the caregiver"
    } else {
        &patient.caregiver_name
    }
}

/// Assemble the chat prompt for one vitals snapshot.
#[must_use]
pub fn build_prompt(patient: &Patient, vitals: &VitalsRecord) -> String {
    let first_name = patient.first_name();

    let tone = if vitals.is_at_risk() {
        format!(
            "{first_name} is showing warning signs and needs attention right away. \
             Write 2-3 sentences that clearly alert the caregiver. \
             End with a direct call to action stating: the user needs urgent care immediately. \
             ENSURE A RESPONSE IS ALWAYS PROVIDED."
        )
    } else {
        format!(
            "{first_name} is doing well today. \
             Write 2-3 warm, reassuring sentences confirming everything looks fine. \
             End by saying no action is needed and to continue the normal routine. \
             ENSURE A RESPONSE IS ALWAYS PROVIDED."
        )
    };

    format!(
        "You are a health monitoring AI helping caregivers of elderly patients.\n\
         {tone}\n\n\
         Patient: {first_name}, {age} years old\n\
         Heart rate today: {hr}\n\
         Sleep last night: {sleep}\n\
         Movement today: {activity}\n\
         Energy level: {fatigue} fatigue\n\
         Blood pressure: {bp}",
        age = patient.age,
        hr = hr_descriptor(vitals.hr),
        sleep = sleep_descriptor(vitals.sleep_hours),
        activity = activity_descriptor(vitals.steps),
        fatigue = vitals.fatigue.to_lowercase(),
        bp = bp_descriptor(vitals.bp_sys),
    )
}

/// Deterministic insight used when the model returns empty content.
///
/// Derived from the same vitals as the prompt, so it never asserts anything
/// the data does not support.
#[must_use]
pub fn fallback_insight(patient: &Patient, vitals: &VitalsRecord) -> String {
    let first_name = patient.first_name();
    if vitals.is_at_risk() {
        format!(
            "{first_name} is currently showing signs that require attention. \
             Please review their recent vital signs for heart rate, sleep, and activity levels. \
             Contact {caregiver} for further assessment.",
            caregiver = caregiver_name(patient),
        )
    } else {
        format!(
            "{first_name} appears stable today. \
             Their vital signs for heart rate, sleep, and activity levels are within normal ranges. \
             No immediate action is required."
        )
    }
}
