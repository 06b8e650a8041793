use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SleepLog {
    pub hours: f64,
    /// self-reported, 0 to 10
    pub quality: f64,
    /// "HH:MM"
    pub sleep_time: String,
    pub wake_time: String,
    pub interruptions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepState {
    pub sleep_duration_hours: f64,
    pub sleep_quality_rating: f64,
    pub sleep_time: String,
    pub wake_time: String,
    pub interruptions_count: u32,
    pub duration_category: &'static str,
    pub quality_category: &'static str,
    pub continuity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepAnalysis {
    pub current_state: SleepState,
    pub improvements: Vec<&'static str>,
    pub consequences: Vec<&'static str>,
}

pub fn analyze_sleep(log: &SleepLog) -> SleepAnalysis {
    SleepAnalysis {
        current_state: sleep_state(log),
        improvements: sleep_improvements(log),
        consequences: sleep_consequences(log),
    }
}

fn bedtime_hour(sleep_time: &str) -> Option<i64> {
    sleep_time.split(':').next()?.trim().parse().ok()
}

fn sleep_state(log: &SleepLog) -> SleepState {
    let duration_category = if log.hours < 6.0 {
        "Insufficient"
    } else if log.hours < 7.0 {
        "Borderline"
    } else if log.hours <= 9.0 {
        "Optimal"
    } else {
        "Extended"
    };

    let quality_category = if log.quality < 3.0 {
        "Poor"
    } else if log.quality < 7.0 {
        "Moderate"
    } else {
        "Good"
    };

    let continuity = match log.interruptions {
        0 => "Uninterrupted",
        1..=2 => "Slightly fragmented",
        _ => "Highly fragmented",
    };

    SleepState {
        sleep_duration_hours: log.hours,
        sleep_quality_rating: log.quality,
        sleep_time: log.sleep_time.clone(),
        wake_time: log.wake_time.clone(),
        interruptions_count: log.interruptions,
        duration_category,
        quality_category,
        continuity,
    }
}

fn sleep_improvements(log: &SleepLog) -> Vec<&'static str> {
    let mut improvements = Vec::new();

    if log.hours < 7.0 {
        improvements.push("Aim for 7-9 hours of sleep per night");
    }
    if log.quality < 7.0 {
        improvements
            .push("Improve sleep environment: dark room, comfortable temperature, reduce noise");
    }

    match bedtime_hour(&log.sleep_time) {
        Some(hour) if !(21..=23).contains(&hour) => {
            improvements.push("Try to establish a consistent sleep time between 9pm-11pm")
        }
        Some(_) => {}
        None => improvements.push("Establish a consistent sleep schedule"),
    }

    if log.interruptions > 2 {
        improvements.push(
            "Reduce sleep interruptions by limiting liquids before bed and addressing potential sleep disorders",
        );
    }

    improvements.push(
        "Establish a relaxing pre-sleep routine without screens 30-60 minutes before bed",
    );
    improvements
}

fn sleep_consequences(log: &SleepLog) -> Vec<&'static str> {
    let mut consequences = Vec::new();

    if log.hours < 6.0 {
        consequences.push(
            "Chronic sleep deprivation increases risk of heart disease, diabetes, obesity, and reduces immune function",
        );
        consequences.push(
            "Short-term effects include reduced cognitive function, mood disturbances, and increased stress",
        );
    }
    if log.quality < 5.0 {
        consequences.push(
            "Poor sleep quality can cause daytime fatigue, impaired memory, and reduced productivity",
        );
    }
    if log.interruptions > 3 {
        consequences.push(
            "Fragmented sleep prevents reaching deep sleep stages, reducing physical recovery and memory consolidation",
        );
    }

    // holds for any parsed hour
    if let Some(hour) = bedtime_hour(&log.sleep_time) {
        if hour < 20 || hour > 2 {
            consequences.push(
                "Irregular sleep timing disrupts circadian rhythm, affecting hormone production and metabolic health",
            );
        }
    }

    consequences
}
