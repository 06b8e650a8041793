//! Rule-based diet, sleep and nutrition analyzers.

pub mod diet;
pub mod nutrition;
pub mod sleep;

use thiserror::Error;

pub use diet::{analyze_diet, DietAnalysis, DietLog};
pub use nutrition::{
    caloric_needs, health_metrics, nutrition_plan, ActivityLevel, HealthMetrics,
    NutritionProfile, NutritionRecommendation, WeightStatus,
};
pub use sleep::{analyze_sleep, SleepAnalysis, SleepLog};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WellnessError {
    #[error("Height and weight must be positive values")]
    NonPositiveMeasurement,
}
