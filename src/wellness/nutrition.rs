use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::utils::round_to;
use crate::wellness::WellnessError;

const UNLISTED_CONDITION_ADVICE: &str = "No specific recommendations available for this condition. Consider consulting with a healthcare professional.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeightStatus {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obese,
}

impl WeightStatus {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            WeightStatus::Underweight
        } else if bmi < 25.0 {
            WeightStatus::NormalWeight
        } else if bmi < 30.0 {
            WeightStatus::Overweight
        } else {
            WeightStatus::Obese
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            WeightStatus::Underweight => {
                "Consider increasing caloric intake with nutrient-dense foods"
            }
            WeightStatus::NormalWeight => "Maintain a balanced diet with adequate nutrients",
            WeightStatus::Overweight => {
                "Consider moderating caloric intake and increasing physical activity"
            }
            WeightStatus::Obese => {
                "Consider a structured nutrition plan focused on caloric deficit and regular exercise"
            }
        }
    }

    /// Percent of calories from protein, carbs and fats, and the daily
    /// calorie adjustment.
    fn plan_targets(self) -> (MacroSplit, i64) {
        match self {
            WeightStatus::Underweight => (MacroSplit::new(25, 55, 20), 300),
            WeightStatus::NormalWeight => (MacroSplit::new(30, 45, 25), 0),
            WeightStatus::Overweight => (MacroSplit::new(35, 40, 25), -250),
            WeightStatus::Obese => (MacroSplit::new(40, 30, 30), -500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMetrics {
    pub bmi: f64,
    pub weight_status: WeightStatus,
    pub general_recommendation: &'static str,
}

pub fn health_metrics(height_cm: f64, weight_kg: f64) -> Result<HealthMetrics, WellnessError> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return Err(WellnessError::NonPositiveMeasurement);
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    let weight_status = WeightStatus::from_bmi(bmi);

    Ok(HealthMetrics {
        bmi: round_to(bmi, 2),
        weight_status,
        general_recommendation: weight_status.recommendation(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Unrecognized levels fall back to moderate.
    pub fn parse(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "active" => ActivityLevel::Active,
            "very_active" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Harris-Benedict maintenance calories, floored.
pub fn caloric_needs(
    weight_kg: f64,
    height_cm: f64,
    age: f64,
    gender: &str,
    activity: ActivityLevel,
) -> i64 {
    let bmr = if gender.trim().eq_ignore_ascii_case("male") {
        88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
    } else {
        447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
    };
    (bmr * activity.multiplier()).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

impl MacroSplit {
    fn new(protein: u32, carbs: u32, fats: u32) -> Self {
        Self {
            protein,
            carbs,
            fats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionPlan {
    pub daily_calories: i64,
    pub macronutrient_split: MacroSplit,
    pub protein_grams: i64,
    pub carbs_grams: i64,
    pub fats_grams: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NutritionProfile {
    pub height: f64,
    pub weight: f64,
    pub age: f64,
    pub gender: String,
    pub activity_level: String,
    #[serde(default)]
    pub diseases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionAdvice {
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionRecommendation {
    pub health_metrics: HealthMetrics,
    pub nutrition_plan: NutritionPlan,
    pub disease_specific_advice: BTreeMap<String, ConditionAdvice>,
}

pub fn nutrition_plan(profile: &NutritionProfile) -> Result<NutritionRecommendation, WellnessError> {
    let metrics = health_metrics(profile.height, profile.weight)?;
    let maintenance = caloric_needs(
        profile.weight,
        profile.height,
        profile.age,
        &profile.gender,
        ActivityLevel::parse(&profile.activity_level),
    );

    let (split, adjustment) = metrics.weight_status.plan_targets();
    let daily_calories = maintenance + adjustment;
    let grams = |percent: u32, kcal_per_gram: f64| {
        (daily_calories as f64 * (percent as f64 / 100.0) / kcal_per_gram).floor() as i64
    };

    let nutrition_plan = NutritionPlan {
        daily_calories,
        macronutrient_split: split,
        protein_grams: grams(split.protein, 4.0),
        carbs_grams: grams(split.carbs, 4.0),
        fats_grams: grams(split.fats, 9.0),
    };

    let disease_specific_advice = profile
        .diseases
        .iter()
        .map(|disease| {
            let advice = ConditionAdvice {
                recommendation: UNLISTED_CONDITION_ADVICE,
            };
            (disease.clone(), advice)
        })
        .collect();

    Ok(NutritionRecommendation {
        health_metrics: metrics,
        nutrition_plan,
        disease_specific_advice,
    })
}
