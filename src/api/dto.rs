//! Request and response bodies.

use serde::{Deserialize, Serialize};

use crate::wellness::{
    DietAnalysis, DietLog, HealthMetrics, NutritionRecommendation, SleepAnalysis, SleepLog,
};

/// Body of `POST /predict_frame`. Fields are optional so missing ones get a
/// 400 with their names instead of a generic extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictFrameRequest {
    /// data URL (`data:image/jpeg;base64,...`) or bare base64
    pub image: Option<String>,
    pub pose_name: Option<String>,
    pub first_time: Option<bool>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictFrameResponse {
    pub pose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub feedback: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: ModelInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub input_dim: usize,
    pub classes: Vec<String>,
}

/// Absent diet fields count as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DietRequest {
    pub meals: Vec<String>,
    pub water_intake: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl From<DietRequest> for DietLog {
    fn from(request: DietRequest) -> Self {
        DietLog {
            meals: request.meals,
            water_intake: request.water_intake,
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fats: request.fats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DietResponse {
    pub analysis: DietAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SleepRequest {
    pub hours: f64,
    pub quality: f64,
    pub sleep_time: String,
    pub wake_time: String,
    pub interruptions: u32,
}

impl From<SleepRequest> for SleepLog {
    fn from(request: SleepRequest) -> Self {
        SleepLog {
            hours: request.hours,
            quality: request.quality,
            sleep_time: request.sleep_time,
            wake_time: request.wake_time,
            interruptions: request.interruptions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SleepResponse {
    pub analysis: SleepAnalysis,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthStatusRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatusResponse {
    pub health_info: HealthMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutritionRequest {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub activity_level: Option<String>,
    #[serde(default)]
    pub diseases: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionResponse {
    pub recommendations: NutritionRecommendation,
}
