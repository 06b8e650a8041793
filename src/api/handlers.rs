//! Axum request handlers.

use axum::{extract::State, Json};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::DynamicImage;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::feedback::YogaPose;
use crate::pipeline::{PipelineOutcome, NO_POSE_LABEL};
use crate::wellness::{self, NutritionProfile};

/// Liveness plus a summary of the loaded classifier.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let pipeline = state.pipeline();
    let classifier = pipeline.classifier();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: ModelInfo {
            input_dim: classifier.input_dim(),
            classes: classifier
                .labels()
                .iter()
                .map(|(_, label)| label.to_owned())
                .collect(),
        },
    })
}

/// Classifies one camera frame and returns coaching feedback for the
/// requested pose.
#[tracing::instrument(skip(state, request), fields(pose_name = ?request.pose_name, user = ?request.user))]
pub async fn predict_frame(
    State(state): State<AppState>,
    Json(request): Json<PredictFrameRequest>,
) -> ApiResult<Json<PredictFrameResponse>> {
    let image = request.image.filter(|s| !s.trim().is_empty());
    let pose_name = request.pose_name.filter(|s| !s.trim().is_empty());
    let (image, pose_name) = match (image, pose_name) {
        (Some(image), Some(pose_name)) => (image, pose_name),
        (image, pose_name) => {
            let mut missing = Vec::new();
            if image.is_none() {
                missing.push("image");
            }
            if pose_name.is_none() {
                missing.push("pose_name");
            }
            return Err(ApiError::missing_fields(&missing));
        }
    };

    // an explicit flag wins, otherwise the first coached frame per user and pose
    let tracked = request.user.clone().zip(YogaPose::parse(&pose_name));
    let first_attempt = tracked
        .as_ref()
        .map(|(user, pose)| !state.is_introduced(user, *pose));
    let first_time = request.first_time.or(first_attempt).unwrap_or(false);

    let pipeline = state.pipeline();
    let task = tokio::task::spawn_blocking(move || -> ApiResult<PipelineOutcome> {
        let frame = decode_frame(&image)?;
        Ok(pipeline.run_pipeline(&frame, &pose_name, first_time)?)
    });

    let timeout = state.inference_timeout();
    let outcome = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(outcome)) => outcome?,
        Ok(Err(join_error)) => {
            return Err(ApiError::internal(format!("inference task failed: {join_error}")))
        }
        Err(_) => {
            return Err(ApiError::Timeout {
                seconds: timeout.as_secs(),
            })
        }
    };

    // a frame without a body never reached the coaching rules
    if let Some((user, pose)) = &tracked {
        if outcome.pose != NO_POSE_LABEL {
            state.mark_introduced(user, *pose);
        }
    }

    Ok(Json(PredictFrameResponse {
        pose: outcome.pose,
        confidence: outcome.confidence,
        feedback: outcome.feedback,
        user: request.user,
    }))
}

/// Accepts `data:<mime>;base64,<payload>` or a bare base64 payload.
pub fn decode_frame(data: &str) -> ApiResult<DynamicImage> {
    let payload = match data.split_once(',') {
        Some((header, body)) if header.starts_with("data:") => body,
        _ => data,
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ApiError::InvalidImage(format!("not valid base64: {e}")))?;

    image::load_from_memory(&bytes).map_err(|e| ApiError::InvalidImage(e.to_string()))
}

pub async fn track_diet(Json(request): Json<DietRequest>) -> Json<DietResponse> {
    let analysis = wellness::analyze_diet(&request.into());
    Json(DietResponse { analysis })
}

pub async fn track_sleep(Json(request): Json<SleepRequest>) -> Json<SleepResponse> {
    let analysis = wellness::analyze_sleep(&request.into());
    Json(SleepResponse { analysis })
}

#[tracing::instrument(skip(request))]
pub async fn health_status(
    Json(request): Json<HealthStatusRequest>,
) -> ApiResult<Json<HealthStatusResponse>> {
    let mut missing = Vec::new();
    if request.height.is_none() {
        missing.push("height");
    }
    if request.weight.is_none() {
        missing.push("weight");
    }
    if request.age.is_none() {
        missing.push("age");
    }
    if request.gender.as_deref().map_or(true, str::is_empty) {
        missing.push("gender");
    }

    match (request.height, request.weight) {
        (Some(height), Some(weight)) if missing.is_empty() => {
            let health_info = wellness::health_metrics(height, weight)?;
            Ok(Json(HealthStatusResponse { health_info }))
        }
        _ => Err(ApiError::missing_fields(&missing)),
    }
}

#[tracing::instrument(skip(request))]
pub async fn nutrition_recommendation(
    Json(request): Json<NutritionRequest>,
) -> ApiResult<Json<NutritionResponse>> {
    let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
    let NutritionRequest {
        height,
        weight,
        age,
        gender,
        activity_level,
        diseases,
    } = request;

    let profile = match (
        height,
        weight,
        age,
        non_empty(gender),
        non_empty(activity_level),
    ) {
        (Some(height), Some(weight), Some(age), Some(gender), Some(activity_level)) => {
            NutritionProfile {
                height,
                weight,
                age,
                gender,
                activity_level,
                diseases,
            }
        }
        (height, weight, age, gender, activity_level) => {
            let fields = [
                ("height", height.is_some()),
                ("weight", weight.is_some()),
                ("age", age.is_some()),
                ("gender", gender.is_some()),
                ("activity_level", activity_level.is_some()),
            ];
            let missing: Vec<&str> = fields
                .iter()
                .filter(|(_, present)| !present)
                .map(|(name, _)| *name)
                .collect();
            return Err(ApiError::missing_fields(&missing));
        }
    };

    let recommendations = wellness::nutrition_plan(&profile)?;
    Ok(Json(NutritionResponse { recommendations }))
}
