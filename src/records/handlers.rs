use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        CreateExperienceRequest, CreateUniversityRequest, ExperienceResponse, ExperiencesResponse,
        UniversitiesResponse, UniversityResponse,
    },
    services,
};
use crate::{auth::AuthTeacher, error::AppError, state::AppState};

pub fn education_routes() -> Router<AppState> {
    Router::new()
        .route("/create-university", post(create_university))
        .route(
            "/get-teacher-universities/:teacherId",
            get(get_teacher_universities),
        )
}

pub fn experience_routes() -> Router<AppState> {
    Router::new()
        .route("/create-experience", post(create_experience))
        .route(
            "/get-teacher-experiences/:teacherId",
            get(get_teacher_experiences),
        )
}

#[instrument(
    skip(state, auth, payload),
    fields(teacher_id = %auth.teacher_id, user_id = auth.user_id)
)]
pub async fn create_university(
    State(state): State<AppState>,
    auth: AuthTeacher,
    payload: Result<Json<CreateUniversityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UniversityResponse>), AppError> {
    let Json(body) = payload?;
    let entry = services::create_education(&state, &auth, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(UniversityResponse {
            error: false,
            university: entry.into(),
            message: "University entry created successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_teacher_universities(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<UniversitiesResponse>, AppError> {
    let rows = services::list_education_by_teacher(&state, &teacher_id).await?;
    Ok(Json(UniversitiesResponse {
        error: false,
        universities: rows.into_iter().map(Into::into).collect(),
        message: "Universities retrieved successfully",
    }))
}

#[instrument(
    skip(state, auth, payload),
    fields(teacher_id = %auth.teacher_id, user_id = auth.user_id)
)]
pub async fn create_experience(
    State(state): State<AppState>,
    auth: AuthTeacher,
    payload: Result<Json<CreateExperienceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ExperienceResponse>), AppError> {
    let Json(body) = payload?;
    let entry = services::create_experience(&state, &auth, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ExperienceResponse {
            error: false,
            experience: entry.into(),
            message: "Experience entry created successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_teacher_experiences(
    State(state): State<AppState>,
    Path(teacher_id): Path<String>,
) -> Result<Json<ExperiencesResponse>, AppError> {
    let rows = services::list_experience_by_teacher(&state, &teacher_id).await?;
    Ok(Json(ExperiencesResponse {
        error: false,
        experiences: rows.into_iter().map(Into::into).collect(),
        message: "Teacher experiences retrieved successfully",
    }))
}
