use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        AuthResponse, LoginRequest, LoginSummary, ProfileView, SelfView, TeacherView,
        UserResponse, UsersResponse,
    },
    services,
};
use crate::{auth::AuthTeacher, error::AppError, form::FormFields, state::AppState};

/// Room for the text parts of a multipart form on top of the image itself.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn account_routes(max_image_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/create-account", post(create_account))
        .route("/update-profile", put(update_profile))
        .layer(DefaultBodyLimit::max(max_image_bytes + FORM_OVERHEAD_BYTES))
        .route("/login", post(login))
}

pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all-teacher", get(get_all_teachers))
        .route("/get-user/:userId", get(get_user))
        .route("/get-teacher/:id", get(get_teacher_by_id))
        .route("/get-teacher", get(get_teacher))
}

#[instrument(skip(state, form))]
pub async fn create_account(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<(StatusCode, Json<AuthResponse<TeacherView>>), AppError> {
    let issued = services::register(&state, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            error: false,
            user: issued.teacher.into(),
            access_token: issued.access_token,
            message: "Registration successful",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse<LoginSummary>>, AppError> {
    let Json(body) = payload?;
    let issued = services::login(&state, body).await?;
    Ok(Json(AuthResponse {
        error: false,
        user: LoginSummary {
            id: issued.teacher.user_id,
            email: issued.teacher.email,
            teacher_id: issued.teacher.id,
        },
        access_token: issued.access_token,
        message: "Login Successful",
    }))
}

#[instrument(skip(state))]
pub async fn get_all_teachers(State(state): State<AppState>) -> Result<Json<UsersResponse>, AppError> {
    let teachers = services::list_teachers(&state).await?;
    Ok(Json(UsersResponse {
        error: false,
        users: teachers.into_iter().map(Into::into).collect(),
        message: "Users retrieved successfully",
    }))
}

#[instrument(
    skip(state, auth, form),
    fields(teacher_id = %auth.teacher_id, user_id = auth.user_id)
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthTeacher,
    form: FormFields,
) -> Result<Json<UserResponse<ProfileView>>, AppError> {
    let saved = services::update_profile(&state, &auth, form).await?;
    Ok(Json(UserResponse {
        error: false,
        user: saved.into(),
        message: "Profile updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse<TeacherView>>, AppError> {
    let teacher = services::get_by_user_id(&state, &user_id).await?;
    Ok(Json(UserResponse {
        error: false,
        user: teacher.into(),
        message: "User retrieved successfully",
    }))
}

#[instrument(skip(state))]
pub async fn get_teacher_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse<TeacherView>>, AppError> {
    let teacher = services::get_by_id(&state, &id).await?;
    Ok(Json(UserResponse {
        error: false,
        user: teacher.into(),
        message: "Teacher retrieved successfully",
    }))
}

#[instrument(
    skip(state, auth),
    fields(teacher_id = %auth.teacher_id, user_id = auth.user_id)
)]
pub async fn get_teacher(
    State(state): State<AppState>,
    auth: AuthTeacher,
) -> Result<Json<UserResponse<SelfView>>, AppError> {
    let teacher = services::get_self(&state, &auth).await?;
    Ok(Json(UserResponse {
        error: false,
        user: teacher.into(),
        message: "",
    }))
}
