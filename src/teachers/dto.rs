use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Teacher;

/// Public projection of a teacher: everything but the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    #[serde(rename = "teacher_id")]
    pub teacher_id: Uuid,
    pub user_id: i64,
    pub name: String,
    pub surname: String,
    pub speciality: Option<String>,
    pub email: String,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_of_birth: Option<OffsetDateTime>,
    pub available: Option<bool>,
    pub profile_image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
}

impl From<Teacher> for TeacherView {
    fn from(t: Teacher) -> Self {
        Self {
            teacher_id: t.id,
            user_id: t.user_id,
            name: t.name,
            surname: t.surname,
            speciality: t.speciality,
            email: t.email,
            experience: t.experience,
            about: t.about,
            price: t.price,
            phone: t.phone,
            date_of_birth: t.date_of_birth,
            available: t.available,
            profile_image: t.profile_image,
            created_on: t.created_at,
        }
    }
}

/// What `/update-profile` reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(rename = "teacher_id")]
    pub teacher_id: Uuid,
    pub name: String,
    pub surname: String,
    pub speciality: Option<String>,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_of_birth: Option<OffsetDateTime>,
    pub available: Option<bool>,
    pub profile_image: Option<String>,
}

impl From<Teacher> for ProfileView {
    fn from(t: Teacher) -> Self {
        Self {
            teacher_id: t.id,
            name: t.name,
            surname: t.surname,
            speciality: t.speciality,
            experience: t.experience,
            about: t.about,
            price: t.price,
            phone: t.phone,
            date_of_birth: t.date_of_birth,
            available: t.available,
            profile_image: t.profile_image,
        }
    }
}

/// What `/get-teacher` reports about the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfView {
    pub name: String,
    pub surname: String,
    pub speciality: Option<String>,
    pub email: String,
    #[serde(rename = "teacher_id")]
    pub teacher_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
}

impl From<Teacher> for SelfView {
    fn from(t: Teacher) -> Self {
        Self {
            name: t.name,
            surname: t.surname,
            speciality: t.speciality,
            email: t.email,
            teacher_id: t.id,
            created_on: t.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginSummary {
    pub id: i64,
    pub email: String,
    pub teacher_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse<T> {
    pub error: bool,
    pub user: T,
    pub access_token: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UserResponse<T> {
    pub error: bool,
    pub user: T,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub error: bool,
    pub users: Vec<TeacherView>,
    pub message: &'static str,
}
