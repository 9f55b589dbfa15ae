use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{Education, Experience};

/// Body of `/create-university`. The owner is never read from here.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUniversityRequest {
    pub university: Option<String>,
    pub faculty: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub about_university: Option<String>,
}

/// Body of `/create-experience`. The owner is never read from here.
#[derive(Debug, Default, Deserialize)]
pub struct CreateExperienceRequest {
    pub company_name: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub about_experience: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityView {
    #[serde(rename = "universityId")]
    pub university_id: i64,
    pub university: String,
    pub faculty: String,
    #[serde(rename = "startDate", with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(
        rename = "endDate",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<OffsetDateTime>,
    pub about_university: Option<String>,
}

impl From<Education> for UniversityView {
    fn from(e: Education) -> Self {
        Self {
            university_id: e.university_id,
            university: e.university,
            faculty: e.faculty,
            start_date: e.start_date,
            end_date: e.end_date,
            about_university: e.about_university,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    #[serde(rename = "experienceId")]
    pub experience_id: i64,
    pub company_name: String,
    pub position: String,
    #[serde(rename = "startDate", with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(
        rename = "endDate",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<OffsetDateTime>,
    pub about_experience: Option<String>,
    #[serde(rename = "teacherId")]
    pub teacher_id: Uuid,
}

impl From<Experience> for ExperienceView {
    fn from(e: Experience) -> Self {
        Self {
            experience_id: e.experience_id,
            company_name: e.company_name,
            position: e.position,
            start_date: e.start_date,
            end_date: e.end_date,
            about_experience: e.about_experience,
            teacher_id: e.teacher_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UniversityResponse {
    pub error: bool,
    pub university: UniversityView,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UniversitiesResponse {
    pub error: bool,
    pub universities: Vec<UniversityView>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    pub error: bool,
    pub experience: ExperienceView,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExperiencesResponse {
    pub error: bool,
    pub experiences: Vec<ExperienceView>,
    pub message: &'static str,
}
