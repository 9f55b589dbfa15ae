use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A university/faculty period of a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Education {
    pub university_id: i64,
    pub university: String,
    pub faculty: String,
    pub start_date: OffsetDateTime,
    pub end_date: Option<OffsetDateTime>,
    pub about_university: Option<String>,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewEducation {
    pub university: String,
    pub faculty: String,
    pub start_date: OffsetDateTime,
    pub end_date: Option<OffsetDateTime>,
    pub about_university: Option<String>,
    pub teacher_id: Uuid,
}

/// An employment period of a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub experience_id: i64,
    pub company_name: String,
    pub position: String,
    pub start_date: OffsetDateTime,
    pub end_date: Option<OffsetDateTime>,
    pub about_experience: Option<String>,
    pub teacher_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewExperience {
    pub company_name: String,
    pub position: String,
    pub start_date: OffsetDateTime,
    pub end_date: Option<OffsetDateTime>,
    pub about_experience: Option<String>,
    pub teacher_id: Uuid,
}
