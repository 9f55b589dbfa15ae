use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{CreateExperienceRequest, CreateUniversityRequest},
    repo_types::{Education, Experience, NewEducation, NewExperience},
};
use crate::{
    auth::AuthTeacher, config::AppConfig, error::AppError, form::parse_date, state::AppState,
};

/// How a listing with no entries is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyListing {
    /// No entries is a 404.
    NotFound,
    /// No entries is a successful empty list.
    Empty,
}

impl EmptyListing {
    pub fn from_config(cfg: &AppConfig) -> Self {
        if cfg.empty_listing_not_found {
            EmptyListing::NotFound
        } else {
            EmptyListing::Empty
        }
    }

    fn check<T>(self, rows: Vec<T>, not_found: &'static str) -> Result<Vec<T>, AppError> {
        if rows.is_empty() && self == EmptyListing::NotFound {
            return Err(AppError::NotFound(not_found));
        }
        Ok(rows)
    }
}

fn required(value: Option<String>, missing: &'static str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingField(missing))
}

fn optional_date(value: Option<String>) -> Result<Option<OffsetDateTime>, AppError> {
    match value.filter(|v| !v.is_empty()) {
        Some(raw) => parse_date(&raw).map(Some).ok_or(AppError::InvalidDate),
        None => Ok(None),
    }
}

/// The owner always comes from the token, and must still exist.
async fn resolve_owner(
    st: &AppState,
    auth: &AuthTeacher,
    failure: &'static str,
) -> Result<Uuid, AppError> {
    let owner = st
        .teachers
        .find_by_id(auth.teacher_id)
        .await
        .map_err(|e| AppError::internal(failure, e))?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(owner.id)
}

pub async fn create_education(
    st: &AppState,
    auth: &AuthTeacher,
    req: CreateUniversityRequest,
) -> Result<Education, AppError> {
    const FAILURE: &str = "Failed to create university entry";

    let university = required(req.university, "University name is required")?;
    let faculty = required(req.faculty, "Faculty is required")?;
    let start_raw = required(req.start_date, "Start date is required")?;
    let start_date = parse_date(&start_raw).ok_or(AppError::InvalidDate)?;
    let end_date = optional_date(req.end_date)?;

    let teacher_id = resolve_owner(st, auth, FAILURE).await?;
    let entry = st
        .educations
        .insert_education(NewEducation {
            university,
            faculty,
            start_date,
            end_date,
            about_university: req.about_university,
            teacher_id,
        })
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;

    info!(%teacher_id, university_id = entry.university_id, "university entry created");
    Ok(entry)
}

pub async fn list_education_by_teacher(
    st: &AppState,
    teacher_id: &str,
) -> Result<Vec<Education>, AppError> {
    let teacher_id = Uuid::parse_str(teacher_id.trim()).map_err(|_| {
        warn!(teacher_id = %teacher_id, "malformed teacher id");
        AppError::InvalidId("Invalid teacher ID")
    })?;
    let rows = st
        .educations
        .list_education_by_teacher(teacher_id)
        .await
        .map_err(|e| AppError::internal("Failed to retrieve universities", e))?;
    EmptyListing::from_config(&st.config).check(rows, "No universities found for this teacher")
}

pub async fn create_experience(
    st: &AppState,
    auth: &AuthTeacher,
    req: CreateExperienceRequest,
) -> Result<Experience, AppError> {
    const FAILURE: &str = "Failed to create experience entry";

    let company_name = required(req.company_name, "Company name is required")?;
    let position = required(req.position, "Position is required")?;
    let start_raw = required(req.start_date, "Start date is required")?;
    let start_date = parse_date(&start_raw).ok_or(AppError::InvalidDate)?;
    let end_date = optional_date(req.end_date)?;

    let teacher_id = resolve_owner(st, auth, FAILURE).await?;
    let entry = st
        .experiences
        .insert_experience(NewExperience {
            company_name,
            position,
            start_date,
            end_date,
            about_experience: req.about_experience,
            teacher_id,
        })
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;

    info!(%teacher_id, experience_id = entry.experience_id, "experience entry created");
    Ok(entry)
}

/// Any string is accepted as an id; one that is not a UUID simply owns nothing.
pub async fn list_experience_by_teacher(
    st: &AppState,
    teacher_id: &str,
) -> Result<Vec<Experience>, AppError> {
    let teacher_id = teacher_id.trim();
    if teacher_id.is_empty() {
        return Err(AppError::MissingField("Teacher ID is required"));
    }
    let rows = match Uuid::parse_str(teacher_id) {
        Ok(id) => st
            .experiences
            .list_experience_by_teacher(id)
            .await
            .map_err(|e| AppError::internal("Failed to retrieve teacher experiences", e))?,
        Err(_) => Vec::new(),
    };
    EmptyListing::from_config(&st.config).check(rows, "No experiences found for this teacher")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{auth_for, insert_teacher, test_config};
    use time::macros::datetime;

    fn university_req() -> CreateUniversityRequest {
        CreateUniversityRequest {
            university: Some("MIT".into()),
            faculty: Some("CS".into()),
            start_date: Some("2010-09-01".into()),
            end_date: None,
            about_university: Some("BSc".into()),
        }
    }

    fn experience_req() -> CreateExperienceRequest {
        CreateExperienceRequest {
            company_name: Some("Acme".into()),
            position: Some("Tutor".into()),
            start_date: Some("2015-02-01T09:00:00Z".into()),
            end_date: Some("2018-06-30".into()),
            about_experience: None,
        }
    }

    #[tokio::test]
    async fn education_is_owned_by_the_caller() {
        let st = AppState::fake();
        let ann = insert_teacher(&st, "a@x.com").await;
        let entry = create_education(&st, &auth_for(&ann), university_req())
            .await
            .unwrap();
        assert_eq!(entry.teacher_id, ann.id);
        assert_eq!(entry.start_date, datetime!(2010-09-01 0:00 UTC));
        assert_eq!(entry.end_date, None);

        let listed = list_education_by_teacher(&st, &ann.id.to_string())
            .await
            .unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn education_ids_are_sequential() {
        let st = AppState::fake();
        let ann = insert_teacher(&st, "a@x.com").await;
        let auth = auth_for(&ann);
        let a = create_education(&st, &auth, university_req()).await.unwrap();
        let b = create_education(&st, &auth, university_req()).await.unwrap();
        assert!(b.university_id > a.university_id);
    }

    #[tokio::test]
    async fn education_requires_fields_in_order() {
        let st = AppState::fake();
        let ann = insert_teacher(&st, "a@x.com").await;
        let auth = auth_for(&ann);

        let mut req = university_req();
        req.university = None;
        req.faculty = None;
        let err = create_education(&st, &auth, req).await.unwrap_err();
        assert_eq!(err.to_string(), "University name is required");

        let mut req = university_req();
        req.faculty = Some(String::new());
        let err = create_education(&st, &auth, req).await.unwrap_err();
        assert_eq!(err.to_string(), "Faculty is required");

        let mut req = university_req();
        req.start_date = None;
        let err = create_education(&st, &auth, req).await.unwrap_err();
        assert_eq!(err.to_string(), "Start date is required");

        let mut req = university_req();
        req.start_date = Some("someday".into());
        assert!(matches!(
            create_education(&st, &auth, req).await,
            Err(AppError::InvalidDate)
        ));
    }

    #[tokio::test]
    async fn education_listing_validates_id_and_reports_empty() {
        let st = AppState::fake();
        assert!(matches!(
            list_education_by_teacher(&st, "not-a-valid-id").await,
            Err(AppError::InvalidId(_))
        ));
        let ann = insert_teacher(&st, "a@x.com").await;
        let err = list_education_by_teacher(&st, &ann.id.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No universities found for this teacher");
    }

    #[tokio::test]
    async fn empty_listing_can_be_configured_as_success() {
        let mut cfg = test_config();
        cfg.empty_listing_not_found = false;
        let st = AppState::fake_with(cfg);
        let ann = insert_teacher(&st, "a@x.com").await;
        let rows = list_education_by_teacher(&st, &ann.id.to_string())
            .await
            .unwrap();
        assert!(rows.is_empty());
        let rows = list_experience_by_teacher(&st, &ann.id.to_string())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn experience_roundtrip_and_scoping() {
        let st = AppState::fake();
        let ann = insert_teacher(&st, "a@x.com").await;
        let bob = insert_teacher(&st, "b@x.com").await;
        let entry = create_experience(&st, &auth_for(&ann), experience_req())
            .await
            .unwrap();
        assert_eq!(entry.teacher_id, ann.id);
        assert_eq!(entry.end_date, Some(datetime!(2018-06-30 0:00 UTC)));

        let anns = list_experience_by_teacher(&st, &ann.id.to_string())
            .await
            .unwrap();
        assert_eq!(anns.len(), 1);
        assert!(matches!(
            list_experience_by_teacher(&st, &bob.id.to_string()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn experience_without_position_persists_nothing() {
        let st = AppState::fake();
        let ann = insert_teacher(&st, "a@x.com").await;
        let mut req = experience_req();
        req.position = None;
        let err = create_experience(&st, &auth_for(&ann), req).await.unwrap_err();
        assert_eq!(err.to_string(), "Position is required");
        let rows = st.experiences.list_experience_by_teacher(ann.id).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn experience_listing_accepts_any_id() {
        let st = AppState::fake();
        assert!(matches!(
            list_experience_by_teacher(&st, "anything").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            list_experience_by_teacher(&st, "  ").await,
            Err(AppError::MissingField("Teacher ID is required"))
        ));
    }

    #[tokio::test]
    async fn vanished_owner_cannot_create_records() {
        let st = AppState::fake();
        let ghost = crate::testing::sample_teacher("ghost@x.com");
        assert!(matches!(
            create_experience(&st, &auth_for(&ghost), experience_req()).await,
            Err(AppError::NotFound("User not found"))
        ));
    }
}
