use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Education, Experience, NewEducation, NewExperience};

#[async_trait]
pub trait EducationStore: Send + Sync {
    async fn insert_education(&self, new: NewEducation) -> anyhow::Result<Education>;
    async fn list_education_by_teacher(&self, teacher_id: Uuid) -> anyhow::Result<Vec<Education>>;
}

#[async_trait]
pub trait ExperienceStore: Send + Sync {
    async fn insert_experience(&self, new: NewExperience) -> anyhow::Result<Experience>;
    async fn list_experience_by_teacher(&self, teacher_id: Uuid)
        -> anyhow::Result<Vec<Experience>>;
}

#[derive(Clone)]
pub struct PgEducationStore {
    db: PgPool,
}

impl PgEducationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EducationStore for PgEducationStore {
    async fn insert_education(&self, new: NewEducation) -> anyhow::Result<Education> {
        let row = sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO universities (university, faculty, start_date, end_date,
                                      about_university, teacher_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING university_id, university, faculty, start_date, end_date,
                      about_university, teacher_id
            "#,
        )
        .bind(new.university)
        .bind(new.faculty)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.about_university)
        .bind(new.teacher_id)
        .fetch_one(&self.db)
        .await
        .context("insert university")?;
        Ok(row)
    }

    async fn list_education_by_teacher(&self, teacher_id: Uuid) -> anyhow::Result<Vec<Education>> {
        let rows = sqlx::query_as::<_, Education>(
            r#"
            SELECT university_id, university, faculty, start_date, end_date,
                   about_university, teacher_id
              FROM universities
             WHERE teacher_id = $1
             ORDER BY university_id ASC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.db)
        .await
        .context("list universities by teacher")?;
        Ok(rows)
    }
}

#[derive(Clone)]
pub struct PgExperienceStore {
    db: PgPool,
}

impl PgExperienceStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExperienceStore for PgExperienceStore {
    async fn insert_experience(&self, new: NewExperience) -> anyhow::Result<Experience> {
        let row = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO experiences (company_name, position, start_date, end_date,
                                     about_experience, teacher_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING experience_id, company_name, position, start_date, end_date,
                      about_experience, teacher_id
            "#,
        )
        .bind(new.company_name)
        .bind(new.position)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.about_experience)
        .bind(new.teacher_id)
        .fetch_one(&self.db)
        .await
        .context("insert experience")?;
        Ok(row)
    }

    async fn list_experience_by_teacher(
        &self,
        teacher_id: Uuid,
    ) -> anyhow::Result<Vec<Experience>> {
        let rows = sqlx::query_as::<_, Experience>(
            r#"
            SELECT experience_id, company_name, position, start_date, end_date,
                   about_experience, teacher_id
              FROM experiences
             WHERE teacher_id = $1
             ORDER BY experience_id ASC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.db)
        .await
        .context("list experiences by teacher")?;
        Ok(rows)
    }
}
