use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::jwt::JwtKeys,
    config::AppConfig,
    records::repo::{EducationStore, ExperienceStore, PgEducationStore, PgExperienceStore},
    storage::{S3Storage, StorageClient},
    teachers::repo::{PgTeacherStore, TeacherStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
    pub teachers: Arc<dyn TeacherStore>,
    pub educations: Arc<dyn EducationStore>,
    pub experiences: Arc<dyn ExperienceStore>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    /// Postgres-backed stores and the S3 blob store.
    pub async fn init(config: AppConfig, db: PgPool) -> anyhow::Result<Self> {
        let storage = Arc::new(S3Storage::from_config(&config).await?) as Arc<dyn StorageClient>;
        Ok(Self {
            jwt: JwtKeys::from_config(&config.jwt),
            config: Arc::new(config),
            teachers: Arc::new(PgTeacherStore::new(db.clone())),
            educations: Arc::new(PgEducationStore::new(db.clone())),
            experiences: Arc::new(PgExperienceStore::new(db)),
            storage,
        })
    }

    /// In-memory stores and a recording blob store.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(crate::testing::test_config())
    }

    #[cfg(test)]
    pub fn fake_with(config: AppConfig) -> Self {
        use crate::testing::{FakeStorage, MemoryStore};

        let store = Arc::new(MemoryStore::default());
        Self {
            jwt: JwtKeys::from_config(&config.jwt),
            config: Arc::new(config),
            teachers: store.clone(),
            educations: store.clone(),
            experiences: store,
            storage: Arc::new(FakeStorage::default()),
        }
    }
}
