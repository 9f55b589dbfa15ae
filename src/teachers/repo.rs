use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewTeacher, Teacher};

/// Identity store for teacher accounts.
#[async_trait]
pub trait TeacherStore: Send + Sync {
    /// Inserts `new` unless its email is taken. `None` means the email already exists.
    async fn create(&self, new: NewTeacher) -> anyhow::Result<Option<Teacher>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Teacher>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Teacher>>;
    async fn find_by_user_id(&self, user_id: i64) -> anyhow::Result<Option<Teacher>>;
    async fn list(&self) -> anyhow::Result<Vec<Teacher>>;
    /// Writes the mutable profile columns of `teacher`. `None` if the row is gone.
    async fn update_profile(&self, teacher: &Teacher) -> anyhow::Result<Option<Teacher>>;
}

const TEACHER_COLUMNS: &str = "id, user_id, name, surname, speciality, email, password_hash, \
     experience, about, price, phone, date_of_birth, available, profile_image, created_at";

#[derive(Clone)]
pub struct PgTeacherStore {
    db: PgPool,
}

impl PgTeacherStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeacherStore for PgTeacherStore {
    async fn create(&self, new: NewTeacher) -> anyhow::Result<Option<Teacher>> {
        // The unique index on email decides; no separate existence check.
        let sql = format!(
            r#"
            INSERT INTO teachers (id, name, surname, speciality, email, password_hash,
                                  experience, about, price, phone, date_of_birth,
                                  available, profile_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (email) DO NOTHING
            RETURNING {TEACHER_COLUMNS}
            "#
        );
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(new.id)
            .bind(new.name)
            .bind(new.surname)
            .bind(new.speciality)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.experience)
            .bind(new.about)
            .bind(new.price)
            .bind(new.phone)
            .bind(new.date_of_birth)
            .bind(new.available)
            .bind(new.profile_image)
            .fetch_optional(&self.db)
            .await?;
        Ok(teacher)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Teacher>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE email = $1");
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(teacher)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Teacher>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1");
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(teacher)
    }

    async fn find_by_user_id(&self, user_id: i64) -> anyhow::Result<Option<Teacher>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE user_id = $1");
        let teacher = sqlx::query_as::<_, Teacher>(&sql)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        Ok(teacher)
    }

    async fn list(&self) -> anyhow::Result<Vec<Teacher>> {
        let sql = format!("SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY user_id ASC");
        let rows = sqlx::query_as::<_, Teacher>(&sql)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn update_profile(&self, teacher: &Teacher) -> anyhow::Result<Option<Teacher>> {
        let sql = format!(
            r#"
            UPDATE teachers
               SET name = $2, surname = $3, speciality = $4, experience = $5, about = $6,
                   price = $7, phone = $8, date_of_birth = $9, available = $10,
                   profile_image = $11
             WHERE id = $1
            RETURNING {TEACHER_COLUMNS}
            "#
        );
        let updated = sqlx::query_as::<_, Teacher>(&sql)
            .bind(teacher.id)
            .bind(&teacher.name)
            .bind(&teacher.surname)
            .bind(&teacher.speciality)
            .bind(&teacher.experience)
            .bind(&teacher.about)
            .bind(teacher.price)
            .bind(&teacher.phone)
            .bind(teacher.date_of_birth)
            .bind(teacher.available)
            .bind(&teacher.profile_image)
            .fetch_optional(&self.db)
            .await?;
        Ok(updated)
    }
}
