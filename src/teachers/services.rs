use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::LoginRequest,
    profile::{apply_profile_update, optional_text, parse_available, parse_optional_date, parse_price},
    repo_types::{NewTeacher, Teacher},
};
use crate::{
    auth::{
        password::{hash_password, verify_password},
        AuthTeacher,
    },
    error::AppError,
    form::FormFields,
    images::services::{discard_image, store_profile_image, validate_image},
    state::AppState,
};

/// A teacher together with a freshly issued access token.
#[derive(Debug)]
pub struct Issued {
    pub teacher: Teacher,
    pub access_token: String,
}

fn required_field<'a>(form: &'a FormFields, key: &str, missing: &'static str) -> Result<&'a str, AppError> {
    form.truthy(key).ok_or(AppError::MissingField(missing))
}

pub async fn register(st: &AppState, mut form: FormFields) -> Result<Issued, AppError> {
    const FAILURE: &str = "An error occurred during registration";

    let name = required_field(&form, "name", "Full name is required")?.to_string();
    let surname = required_field(&form, "surname", "Surname is required")?.to_string();
    let email = required_field(&form, "email", "Email is required")?.to_string();
    let password = required_field(&form, "password", "Password is required")?.to_string();

    let price = parse_price(form.get("price"))?;
    let available = parse_available(form.get("available"))?;
    let date_of_birth = parse_optional_date(form.get("dateOfBirth"))?;
    if let Some(image) = &form.image {
        validate_image(image, st.config.max_image_bytes)?;
    }

    // Early exit only; the insert below is what enforces uniqueness.
    let existing = st
        .teachers
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?;
    if existing.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::DuplicateAccount);
    }

    let password_hash = hash_password(&password).map_err(|e| AppError::internal(FAILURE, e))?;
    let profile_image = match form.image.take() {
        Some(image) => Some(store_profile_image(st, image).await?),
        None => None,
    };

    let new = NewTeacher {
        id: Uuid::new_v4(),
        name,
        surname,
        speciality: optional_text(form.get("speciality")),
        email,
        password_hash,
        experience: optional_text(form.get("experience")),
        about: optional_text(form.get("about")),
        price,
        phone: optional_text(form.get("phone")),
        date_of_birth,
        available,
        profile_image: profile_image.clone(),
    };
    let email = new.email.clone();

    let teacher = match st.teachers.create(new).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            if let Some(path) = &profile_image {
                discard_image(st, path).await;
            }
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::DuplicateAccount);
        }
        Err(e) => {
            if let Some(path) = &profile_image {
                discard_image(st, path).await;
            }
            return Err(AppError::internal(FAILURE, e));
        }
    };

    let access_token = st
        .jwt
        .sign(&teacher)
        .map_err(|e| AppError::internal(FAILURE, e))?;

    info!(teacher_id = %teacher.id, user_id = teacher.user_id, "teacher registered");
    Ok(Issued {
        teacher,
        access_token,
    })
}

pub async fn login(st: &AppState, req: LoginRequest) -> Result<Issued, AppError> {
    const FAILURE: &str = "An error occurred during login";

    let email = req
        .email
        .filter(|e| !e.is_empty())
        .ok_or(AppError::MissingField("Email is required"))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or(AppError::MissingField("Password is required"))?;

    let teacher = st
        .teachers
        .find_by_email(&email)
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            AppError::AccountNotFound
        })?;

    let ok = verify_password(&password, &teacher.password_hash)
        .map_err(|e| AppError::internal(FAILURE, e))?;
    if !ok {
        warn!(teacher_id = %teacher.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let access_token = st
        .jwt
        .sign(&teacher)
        .map_err(|e| AppError::internal(FAILURE, e))?;

    info!(teacher_id = %teacher.id, "teacher logged in");
    Ok(Issued {
        teacher,
        access_token,
    })
}

pub async fn list_teachers(st: &AppState) -> Result<Vec<Teacher>, AppError> {
    st.teachers
        .list()
        .await
        .map_err(|e| AppError::internal("Failed to retrieve users", e))
}

/// Lookup by the public numeric id.
pub async fn get_by_user_id(st: &AppState, raw: &str) -> Result<Teacher, AppError> {
    let user_id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::InvalidId("Invalid user ID"))?;
    st.teachers
        .find_by_user_id(user_id)
        .await
        .map_err(|e| AppError::internal("Failed to retrieve user", e))?
        .ok_or(AppError::NotFound("User not found"))
}

/// Lookup by the internal identity.
pub async fn get_by_id(st: &AppState, raw: &str) -> Result<Teacher, AppError> {
    let id = Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId("Invalid teacher ID"))?;
    st.teachers
        .find_by_id(id)
        .await
        .map_err(|e| AppError::internal("Server error", e))?
        .ok_or(AppError::NotFound("Teacher not found"))
}

/// The caller's current record, read from the store rather than the token.
pub async fn get_self(st: &AppState, auth: &AuthTeacher) -> Result<Teacher, AppError> {
    st.teachers
        .find_by_id(auth.teacher_id)
        .await
        .map_err(|e| AppError::internal("Failed to retrieve user", e))?
        .ok_or(AppError::Unauthorized)
}

pub async fn update_profile(
    st: &AppState,
    auth: &AuthTeacher,
    mut form: FormFields,
) -> Result<Teacher, AppError> {
    const FAILURE: &str = "Failed to update profile";

    if form.truthy("name").is_none() || form.truthy("surname").is_none() {
        return Err(AppError::MissingField("Name and surname are required."));
    }

    let current = st
        .teachers
        .find_by_id(auth.teacher_id)
        .await
        .map_err(|e| AppError::internal(FAILURE, e))?
        .ok_or(AppError::NotFound("User not found"))?;

    let mut updated = current.clone();
    apply_profile_update(&mut updated, &form)?;

    let new_image = match form.image.take() {
        Some(image) => Some(store_profile_image(st, image).await?),
        None => None,
    };
    if let Some(path) = &new_image {
        updated.profile_image = Some(path.clone());
    }

    let saved = match st.teachers.update_profile(&updated).await {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            if let Some(path) = &new_image {
                discard_image(st, path).await;
            }
            return Err(AppError::NotFound("User not found"));
        }
        Err(e) => {
            if let Some(path) = &new_image {
                discard_image(st, path).await;
            }
            return Err(AppError::internal(FAILURE, e));
        }
    };

    // The superseded image goes only once the new reference is stored.
    if new_image.is_some() {
        if let Some(old) = current.profile_image.as_deref() {
            if saved.profile_image.as_deref() != Some(old) {
                discard_image(st, old).await;
            }
        }
    }

    info!(teacher_id = %saved.id, "profile updated");
    Ok(saved)
}
