//! Partial-update rules for `/update-profile`.
//!
//! Fields do not share one rule. Each [`ProfileField`] names its [`UpdatePolicy`] so the
//! differences live in one table instead of being scattered through the handler.

use crate::{
    error::AppError,
    form::{parse_date, FieldValue, FormFields},
};

use super::repo_types::Teacher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Assign only when the key carries a non-empty value.
    WhenTruthy,
    /// Assign whenever the key was sent, even as empty text or null.
    WhenPresent,
    /// Always assign. A missing key clears the field.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Surname,
    Speciality,
    Experience,
    About,
    Price,
    Phone,
    DateOfBirth,
    Available,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::Name,
        ProfileField::Surname,
        ProfileField::Speciality,
        ProfileField::Experience,
        ProfileField::About,
        ProfileField::Price,
        ProfileField::Phone,
        ProfileField::DateOfBirth,
        ProfileField::Available,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Surname => "surname",
            ProfileField::Speciality => "speciality",
            ProfileField::Experience => "experience",
            ProfileField::About => "about",
            ProfileField::Price => "price",
            ProfileField::Phone => "phone",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::Available => "available",
        }
    }

    pub fn policy(self) -> UpdatePolicy {
        match self {
            ProfileField::Name | ProfileField::Surname | ProfileField::Speciality => {
                UpdatePolicy::WhenTruthy
            }
            ProfileField::Experience
            | ProfileField::About
            | ProfileField::Phone
            | ProfileField::DateOfBirth
            | ProfileField::Available => UpdatePolicy::WhenPresent,
            ProfileField::Price => UpdatePolicy::Always,
        }
    }

    fn assign(self, teacher: &mut Teacher, value: Option<&FieldValue>) -> Result<(), AppError> {
        match self {
            ProfileField::Name => {
                if let Some(FieldValue::Text(s)) = value {
                    teacher.name = s.clone();
                }
            }
            ProfileField::Surname => {
                if let Some(FieldValue::Text(s)) = value {
                    teacher.surname = s.clone();
                }
            }
            ProfileField::Speciality => teacher.speciality = optional_text(value),
            ProfileField::Experience => teacher.experience = optional_text(value),
            ProfileField::About => teacher.about = optional_text(value),
            ProfileField::Phone => teacher.phone = optional_text(value),
            ProfileField::Price => teacher.price = parse_price(value)?,
            ProfileField::DateOfBirth => teacher.date_of_birth = parse_optional_date(value)?,
            ProfileField::Available => teacher.available = parse_available(value)?,
        }
        Ok(())
    }
}

/// Applies every field of `form` to `teacher` according to its policy.
///
/// `teacher` is a working copy: on error the caller drops it and nothing is persisted.
pub fn apply_profile_update(teacher: &mut Teacher, form: &FormFields) -> Result<(), AppError> {
    for field in ProfileField::ALL {
        let value = form.get(field.key());
        let applies = match field.policy() {
            UpdatePolicy::WhenTruthy => form.truthy(field.key()).is_some(),
            UpdatePolicy::WhenPresent => value.is_some(),
            UpdatePolicy::Always => true,
        };
        if applies {
            field.assign(teacher, value)?;
        }
    }
    Ok(())
}

pub(crate) fn optional_text(value: Option<&FieldValue>) -> Option<String> {
    value.and_then(FieldValue::as_text).map(str::to_string)
}

pub(crate) fn parse_price(value: Option<&FieldValue>) -> Result<Option<f64>, AppError> {
    match value.and_then(FieldValue::as_text) {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(Some)
            .ok_or_else(|| AppError::Invalid("Invalid price".into())),
        _ => Ok(None),
    }
}

pub(crate) fn parse_available(value: Option<&FieldValue>) -> Result<Option<bool>, AppError> {
    let Some(s) = value.and_then(FieldValue::as_text) else {
        return Ok(None);
    };
    match s.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(AppError::Invalid("Invalid availability flag".into())),
    }
}

/// Null and empty text clear the date; anything else, blank text included, must parse.
pub(crate) fn parse_optional_date(
    value: Option<&FieldValue>,
) -> Result<Option<time::OffsetDateTime>, AppError> {
    match value.and_then(FieldValue::as_text) {
        Some(s) if !s.is_empty() => {
            parse_date(s).map(Some).ok_or(AppError::InvalidDate)
        }
        _ => Ok(None),
    }
}
