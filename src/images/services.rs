use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{error::AppError, form::UploadedImage, state::AppState};

/// Public prefix under which stored images are served.
pub const UPLOADS_PREFIX: &str = "uploads";
pub const PROFILE_IMAGE_DIR: &str = "uploads/profile-images";
/// Lifetime of the presigned URL handed out by `/uploads/*path`.
pub const PRESIGN_TTL_SECS: u64 = 10 * 60;

const ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

pub fn validate_image(image: &UploadedImage, max_bytes: usize) -> Result<(), AppError> {
    if !ALLOWED_TYPES.contains(&image.content_type.as_str()) {
        return Err(AppError::UploadRejected(
            "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed.".into(),
        ));
    }
    if image.body.len() > max_bytes {
        return Err(AppError::UploadRejected("File too large".into()));
    }
    Ok(())
}

/// Builds `uploads/profile-images/<unix-millis>-<random><ext>`.
///
/// The extension is taken from the uploaded file name when it looks sane, otherwise from
/// the content type.
pub fn profile_image_key(file_name: Option<&str>, content_type: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let ext = file_name
        .and_then(extension_of)
        .or_else(|| ext_from_mime(content_type).map(|e| format!(".{e}")))
        .unwrap_or_default();
    format!("{PROFILE_IMAGE_DIR}/{millis}-{suffix}{ext}")
}

fn extension_of(file_name: &str) -> Option<String> {
    lazy_static! {
        static ref EXT_RE: Regex = Regex::new(r"(\.[A-Za-z0-9]{1,8})$").unwrap();
    }
    EXT_RE
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Validates and stores a profile image, returning its stored path.
pub async fn store_profile_image(st: &AppState, image: UploadedImage) -> Result<String, AppError> {
    validate_image(&image, st.config.max_image_bytes)?;
    let key = profile_image_key(image.file_name.as_deref(), &image.content_type);
    st.storage
        .put_object(&key, image.body, &image.content_type)
        .await
        .map_err(|e| AppError::internal("Failed to store profile image", e))?;
    info!(key = %key, "profile image stored");
    Ok(key)
}

/// Deletes a stored image. Failures are logged and swallowed.
pub async fn discard_image(st: &AppState, path: &str) {
    if let Err(e) = st.storage.delete_object(path).await {
        warn!(error = %e, path = %path, "failed to delete stored image");
    }
}

/// Maps the tail of `/uploads/*path` to a stored key, rejecting traversal.
pub fn upload_key(path: &str) -> Option<String> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return None;
    }
    Some(format!("{UPLOADS_PREFIX}/{path}"))
}

/// Resolves a public upload path to a short-lived download URL.
pub async fn presign_upload(st: &AppState, path: &str) -> Result<String, AppError> {
    let key = upload_key(path).ok_or(AppError::NotFound("File not found"))?;
    let exists = st
        .storage
        .object_exists(&key)
        .await
        .map_err(|e| AppError::internal("Failed to retrieve file", e))?;
    if !exists {
        return Err(AppError::NotFound("File not found"));
    }
    st.storage
        .presign_get(&key, PRESIGN_TTL_SECS)
        .await
        .map_err(|e| AppError::internal("Failed to retrieve file", e))
}
