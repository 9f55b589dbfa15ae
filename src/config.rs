use anyhow::Context;
use serde::Deserialize;

/// Default token lifetime: 36000 minutes (600 hours).
pub const DEFAULT_TTL_MINUTES: i64 = 36_000;
/// Default upper bound for a single profile image.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub minio_endpoint: String,
    pub minio_bucket: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    pub minio_region: String,
    pub max_image_bytes: usize,
    /// When set, listing sub-records of a teacher that has none is reported as 404.
    pub empty_listing_not_found: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "teacher-profiles".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "teacher-profiles-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(DEFAULT_TTL_MINUTES),
        };
        Ok(Self {
            database_url,
            jwt,
            minio_endpoint: required("MINIO_ENDPOINT")?,
            minio_bucket: required("MINIO_BUCKET")?,
            minio_access_key: required("MINIO_ACCESS_KEY")?,
            minio_secret_key: required("MINIO_SECRET_KEY")?,
            minio_region: std::env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".into()),
            max_image_bytes: std::env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
            empty_listing_not_found: std::env::var("EMPTY_LISTING_NOT_FOUND")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("missing environment variable {key}"))
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
