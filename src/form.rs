//! Request bodies for the profile endpoints.
//!
//! `/create-account` and `/update-profile` accept either `multipart/form-data` (with an
//! optional `profileImage` file part) or a JSON object. Both are normalized into
//! [`FormFields`], which remembers whether a key was sent at all, sent as `null`, or
//! sent with a value. The profile update rules depend on that distinction.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Json,
};
use bytes::Bytes;
use serde_json::Value;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};

use crate::error::AppError;

pub const IMAGE_FIELD: &str = "profileImage";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    /// A JSON `false` or zero: sent, but never counts as a value for required fields.
    Falsy(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Falsy(s) => Some(s.as_str()),
            FieldValue::Null => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: String,
    pub body: Bytes,
}

#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, FieldValue>,
    pub image: Option<UploadedImage>,
}

impl FormFields {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    #[cfg(test)]
    pub fn is_present(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The value of `key` when it was sent as text, empty text included.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }

    /// The value of `key` when it was sent as non-empty text.
    pub fn truthy(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.fields
            .insert(key.to_string(), FieldValue::Text(value.to_string()));
        self
    }

    #[cfg(test)]
    pub fn with_null(mut self, key: &str) -> Self {
        self.fields.insert(key.to_string(), FieldValue::Null);
        self
    }

    #[cfg(test)]
    pub fn with_image(mut self, image: UploadedImage) -> Self {
        self.image = Some(image);
        self
    }

    pub fn from_json(map: serde_json::Map<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::Null => FieldValue::Null,
                    Value::String(s) => FieldValue::Text(s),
                    Value::Bool(false) => FieldValue::Falsy("false".into()),
                    Value::Number(n) if n.as_f64() == Some(0.0) => FieldValue::Falsy(n.to_string()),
                    other => FieldValue::Text(other.to_string()),
                };
                (k, value)
            })
            .collect();
        Self {
            fields,
            image: None,
        }
    }

    async fn from_multipart(mut mp: Multipart) -> Result<Self, AppError> {
        let mut form = FormFields::default();
        while let Some(field) = mp.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            if file_name.is_none() {
                let text = field.text().await.map_err(multipart_error)?;
                form.fields.insert(name, FieldValue::Text(text));
                continue;
            }
            if name != IMAGE_FIELD {
                continue;
            }
            let content_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| "application/octet-stream".into());
            let body = field.bytes().await.map_err(multipart_error)?;
            // Browsers send an empty, unnamed part when no file was picked.
            if body.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
                continue;
            }
            form.image = Some(UploadedImage {
                file_name,
                content_type,
                body,
            });
        }
        Ok(form)
    }
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadRejected("File too large".into())
    } else {
        AppError::Invalid(e.body_text())
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            let mp = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Invalid(e.body_text()))?;
            FormFields::from_multipart(mp).await
        } else {
            let Json(map) = Json::<serde_json::Map<String, Value>>::from_request(req, state).await?;
            Ok(FormFields::from_json(map))
        }
    }
}

/// Date-times without an offset, read as UTC.
const LOCAL_DATE_TIMES: [&[FormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

/// Parses an RFC 3339 timestamp, an offset-less ISO date-time, or a plain `YYYY-MM-DD`
/// date. Anything without an offset is taken as UTC.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    if let Some(ts) = LOCAL_DATE_TIMES
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(raw, *fmt).ok())
    {
        return Some(ts.assume_utc());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|d| d.midnight().assume_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn json_values_keep_presence_and_null() {
        let map = json!({"name": "Ann", "price": 50, "available": true, "dateOfBirth": null, "about": ""})
            .as_object()
            .cloned()
            .unwrap();
        let form = FormFields::from_json(map);
        assert_eq!(form.truthy("name"), Some("Ann"));
        assert_eq!(form.text("price"), Some("50"));
        assert_eq!(form.text("available"), Some("true"));
        assert_eq!(form.get("dateOfBirth"), Some(&FieldValue::Null));
        assert!(form.is_present("about"));
        assert_eq!(form.truthy("about"), None);
        assert!(!form.is_present("phone"));
    }

    #[test]
    fn json_false_and_zero_are_sent_but_not_truthy() {
        let map = json!({"name": false, "surname": 0, "price": 0, "available": false, "phone": 7})
            .as_object()
            .cloned()
            .unwrap();
        let form = FormFields::from_json(map);
        assert_eq!(form.truthy("name"), None);
        assert_eq!(form.truthy("surname"), None);
        assert_eq!(form.text("price"), Some("0"));
        assert_eq!(form.text("available"), Some("false"));
        assert_eq!(form.truthy("phone"), Some("7"));
    }

    #[test]
    fn parse_date_accepts_rfc3339_and_plain_dates() {
        assert_eq!(parse_date("1990-05-17"), Some(datetime!(1990-05-17 0:00 UTC)));
        assert_eq!(
            parse_date("2021-09-01T08:30:00+02:00"),
            Some(datetime!(2021-09-01 8:30 +2))
        );
        assert_eq!(
            parse_date("1990-05-17T10:00:00"),
            Some(datetime!(1990-05-17 10:00 UTC))
        );
        assert_eq!(
            parse_date("1990-05-17T10:00"),
            Some(datetime!(1990-05-17 10:00 UTC))
        );
        assert_eq!(
            parse_date("1990-05-17T10:00:00.250"),
            Some(datetime!(1990-05-17 10:00:00.25 UTC))
        );
        assert_eq!(parse_date("17/05/1990"), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("1990-13-40"), None);
    }

    #[tokio::test]
    async fn multipart_body_collects_text_and_image() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nAnn\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"phone\"\r\n\r\n\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"profileImage\"; filename=\"me.png\"\r\n\
             Content-Type: image/png\r\n\r\nPNGDATA\r\n--{b}--\r\n",
            b = boundary
        );
        let req = Request::builder()
            .method("POST")
            .uri("/create-account")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let form = FormFields::from_request(req, &()).await.unwrap();
        assert_eq!(form.truthy("name"), Some("Ann"));
        assert_eq!(form.text("phone"), Some(""));
        let image = form.image.expect("image part");
        assert_eq!(image.file_name.as_deref(), Some("me.png"));
        assert_eq!(image.content_type, "image/png");
        assert_eq!(&image.body[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let err = FormFields::from_request(req, &()).await.unwrap_err();
        assert!(matches!(err, AppError::Invalid(_)));
    }
}
