use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;

/// Form body for create and update. Absent fields read as empty strings.
///
/// Accepted as `application/x-www-form-urlencoded` or `multipart/form-data`
/// (what a browser sends for `FormData`).
#[derive(Debug, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn unparsable(e: impl std::fmt::Display) -> ApiError {
    warn!(error = %e, "form rejected");
    ApiError::validation("Error parsing form data")
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

impl UserForm {
    async fn from_multipart(mut mp: Multipart) -> Result<Self, ApiError> {
        let (mut name, mut email, mut password) = (None, None, None);
        while let Some(field) = mp.next_field().await.map_err(unparsable)? {
            let slot = match field.name() {
                Some("name") => &mut name,
                Some("email") => &mut email,
                Some("password") => &mut password,
                _ => continue,
            };
            let value = field.text().await.map_err(unparsable)?;
            // first occurrence wins
            slot.get_or_insert(value);
        }
        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for UserForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(&req) {
            let mp = Multipart::from_request(req, state).await.map_err(unparsable)?;
            return Self::from_multipart(mp).await;
        }

        let Form(form) = Form::<UserForm>::from_request(req, state)
            .await
            .map_err(unparsable)?;
        Ok(form)
    }
}
