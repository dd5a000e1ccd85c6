use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};

use crate::database::models::NewSchool;
use crate::error::ApiError;

/// Create-body extractor: reads the raw body and runs it through the
/// `NewSchool` coercion rules.
///
/// Unlike `axum::Json`, an empty body is accepted (as `{}`) and a missing
/// `Content-Type` is tolerated when there is nothing to parse.
#[derive(Debug)]
pub struct SchoolPayload(pub NewSchool);

#[async_trait]
impl<S> FromRequest<S> for SchoolPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = has_json_content_type(req.headers());
        let body = Bytes::from_request(req, state).await?;

        let is_blank = body.iter().all(u8::is_ascii_whitespace);
        if !is_blank && !json_content {
            return Err(ApiError::unsupported_media_type(
                "Expected request with `Content-Type: application/json`",
            ));
        }

        Ok(SchoolPayload(NewSchool::from_slice(&body)?))
    }
}

/// `application/json` or any `application/*+json`, parameters ignored
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn recognises_json_content_types() {
        assert!(has_json_content_type(&headers("application/json")));
        assert!(has_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(has_json_content_type(&headers("application/vnd.api+json")));
        assert!(!has_json_content_type(&headers("text/plain")));
        assert!(!has_json_content_type(&headers("application/x-www-form-urlencoded")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }
}
