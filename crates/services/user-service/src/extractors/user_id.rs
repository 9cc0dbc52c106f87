//! Extractor for the `?id=` query parameter.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use common::AppError;
use domain::UserId;

use super::{MSG_ID_REQUIRED, MSG_INVALID_ID};

/// User id taken from the query string.
///
/// Runs before any body extractor, so a bad id is reported even when the
/// body is also malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdQuery(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(MSG_INVALID_ID))?;

        let raw = params
            .get("id")
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::bad_request(MSG_ID_REQUIRED))?;

        raw.parse::<UserId>()
            .map(UserIdQuery)
            .map_err(|_| AppError::bad_request(MSG_INVALID_ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> Result<UserIdQuery, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        UserIdQuery::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_id() {
        assert_eq!(extract("/users?id=42").await.unwrap(), UserIdQuery(42));
    }

    #[tokio::test]
    async fn test_missing_id() {
        for uri in ["/users", "/users?id=", "/users?other=1"] {
            let err = extract(uri).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m == MSG_ID_REQUIRED));
        }
    }

    #[tokio::test]
    async fn test_invalid_id() {
        for uri in ["/users?id=abc", "/users?id=-1", "/users?id=1.5"] {
            let err = extract(uri).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(ref m) if m == MSG_INVALID_ID));
        }
    }
}
