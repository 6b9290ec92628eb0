use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::models::User;
use crate::repositories::UserRepository;
use crate::state::AppState;

/// The authenticated caller, resolved from an
/// `Authorization: ApiKey <key>` header.
///
/// Handlers that take this extractor are authenticated endpoints; the
/// request is rejected before the handler runs when the header is
/// missing, malformed, or names an unknown key.
pub struct ApiUser(pub User);

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::forbidden("no authentication info found"))?;

        let api_key =
            parse_api_key(value).ok_or_else(|| AppError::forbidden("malformed auth header"))?;

        let user = UserRepository::get_by_api_key(&state.db, api_key)
            .await?
            .ok_or_else(|| AppError::unauthorized("invalid api key"))?;

        Ok(ApiUser(user))
    }
}

/// Expects exactly `ApiKey <key>`.
fn parse_api_key(value: &str) -> Option<&str> {
    let (scheme, key) = value.split_once(' ')?;

    if scheme != "ApiKey" || key.is_empty() || key.contains(' ') {
        return None;
    }

    Some(key)
}
