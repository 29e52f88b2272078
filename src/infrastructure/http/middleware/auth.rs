use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::domain::entities::{Caller, UserRole};
use crate::infrastructure::http::middleware::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const ORG_ID_HEADER: &str = "x-org-id";

/// Caller identity forwarded by the authenticating gateway.
///
/// Authentication happens upstream; this extractor only reads the
/// forwarded headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Caller);

fn header_value(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedCaller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing caller identity".to_string()))?;

        let role = header_value(parts, USER_ROLE_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Missing caller role".to_string()))?
            .parse::<UserRole>()
            .map_err(ApiError::Unauthorized)?;

        let org_id = header_value(parts, ORG_ID_HEADER);

        Ok(Self(Caller::new(user_id, role, org_id)))
    }
}
