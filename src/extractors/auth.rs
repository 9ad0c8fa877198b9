use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization, Cookie, HeaderMapExt};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppError, AppState};

/// Cookie the web client stores the access token in.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

/// Extracts the access token from the Authorization header or, failing that,
/// the access-token cookie.
fn extract_token_from_request(parts: &Parts) -> Option<String> {
    if let Some(Authorization(bearer)) = parts.headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }

    parts
        .headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(ACCESS_TOKEN_COOKIE).map(str::to_string))
}

/// The signed-in account making the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = extract_token_from_request(parts);
        let state = state.clone();

        async move {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized("Missing authentication: no bearer token or session cookie".to_string())
            })?;

            let claims = state.verifier.verify(&token).await.map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                AppError::Unauthorized(e)
            })?;

            let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
                tracing::warn!(sub = %claims.sub, "Access token subject is not a UUID");
                AppError::Unauthorized("Invalid token subject".to_string())
            })?;

            Ok(AuthenticatedUser {
                user_id,
                email: claims.email,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bearer, mint_token, test_app, test_config, TEST_ISSUER, TEST_JWT_SECRET};
    use axum::{body::Body, http::{header, Request}};

    async fn extract(req: Request<Body>) -> Result<AuthenticatedUser, AppError> {
        let app = test_app(test_config(None), true);
        let (mut parts, _) = req.into_parts();
        AuthenticatedUser::from_request_parts(&mut parts, &app.state).await
    }

    #[tokio::test]
    async fn bearer_header_is_accepted() {
        let user = Uuid::new_v4();
        let req = Request::builder()
            .header(header::AUTHORIZATION, bearer(user))
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract(req).await.unwrap().user_id, user);
    }

    #[tokio::test]
    async fn session_cookie_is_accepted() {
        let user = Uuid::new_v4();
        let token = mint_token(user, TEST_JWT_SECRET, TEST_ISSUER, 3600);
        let req = Request::builder()
            .header(header::COOKIE, format!("theme=dark; {}={}", ACCESS_TOKEN_COOKIE, token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract(req).await.unwrap().user_id, user);
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(matches!(extract(req).await, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn bad_token_is_unauthorized() {
        let req = Request::builder()
            .header(header::AUTHORIZATION, "Bearer nonsense")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(extract(req).await, Err(AppError::Unauthorized(_))));
    }
}
