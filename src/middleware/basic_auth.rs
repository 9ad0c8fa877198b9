use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::config::BasicAuthCredentials;
use crate::AppState;

pub const REALM: &str = "Private Journal";

const PUBLIC_ASSETS: [&str; 5] = [
    "/favicon.ico",
    "/manifest.webmanifest",
    "/icon-192.png",
    "/icon-512.png",
    "/sw.js",
];

const PUBLIC_PREFIXES: [&str; 2] = ["/_next/static/", "/_next/image"];

/// Static assets the browser fetches without credentials.
pub fn is_public_asset(path: &str) -> bool {
    PUBLIC_ASSETS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Checks an `Authorization: Basic ...` header value against `expected`.
pub fn credentials_match(header_value: &str, expected: &BasicAuthCredentials) -> bool {
    let Some(encoded) = header_value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return false;
    };
    let Ok(creds) = std::str::from_utf8(&decoded) else {
        return false;
    };
    let Some((username, password)) = creds.split_once(':') else {
        return false;
    };

    // Constant-time comparison to prevent timing attacks
    let user_ok = expected.username.as_bytes().ct_eq(username.as_bytes());
    let pass_ok = expected.password.as_bytes().ct_eq(password.as_bytes());
    (user_ok & pass_ok).into()
}

/// Site-wide gate. Does nothing unless credentials are configured.
pub async fn basic_auth_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.basic_auth.as_ref() else {
        return next.run(request).await;
    };

    if is_public_asset(request.uri().path()) {
        return next.run(request).await;
    }

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| credentials_match(v, expected));

    if authorized {
        return next.run(request).await;
    }

    tracing::warn!(path = %request.uri().path(), "Basic auth challenge issued");
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", REALM))],
        "Authentication required",
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> BasicAuthCredentials {
        BasicAuthCredentials {
            username: "us".to_string(),
            password: "p:ss".to_string(),
        }
    }

    fn basic(user: &str, pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
    }

    #[test]
    fn correct_credentials() {
        assert!(credentials_match(&basic("us", "p:ss"), &creds()));
    }

    #[test]
    fn wrong_password_or_user() {
        assert!(!credentials_match(&basic("us", "p"), &creds()));
        assert!(!credentials_match(&basic("them", "p:ss"), &creds()));
    }

    #[test]
    fn malformed_headers() {
        assert!(!credentials_match("Bearer abc", &creds()));
        assert!(!credentials_match("Basic !!!not-base64!!!", &creds()));
        assert!(!credentials_match(&format!("Basic {}", STANDARD.encode("nocolon")), &creds()));
    }

    #[test]
    fn asset_paths_are_public() {
        assert!(is_public_asset("/sw.js"));
        assert!(is_public_asset("/_next/static/chunks/app.js"));
        assert!(!is_public_asset("/"));
        assert!(!is_public_asset("/api/provision"));
        assert!(!is_public_asset("/sw.js.map"));
    }
}
