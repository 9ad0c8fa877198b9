use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::IdentityUser;
use crate::provisioning::allow_list::normalize;
use crate::{AppError, AppResult};

/// Admin operations on the managed identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Looks an account up by email, ignoring case.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<IdentityUser>>;

    /// Creates an account whose email is already confirmed.
    async fn create_confirmed_user(&self, email: &str) -> AppResult<IdentityUser>;

    /// Issues a one-time sign-in link that lands on `redirect_to`.
    async fn generate_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<String>;
}

const USERS_PER_PAGE: usize = 200;
const MAX_USER_PAGES: usize = 50;

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<IdentityUser>,
}

/// Client for the provider's admin REST API, authenticated with the
/// service-role key.
pub struct SupabaseAdmin {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseAdmin {
    pub fn new(supabase_url: &str, service_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> AppResult<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, action, "Identity provider request failed");
            AppError::Downstream(format!("Identity provider request failed: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!(error = %e, status = %status, action, "Failed to read identity provider response");
            AppError::Downstream(format!("Failed to read identity provider response: {}", e))
        })?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, action, "Identity provider returned error");
            return Err(AppError::Downstream(error_message(&body, status)));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, action, "Failed to parse identity provider response");
            AppError::Downstream(format!("Failed to parse identity provider response: {}", e))
        })
    }
}

/// Pulls the human-readable message out of a provider error body.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Identity provider error: {} - {}", status, body))
}

/// The sign-in URL from a generate-link response, which may be flat or
/// nested under `properties`.
fn action_link(body: &Value) -> Option<String> {
    body.get("action_link")
        .or_else(|| body.get("properties").and_then(|p| p.get("action_link")))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Same case folding as the allow-list, so both checks agree on non-ASCII
/// addresses.
pub(crate) fn email_matches(user: &IdentityUser, email: &str) -> bool {
    user.email
        .as_deref()
        .is_some_and(|e| normalize(e) == normalize(email))
}

#[async_trait]
impl IdentityProvider for SupabaseAdmin {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<IdentityUser>> {
        tracing::debug!(email, "Looking up account in identity provider");

        for page in 1..=MAX_USER_PAGES {
            let request = self
                .request(reqwest::Method::GET, "/admin/users")
                .query(&[("page", page), ("per_page", USERS_PER_PAGE)]);
            let body = self.send(request, "list_users").await?;

            let UserPage { users } = serde_json::from_value(body).map_err(|e| {
                AppError::Downstream(format!("Failed to parse user list: {}", e))
            })?;

            if let Some(user) = users.iter().find(|u| email_matches(u, email)) {
                tracing::debug!(email, user_id = %user.id, "Account found");
                return Ok(Some(user.clone()));
            }
            if users.len() < USERS_PER_PAGE {
                break;
            }
        }

        tracing::debug!(email, "No account for email");
        Ok(None)
    }

    async fn create_confirmed_user(&self, email: &str) -> AppResult<IdentityUser> {
        let request = self
            .request(reqwest::Method::POST, "/admin/users")
            .json(&json!({ "email": email, "email_confirm": true }));
        let body = self.send(request, "create_user").await?;

        let user: IdentityUser = serde_json::from_value(body)
            .map_err(|e| AppError::Downstream(format!("Failed to parse created user: {}", e)))?;

        tracing::info!(email, user_id = %user.id, "Account created");
        Ok(user)
    }

    async fn generate_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<String> {
        let request = self
            .request(reqwest::Method::POST, "/admin/generate_link")
            .json(&json!({ "type": "magiclink", "email": email, "redirect_to": redirect_to }));
        let body = self.send(request, "generate_link").await?;

        action_link(&body).ok_or_else(|| {
            tracing::error!(email, "Generate-link response had no action_link");
            AppError::Downstream("Identity provider returned no sign-in link".to_string())
        })
    }
}
