use std::env;

use crate::provisioning::CoupleEmails;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub supabase_url: String,
    pub supabase_service_role_key: Option<String>,
    pub supabase_jwt_secret: Option<String>,
    pub site_url: String,
    pub couple: CoupleEmails,
    pub basic_auth: Option<BasicAuthCredentials>,
}

/// Username/password pair guarding the whole site.
#[derive(Clone, Debug)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| "SUPABASE_URL must be set".to_string())?
            .trim_end_matches('/')
            .to_string();

        let couple_csv = env::var("COUPLE_EMAILS")
            .map_err(|_| "COUPLE_EMAILS must be set".to_string())?;
        let couple = CoupleEmails::parse(&couple_csv)?;

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let basic_auth = match (optional_var("BASIC_AUTH_USER"), optional_var("BASIC_AUTH_PASS")) {
            (Some(username), Some(password)) => Some(BasicAuthCredentials { username, password }),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_addr,
            supabase_url,
            supabase_service_role_key: optional_var("SUPABASE_SERVICE_ROLE_KEY"),
            supabase_jwt_secret: optional_var("SUPABASE_JWT_SECRET"),
            site_url,
            couple,
            basic_auth,
        })
    }

    /// Issuer claim the identity provider stamps on access tokens.
    pub fn token_issuer(&self) -> String {
        format!("{}/auth/v1", self.supabase_url)
    }
}

// Empty values count as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
