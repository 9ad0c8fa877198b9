//! Fakes and fixtures shared by the unit and router tests.

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::auth::supabase_admin::email_matches;
use crate::auth::{claims::AccessClaims, jwt::TOKEN_AUDIENCE, IdentityProvider, TokenVerifier};
use crate::config::{AppConfig, BasicAuthCredentials};
use crate::db::memory::MemoryStore;
use crate::handlers::MetricsState;
use crate::models::IdentityUser;
use crate::provisioning::{CoupleEmails, ProvisioningConfig, ProvisioningService};
use crate::{AppError, AppResult, AppState};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-enough-length";
pub const TEST_ISSUER: &str = "https://project.supabase.test/auth/v1";
pub const ANA: &str = "ana@example.com";
pub const BO: &str = "bo@example.com";

/// Identity provider that keeps accounts in memory.
#[derive(Default)]
pub struct FakeIdentity {
    users: Mutex<Vec<IdentityUser>>,
    links: AtomicUsize,
    fail_links: AtomicBool,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().push(IdentityUser {
            id,
            email: Some(email.to_string()),
        });
        id
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn links_issued(&self) -> usize {
        self.links.load(Ordering::SeqCst)
    }

    pub fn fail_links(&self) {
        self.fail_links.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<IdentityUser>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| email_matches(u, email))
            .cloned())
    }

    async fn create_confirmed_user(&self, email: &str) -> AppResult<IdentityUser> {
        let id = self.add_user(email);
        Ok(IdentityUser {
            id,
            email: Some(email.to_string()),
        })
    }

    async fn generate_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<String> {
        if self.fail_links.load(Ordering::SeqCst) {
            return Err(AppError::Downstream("Email link is invalid or has expired".to_string()));
        }
        self.links.fetch_add(1, Ordering::SeqCst);
        Ok(format!(
            "https://project.supabase.test/auth/v1/verify?type=magiclink&email={}&redirect_to={}",
            email, redirect_to
        ))
    }
}

/// Signs an access token the way the identity provider would.
pub fn mint_token(user_id: Uuid, secret: &str, issuer: &str, ttl_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id.to_string(),
        exp: now + ttl_secs,
        iat: Some(now),
        iss: issuer.to_string(),
        aud: Some(TOKEN_AUDIENCE.to_string()),
        email: None,
        role: Some("authenticated".to_string()),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

pub fn bearer(user_id: Uuid) -> String {
    format!("Bearer {}", mint_token(user_id, TEST_JWT_SECRET, TEST_ISSUER, 3600))
}

pub fn test_config(basic_auth: Option<(&str, &str)>) -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        supabase_url: "https://project.supabase.test".to_string(),
        supabase_service_role_key: Some("service-role".to_string()),
        supabase_jwt_secret: Some(TEST_JWT_SECRET.to_string()),
        site_url: "https://journal.example".to_string(),
        couple: CoupleEmails::new(ANA, BO).unwrap(),
        basic_auth: basic_auth.map(|(u, p)| BasicAuthCredentials {
            username: u.to_string(),
            password: p.to_string(),
        }),
    }
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub identity: Arc<FakeIdentity>,
}

/// Application state over in-memory fakes. `with_provisioning = false`
/// mimics a deployment without the service-role key.
pub fn test_app(config: AppConfig, with_provisioning: bool) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let identity = Arc::new(FakeIdentity::new());

    let provisioning = with_provisioning.then(|| {
        Arc::new(ProvisioningService::new(
            identity.clone(),
            store.clone(),
            ProvisioningConfig {
                couple: config.couple.clone(),
                site_url: config.site_url.clone(),
            },
        ))
    });

    let metrics = Arc::new(MetricsState {
        handle: PrometheusBuilder::new().build_recorder().handle(),
    });

    let state = Arc::new(AppState {
        store: store.clone(),
        verifier: Arc::new(TokenVerifier::with_secret(TEST_JWT_SECRET, TEST_ISSUER)),
        provisioning,
        config,
        metrics,
    });

    TestApp { state, store, identity }
}
