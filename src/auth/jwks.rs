use jsonwebtoken::{jwk::JwkSet, DecodingKey};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

const KEY_SET_TTL: Duration = Duration::from_secs(3600);
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Public keys the identity provider signs access tokens with, fetched from
/// its JWKS endpoint and kept for an hour.
pub struct SigningKeys {
    client: reqwest::Client,
    url: String,
    sets: Cache<(), Arc<JwkSet>>,
}

impl SigningKeys {
    pub fn new(supabase_url: &str) -> Self {
        Self::with_url(format!(
            "{}/auth/v1/.well-known/jwks.json",
            supabase_url.trim_end_matches('/')
        ))
    }

    fn with_url(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            sets: Cache::builder().max_capacity(1).time_to_live(KEY_SET_TTL).build(),
        }
    }

    /// Key for `kid`. A kid the cached set does not know causes one refetch,
    /// so rotated keys are picked up before the cached set expires.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, String> {
        if let Some(set) = self.sets.get(&()).await {
            if let Some(key) = key_for(&set, kid) {
                return key;
            }
            tracing::info!(kid, "Unknown signing key; refreshing key set");
            self.sets.invalidate(&()).await;
        }

        let set = self.refresh().await?;
        key_for(&set, kid).unwrap_or_else(|| Err(format!("No signing key with kid {}", kid)))
    }

    async fn refresh(&self) -> Result<Arc<JwkSet>, String> {
        let response = self
            .client
            .get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, url = %self.url, "Failed to fetch signing keys");
                format!("Failed to fetch signing keys: {}", e)
            })?
            .error_for_status()
            .map_err(|e| format!("Signing key endpoint returned an error: {}", e))?;

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse signing keys: {}", e))?;

        tracing::debug!(keys = set.keys.len(), "Signing keys fetched");

        let set = Arc::new(set);
        self.sets.insert((), set.clone()).await;
        Ok(set)
    }

    #[cfg(test)]
    async fn seed(&self, set: JwkSet) {
        self.sets.insert((), Arc::new(set)).await;
    }
}

fn key_for(set: &JwkSet, kid: &str) -> Option<Result<DecodingKey, String>> {
    set.find(kid).map(|jwk| {
        DecodingKey::from_jwk(jwk).map_err(|e| format!("Unusable signing key {}: {}", kid, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens here, so any refetch fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:9/auth/v1/.well-known/jwks.json";

    fn key_set(kid: &str) -> JwkSet {
        serde_json::from_value(serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "kid": kid,
                "use": "sig",
                "alg": "RS256",
                "n": "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw",
                "e": "AQAB"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn url_points_at_provider_jwks() {
        let keys = SigningKeys::new("https://project.supabase.test/");
        assert_eq!(keys.url, "https://project.supabase.test/auth/v1/.well-known/jwks.json");
    }

    #[test]
    fn finds_key_by_kid() {
        let set = key_set("k1");
        assert!(matches!(key_for(&set, "k1"), Some(Ok(_))));
        assert!(key_for(&set, "k2").is_none());
    }

    #[tokio::test]
    async fn known_kid_is_served_from_cache() {
        let keys = SigningKeys::with_url(UNREACHABLE.to_string());
        keys.seed(key_set("k1")).await;

        assert!(keys.decoding_key("k1").await.is_ok());
        assert!(keys.sets.get(&()).await.is_some());
    }

    #[tokio::test]
    async fn unknown_kid_drops_cached_set_and_refetches() {
        let keys = SigningKeys::with_url(UNREACHABLE.to_string());
        keys.seed(key_set("old")).await;

        let result = keys.decoding_key("rotated").await;

        assert!(result.is_err_and(|e| e.starts_with("Failed to fetch signing keys")));
        assert!(keys.sets.get(&()).await.is_none());
    }
}
