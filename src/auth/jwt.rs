use jsonwebtoken::{decode, Algorithm, DecodingKey, Header, Validation};

use super::{claims::AccessClaims, jwks::SigningKeys};

/// Audience the identity provider puts on signed-in users' tokens.
pub const TOKEN_AUDIENCE: &str = "authenticated";

enum KeySource {
    /// Project-wide HS256 secret.
    Secret(DecodingKey),
    /// Asymmetric keys published by the provider.
    Jwks(SigningKeys),
}

/// Validates access tokens issued by the identity provider.
pub struct TokenVerifier {
    keys: KeySource,
    issuer: String,
}

impl TokenVerifier {
    pub fn with_secret(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            keys: KeySource::Secret(DecodingKey::from_secret(secret.as_bytes())),
            issuer: issuer.into(),
        }
    }

    pub fn with_jwks(keys: SigningKeys, issuer: impl Into<String>) -> Self {
        Self {
            keys: KeySource::Jwks(keys),
            issuer: issuer.into(),
        }
    }

    pub async fn verify(&self, token: &str) -> Result<AccessClaims, String> {
        let header = decode_header(token)?;

        let (decoding_key, algorithm) = match &self.keys {
            KeySource::Secret(key) => (key.clone(), Algorithm::HS256),
            KeySource::Jwks(keys) => {
                if !matches!(header.alg, Algorithm::RS256 | Algorithm::ES256) {
                    return Err(format!("Unsupported JWT algorithm: {:?}", header.alg));
                }
                let kid = header.kid.ok_or("Missing kid in JWT header")?;
                (keys.decoding_key(&kid).await?, header.alg)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.validate_exp = true;

        let token_data = decode::<AccessClaims>(token, &decoding_key, &validation)
            .map_err(|e| format!("JWT validation failed: {}", e))?;

        Ok(token_data.claims)
    }
}

fn decode_header(token: &str) -> Result<Header, String> {
    jsonwebtoken::decode_header(token).map_err(|e| format!("Failed to decode JWT header: {}", e))
}
