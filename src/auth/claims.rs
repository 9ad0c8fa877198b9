use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    pub sub: String,           // Account id (UUID)
    pub exp: i64,              // Expiration timestamp
    pub iat: Option<i64>,      // Issued at timestamp
    pub iss: String,           // Issuer
    pub aud: Option<String>,   // Audience ("authenticated")
    pub email: Option<String>,
    pub role: Option<String>,
}
