pub mod claims;
pub mod jwks;
pub mod jwt;
pub mod supabase_admin;

pub use jwks::SigningKeys;
pub use jwt::TokenVerifier;
pub use supabase_admin::{IdentityProvider, SupabaseAdmin};
