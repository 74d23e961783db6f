use crate::application::ApplicationResult;
use crate::domain::{token::TokenEntity, user::PasswordHash, user::UserId};
use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> ApplicationResult<PasswordHash>;
}

#[async_trait]
pub trait PasswordComparer: Send + Sync {
    /// `Ok(false)` on mismatch; `Err` only when the comparison itself fails.
    async fn compare(&self, password: &str, hashed: &PasswordHash) -> ApplicationResult<bool>;
}

/// Mints one kind of token. Access and refresh tokens come from two
/// separately configured instances.
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    async fn generate(&self, user_id: UserId) -> ApplicationResult<TokenEntity>;
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Checks signature, expiry and token kind. Any token that fails is
    /// reported as `Ok(None)`.
    async fn verify(&self, token: &str) -> ApplicationResult<Option<TokenEntity>>;
}
