use crate::domain::errors::DomainResult;
use crate::domain::token::entity::TokenEntity;
use crate::domain::user::UserId;
use async_trait::async_trait;

#[async_trait]
pub trait TokenSaver: Send + Sync {
    async fn save_token(&self, token: TokenEntity) -> DomainResult<TokenEntity>;
}

/// Lookups are keyed by the `(user_id, token)` pair so one user's token can
/// never resolve to another user's record.
#[async_trait]
pub trait TokenByUserId: Send + Sync {
    async fn get_token_by_user_id(
        &self,
        user_id: UserId,
        token: &str,
    ) -> DomainResult<Option<TokenEntity>>;
}

#[async_trait]
pub trait TokenRemover: Send + Sync {
    async fn delete_token_by_user_id(&self, user_id: UserId, token: &str) -> DomainResult<()>;
}
