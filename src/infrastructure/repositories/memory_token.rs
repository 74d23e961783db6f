use crate::domain::{
    errors::{DomainError, DomainResult},
    token::{TokenByUserId, TokenEntity, TokenRemover, TokenSaver},
    user::UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

type TokenKey = (UserId, String);

/// Process-local refresh-token store keyed by `(user_id, token)`.
#[derive(Default)]
pub struct InMemoryTokenStore {
    tokens: Mutex<HashMap<TokenKey, TokenEntity>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_for(&self, user_id: UserId) -> DomainResult<usize> {
        Ok(self
            .lock()?
            .keys()
            .filter(|(owner, _)| *owner == user_id)
            .count())
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, HashMap<TokenKey, TokenEntity>>> {
        self.tokens
            .lock()
            .map_err(|_| DomainError::Persistence("token store lock poisoned".into()))
    }
}

#[async_trait]
impl TokenSaver for InMemoryTokenStore {
    /// Also drops the owner's records that have already expired.
    async fn save_token(&self, token: TokenEntity) -> DomainResult<TokenEntity> {
        let now = Utc::now();
        let mut tokens = self.lock()?;
        tokens.retain(|(owner, _), stored| *owner != token.user_id || stored.expires > now);
        tokens.insert((token.user_id, token.token.clone()), token.clone());
        Ok(token)
    }
}

#[async_trait]
impl TokenByUserId for InMemoryTokenStore {
    async fn get_token_by_user_id(
        &self,
        user_id: UserId,
        token: &str,
    ) -> DomainResult<Option<TokenEntity>> {
        Ok(self.lock()?.get(&(user_id, token.to_owned())).cloned())
    }
}

#[async_trait]
impl TokenRemover for InMemoryTokenStore {
    async fn delete_token_by_user_id(&self, user_id: UserId, token: &str) -> DomainResult<()> {
        self.lock()?.remove(&(user_id, token.to_owned()));
        Ok(())
    }
}
