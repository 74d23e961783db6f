// tests/support/mocks/tokens.rs
use super::CallLog;
use async_trait::async_trait;
use dental_auth::domain::{
    errors::DomainResult,
    token::{TokenByUserId, TokenEntity, TokenRemover, TokenSaver},
    user::UserId,
};
use std::sync::Mutex;

/// Token store returning a scripted record for lookups and remembering what
/// was saved or deleted.
pub struct MockTokenStore {
    calls: CallLog,
    stored: Option<TokenEntity>,
    saved: Mutex<Vec<TokenEntity>>,
    deleted: Mutex<Vec<(UserId, String)>>,
}

impl MockTokenStore {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            stored: None,
            saved: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_stored(mut self, token: TokenEntity) -> Self {
        self.stored = Some(token);
        self
    }

    pub fn saved(&self) -> Vec<TokenEntity> {
        self.saved.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<(UserId, String)> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenSaver for MockTokenStore {
    async fn save_token(&self, token: TokenEntity) -> DomainResult<TokenEntity> {
        self.calls.record("save_token");
        self.saved.lock().unwrap().push(token.clone());
        Ok(token)
    }
}

#[async_trait]
impl TokenByUserId for MockTokenStore {
    async fn get_token_by_user_id(
        &self,
        user_id: UserId,
        token: &str,
    ) -> DomainResult<Option<TokenEntity>> {
        self.calls.record("get_token_by_user_id");
        Ok(self
            .stored
            .clone()
            .filter(|stored| stored.user_id == user_id && stored.token == token))
    }
}

#[async_trait]
impl TokenRemover for MockTokenStore {
    async fn delete_token_by_user_id(&self, user_id: UserId, token: &str) -> DomainResult<()> {
        self.calls.record("delete_token_by_user_id");
        self.deleted.lock().unwrap().push((user_id, token.to_owned()));
        Ok(())
    }
}
