// tests/support/mocks/security.rs
use super::{CallLog, fixed_now};
use async_trait::async_trait;
use chrono::Duration;
use dental_auth::application::{
    ApplicationResult,
    ports::security::{PasswordComparer, PasswordHasher, TokenGenerator, TokenVerifier},
};
use dental_auth::domain::{
    token::{TokenEntity, TokenKind},
    user::{PasswordHash, UserId},
};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const HASH_PREFIX: &str = "hashed:";

/// Deterministic "hash": a fixed prefix plus the plaintext.
pub struct MockPasswordHasher {
    calls: CallLog,
}

impl MockPasswordHasher {
    pub fn new(calls: CallLog) -> Self {
        Self { calls }
    }
}

#[async_trait]
impl PasswordHasher for MockPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<PasswordHash> {
        self.calls.record("hash");
        Ok(PasswordHash::new(format!("{HASH_PREFIX}{password}"))?)
    }
}

/// Matches passwords hashed by `MockPasswordHasher`.
pub struct MockPasswordComparer {
    calls: CallLog,
}

impl MockPasswordComparer {
    pub fn new(calls: CallLog) -> Self {
        Self { calls }
    }
}

#[async_trait]
impl PasswordComparer for MockPasswordComparer {
    async fn compare(&self, password: &str, hashed: &PasswordHash) -> ApplicationResult<bool> {
        self.calls.record("compare");
        Ok(hashed.as_str() == format!("{HASH_PREFIX}{password}"))
    }
}

/// Issues `"{kind}-{n}"` tokens, numbered per generator.
pub struct MockTokenGenerator {
    calls: CallLog,
    kind: TokenKind,
    issued: AtomicUsize,
}

impl MockTokenGenerator {
    pub fn new(calls: CallLog, kind: TokenKind) -> Self {
        Self {
            calls,
            kind,
            issued: AtomicUsize::new(0),
        }
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

pub fn token_entity(user_id: UserId, kind: TokenKind, token: &str) -> TokenEntity {
    TokenEntity {
        token: token.to_owned(),
        user_id,
        kind,
        issued_at: fixed_now().timestamp(),
        expires: fixed_now() + Duration::days(30),
        blacklisted: false,
    }
}

#[async_trait]
impl TokenGenerator for MockTokenGenerator {
    async fn generate(&self, user_id: UserId) -> ApplicationResult<TokenEntity> {
        self.calls.record(format!("generate_{}", self.kind));
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(token_entity(user_id, self.kind, &format!("{}-{n}", self.kind)))
    }
}

/// Accepts exactly one token string.
pub struct MockTokenVerifier {
    calls: CallLog,
    accepts: Option<TokenEntity>,
}

impl MockTokenVerifier {
    pub fn rejecting(calls: CallLog) -> Self {
        Self {
            calls,
            accepts: None,
        }
    }

    pub fn accepting(calls: CallLog, token: TokenEntity) -> Self {
        Self {
            calls,
            accepts: Some(token),
        }
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<Option<TokenEntity>> {
        self.calls.record("verify");
        Ok(self.accepts.clone().filter(|accepted| accepted.token == token))
    }
}
