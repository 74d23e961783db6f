// src/infrastructure/repositories/postgres_token.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::token::{TokenByUserId, TokenEntity, TokenKind, TokenRemover, TokenSaver};
use crate::domain::user::UserId;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use sqlx::{FromRow, PgPool};

/// Refresh tokens are persisted as SHA-256 digests; the raw token never
/// reaches the database.
#[derive(Clone)]
pub struct PostgresTokenStore {
    pool: PgPool,
}

impl PostgresTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn digest(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

#[derive(Debug, FromRow)]
struct TokenRow {
    token_type: String,
    issued_at: i64,
    expires_at: DateTime<Utc>,
    blacklisted: bool,
}

impl TokenRow {
    fn into_entity(self, user_id: UserId, token: &str) -> Result<TokenEntity, DomainError> {
        Ok(TokenEntity {
            token: token.to_owned(),
            user_id,
            kind: self.token_type.parse::<TokenKind>()?,
            issued_at: self.issued_at,
            expires: self.expires_at,
            blacklisted: self.blacklisted,
        })
    }
}

#[async_trait]
impl TokenSaver for PostgresTokenStore {
    /// Also drops the owner's records that have already expired.
    async fn save_token(&self, token: TokenEntity) -> DomainResult<TokenEntity> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1 AND expires_at <= NOW()")
            .bind(token.user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token_digest, token_type, issued_at, expires_at, blacklisted)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id, token_digest) DO UPDATE
             SET expires_at = EXCLUDED.expires_at, blacklisted = EXCLUDED.blacklisted",
        )
        .bind(token.user_id.as_uuid())
        .bind(digest(&token.token))
        .bind(token.kind.as_str())
        .bind(token.issued_at)
        .bind(token.expires)
        .bind(token.blacklisted)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        tx.commit().await.map_err(map_sqlx)?;
        Ok(token)
    }
}

#[async_trait]
impl TokenByUserId for PostgresTokenStore {
    async fn get_token_by_user_id(
        &self,
        user_id: UserId,
        token: &str,
    ) -> DomainResult<Option<TokenEntity>> {
        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT token_type, issued_at, expires_at, blacklisted
             FROM refresh_tokens WHERE user_id = $1 AND token_digest = $2",
        )
        .bind(user_id.as_uuid())
        .bind(digest(token))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(|row| row.into_entity(user_id, token)).transpose()
    }
}

#[async_trait]
impl TokenRemover for PostgresTokenStore {
    async fn delete_token_by_user_id(&self, user_id: UserId, token: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1 AND token_digest = $2")
            .bind(user_id.as_uuid())
            .bind(digest(token))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
