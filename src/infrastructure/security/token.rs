// src/infrastructure/security/token.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::{TokenGenerator, TokenVerifier},
};
use crate::domain::{
    token::{TokenEntity, TokenKind},
    user::UserId,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use uuid::Uuid;

/// Root Ed25519 key pair shared by every issuer and verifier in the process.
#[derive(Clone)]
pub struct BiscuitKeys {
    root: Arc<KeyPair>,
}

impl BiscuitKeys {
    pub fn from_private_hex(private_key_hex: &str) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self {
            root: Arc::new(KeyPair::from(&private)),
        })
    }

    pub fn public(&self) -> PublicKey {
        self.root.public()
    }
}

/// Mints tokens of a single kind with a fixed lifetime.
#[derive(Clone)]
pub struct BiscuitTokenIssuer {
    keys: BiscuitKeys,
    kind: TokenKind,
    ttl: Duration,
}

impl BiscuitTokenIssuer {
    pub fn new(keys: BiscuitKeys, kind: TokenKind, ttl: Duration) -> Self {
        Self { keys, kind, ttl }
    }
}

fn build_code_and_params(
    user_id: UserId,
    kind: TokenKind,
    issued: u64,
    expires: u64,
) -> (&'static str, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), Term::Str(user_id.to_string()));
    params.insert("kind".to_string(), Term::Str(kind.as_str().to_string()));
    params.insert("issued".to_string(), Term::Date(issued));
    params.insert("exp".to_string(), Term::Date(expires));
    params.insert("jti".to_string(), Term::Str(Uuid::new_v4().to_string()));

    let code = r#"
        user({uid});
        token_type({kind});
        issued_at({issued});
        expires_at({exp});
        token_id({jti});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
    "#;

    (code, params)
}

fn build_and_serialize_biscuit(
    code: &str,
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> ApplicationResult<String> {
    let token = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn unix_seconds(at: SystemTime) -> ApplicationResult<u64> {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

fn to_datetime(seconds: u64) -> ApplicationResult<DateTime<Utc>> {
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| ApplicationError::infrastructure("token timestamp out of range"))
}

#[async_trait]
impl TokenGenerator for BiscuitTokenIssuer {
    async fn generate(&self, user_id: UserId) -> ApplicationResult<TokenEntity> {
        // Biscuit dates have second resolution; the entity mirrors what the
        // token itself carries.
        let issued = unix_seconds(SystemTime::now())?;
        let expires = issued
            .checked_add(self.ttl.as_secs())
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        let (code, params) = build_code_and_params(user_id, self.kind, issued, expires);
        let token = build_and_serialize_biscuit(code, params, &self.keys.root)?;

        Ok(TokenEntity {
            token,
            user_id,
            kind: self.kind,
            issued_at: i64::try_from(issued)
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?,
            expires: to_datetime(expires)?,
            blacklisted: false,
        })
    }
}

/// Accepts only tokens of `expected` kind signed by the root key.
#[derive(Clone)]
pub struct BiscuitTokenVerifier {
    public: PublicKey,
    expected: TokenKind,
}

impl BiscuitTokenVerifier {
    pub fn new(public: PublicKey, expected: TokenKind) -> Self {
        Self { public, expected }
    }

    fn authorize(&self, token: &str) -> Result<TokenEntity, String> {
        let biscuit = Biscuit::from_base64(token, self.public).map_err(|err| err.to_string())?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true;")
            .map_err(|err| err.to_string())?
            .build(&biscuit)
            .map_err(|err| err.to_string())?;

        authorizer.authorize().map_err(|err| err.to_string())?;

        let (facts, _, _, _) = authorizer.dump();
        let claims = parse_claims(facts).ok_or_else(|| "incomplete claims".to_string())?;

        if claims.kind != self.expected {
            return Err(format!(
                "expected {} token, got {}",
                self.expected, claims.kind
            ));
        }

        Ok(TokenEntity {
            token: token.to_owned(),
            user_id: claims.user_id,
            kind: claims.kind,
            issued_at: claims.issued_at,
            expires: claims.expires_at,
            blacklisted: false,
        })
    }
}

#[async_trait]
impl TokenVerifier for BiscuitTokenVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<Option<TokenEntity>> {
        match self.authorize(token) {
            Ok(entity) => Ok(Some(entity)),
            Err(reason) => {
                tracing::debug!(%reason, kind = %self.expected, "token rejected");
                Ok(None)
            }
        }
    }
}
