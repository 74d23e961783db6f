// src/infrastructure/security/claims.rs
use crate::domain::{token::TokenKind, user::UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};

/// Authority facts recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub kind: TokenKind,
    pub issued_at: i64,
    pub expires_at: DateTime<Utc>,
    pub token_id: String,
}

/// `None` when any required fact is missing or malformed.
pub fn parse_claims(facts: Vec<Fact>) -> Option<TokenClaims> {
    let mut ctx = ClaimsContext::default();
    for fact in facts {
        ctx.apply_predicate(fact.predicate);
    }
    ctx.finish()
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<UserId>,
    kind: Option<TokenKind>,
    issued_at: Option<u64>,
    expires_at: Option<u64>,
    token_id: Option<String>,
}

impl ClaimsContext {
    fn apply_predicate(&mut self, predicate: Predicate) {
        let Some(term) = predicate.terms.into_iter().next() else {
            return;
        };
        match (predicate.name.as_str(), term) {
            ("user", Term::Str(id)) => self.user_id = id.parse().ok(),
            ("token_type", Term::Str(kind)) => self.kind = kind.parse().ok(),
            ("issued_at", Term::Date(seconds)) => self.issued_at = Some(seconds),
            ("expires_at", Term::Date(seconds)) => self.expires_at = Some(seconds),
            ("token_id", Term::Str(id)) => self.token_id = Some(id),
            _ => {}
        }
    }

    fn finish(self) -> Option<TokenClaims> {
        let issued_at = i64::try_from(self.issued_at?).ok()?;
        let expires_at = DateTime::<Utc>::from_timestamp(i64::try_from(self.expires_at?).ok()?, 0)?;
        Some(TokenClaims {
            user_id: self.user_id?,
            kind: self.kind?,
            issued_at,
            expires_at,
            token_id: self.token_id?,
        })
    }
}
