use crate::domain::token::TokenEntity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: TokenEntity,
    pub refresh_token: TokenEntity,
}
