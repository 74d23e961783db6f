use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::{PasswordComparer, PasswordHasher},
};
use crate::domain::user::PasswordHash;
use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash as EncodedHash, PasswordHasher as _, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use async_trait::async_trait;

/// Argon2id with the crate defaults. Both hashing and comparison run on the
/// blocking pool.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<PasswordHash> {
        let password = password.to_owned();
        let encoded = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))??;

        Ok(PasswordHash::new(encoded)?)
    }
}

#[async_trait]
impl PasswordComparer for Argon2PasswordHasher {
    async fn compare(&self, password: &str, hashed: &PasswordHash) -> ApplicationResult<bool> {
        let password = password.to_owned();
        let hashed = hashed.as_str().to_owned();
        tokio::task::spawn_blocking(move || -> ApplicationResult<bool> {
            let parsed = EncodedHash::new(&hashed)
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
            match Argon2::default().verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(ApplicationError::infrastructure(err.to_string())),
            }
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
    }
}
