use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User},
    value_objects::Email,
};
use async_trait::async_trait;

#[async_trait]
pub trait EmailAvailability: Send + Sync {
    async fn is_email_taken(&self, email: &Email) -> DomainResult<bool>;
}

#[async_trait]
pub trait UserByEmail: Send + Sync {
    async fn get_user_by_email(&self, email: &Email) -> DomainResult<Option<User>>;
}

/// Persists a new account. Implementations report a duplicate email as
/// `DomainError::Conflict`.
#[async_trait]
pub trait UserCreator: Send + Sync {
    async fn add_user(&self, new_user: NewUser) -> DomainResult<()>;
}
