use crate::domain::{
    errors::{DomainError, DomainResult},
    user::{Email, EmailAvailability, NewUser, User, UserByEmail, UserCreator, UserId},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// Process-local user store keyed by normalised email.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> DomainResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, HashMap<String, User>>> {
        self.users
            .lock()
            .map_err(|_| DomainError::Persistence("user store lock poisoned".into()))
    }
}

#[async_trait]
impl EmailAvailability for InMemoryUserStore {
    async fn is_email_taken(&self, email: &Email) -> DomainResult<bool> {
        Ok(self.lock()?.contains_key(email.as_str()))
    }
}

#[async_trait]
impl UserByEmail for InMemoryUserStore {
    async fn get_user_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self.lock()?.get(email.as_str()).cloned())
    }
}

#[async_trait]
impl UserCreator for InMemoryUserStore {
    async fn add_user(&self, new_user: NewUser) -> DomainResult<()> {
        let mut users = self.lock()?;
        let key = new_user.email.as_str().to_owned();
        if users.contains_key(&key) {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        users.insert(key, new_user.into_user(UserId::generate()));
        Ok(())
    }
}
