// tests/support/mocks/users.rs
use super::CallLog;
use async_trait::async_trait;
use dental_auth::domain::{
    errors::{DomainError, DomainResult},
    user::{Email, EmailAvailability, NewUser, User, UserByEmail, UserCreator},
};
use std::sync::Mutex;

/// Scripted user store. Records `is_email_taken`, `get_user_by_email` and
/// `add_user` calls into the shared log.
pub struct MockUserStore {
    calls: CallLog,
    email_taken: bool,
    existing: Option<User>,
    conflict_on_add: bool,
    added: Mutex<Vec<NewUser>>,
}

impl MockUserStore {
    pub fn new(calls: CallLog) -> Self {
        Self {
            calls,
            email_taken: false,
            existing: None,
            conflict_on_add: false,
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn with_email_taken(mut self) -> Self {
        self.email_taken = true;
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.existing = Some(user);
        self
    }

    /// Pre-check passes but the insert loses a uniqueness race.
    pub fn with_conflict_on_add(mut self) -> Self {
        self.conflict_on_add = true;
        self
    }

    pub fn added(&self) -> Vec<NewUser> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailAvailability for MockUserStore {
    async fn is_email_taken(&self, _email: &Email) -> DomainResult<bool> {
        self.calls.record("is_email_taken");
        Ok(self.email_taken)
    }
}

#[async_trait]
impl UserByEmail for MockUserStore {
    async fn get_user_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        self.calls.record("get_user_by_email");
        Ok(self.existing.clone().filter(|user| &user.email == email))
    }
}

#[async_trait]
impl UserCreator for MockUserStore {
    async fn add_user(&self, new_user: NewUser) -> DomainResult<()> {
        self.calls.record("add_user");
        if self.conflict_on_add {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        self.added.lock().unwrap().push(new_user);
        Ok(())
    }
}
