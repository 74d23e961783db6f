use crate::domain::user::value_objects::{Email, PasswordHash, PersonName, Role, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub roles: HashSet<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password_hash,
            created_at,
        }
    }

    /// Assign an identity; new accounts start without roles.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            roles: HashSet::new(),
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
