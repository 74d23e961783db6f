// tests/support/builders.rs
use super::mocks::{fixed_now, security::HASH_PREFIX};
use dental_auth::application::commands::users::{LoginUserCommand, RegisterUserCommand};
use dental_auth::domain::user::{Email, NewUser, PasswordHash, PersonName, User, UserId};

pub const VALID_PASSWORD: &str = "Secret#123";

pub struct UserBuilder {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            id: UserId::generate(),
            first_name: "Henly Jade".into(),
            last_name: "Casayas".into(),
            email: "henly@example.com".into(),
            password: VALID_PASSWORD.into(),
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Stored hash follows the `MockPasswordHasher` scheme.
    pub fn build(self) -> User {
        NewUser::new(
            PersonName::new(self.first_name).unwrap(),
            PersonName::new(self.last_name).unwrap(),
            Email::new(self.email).unwrap(),
            PasswordHash::new(format!("{HASH_PREFIX}{}", self.password)).unwrap(),
            fixed_now(),
        )
        .into_user(self.id)
    }
}

pub fn register_command() -> RegisterUserCommand {
    RegisterUserCommand {
        first_name: "Henly Jade".into(),
        last_name: "Casayas".into(),
        email: "henly@example.com".into(),
        password: VALID_PASSWORD.into(),
        confirm_password: VALID_PASSWORD.into(),
    }
}

pub fn login_command(email: &str, password: &str) -> LoginUserCommand {
    LoginUserCommand {
        email: email.into(),
        password: password.into(),
    }
}
