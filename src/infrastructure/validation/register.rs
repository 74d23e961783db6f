use crate::application::{
    commands::users::{RegisterUserCommand, RegistrationParams},
    error::SerializedError,
    ports::schema::{ParseOutcome, SchemaParser},
};
use crate::domain::user::{Email, PersonName};

const INVALID_INPUT: &str = "Invalid input";
const INVALID_EMAIL: &str = "Invalid email";
const WEAK_PASSWORD: &str = "Password must have a minimum 8 characters in length, at least one uppercase English letter, at least one lowercase English letter, at least one digit and at least one special character";
const PASSWORD_MISMATCH: &str = "Password does not match";
const PASSWORD_SPECIALS: &str = "#?!@$%^&*-";
const PASSWORD_MIN_CHARS: usize = 8;

/// Validates registration input. Every failing field is reported, one entry
/// per field, in form order.
#[derive(Default, Clone)]
pub struct RegisterParamsSchema;

/// Collects messages per field, keeping first-seen field order.
#[derive(Default)]
struct FieldErrors {
    entries: Vec<(&'static str, Vec<&'static str>)>,
}

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: &'static str) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    fn check<T, E>(
        &mut self,
        field: &'static str,
        message: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                self.add(field, message);
                None
            }
        }
    }

    fn into_serialized(self) -> Vec<SerializedError> {
        self.entries
            .into_iter()
            .map(|(field, messages)| SerializedError::for_field(field, messages.join(", ")))
            .collect()
    }
}

fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_CHARS
        && !password.contains(['\n', '\r'])
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

impl SchemaParser<RegisterUserCommand, RegistrationParams> for RegisterParamsSchema {
    fn parse(&self, input: &RegisterUserCommand) -> ParseOutcome<RegistrationParams> {
        let mut errors = FieldErrors::default();

        let first_name = errors.check(
            "firstName",
            INVALID_INPUT,
            PersonName::new(&input.first_name),
        );
        let last_name =
            errors.check("lastName", INVALID_INPUT, PersonName::new(&input.last_name));
        if !is_strong_password(&input.password) {
            errors.add("password", WEAK_PASSWORD);
        }
        let email = errors.check("email", INVALID_EMAIL, Email::new(&input.email));
        if input.password != input.confirm_password {
            errors.add("confirmPassword", PASSWORD_MISMATCH);
        }

        match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) if errors.entries.is_empty() => {
                Ok(RegistrationParams {
                    first_name,
                    last_name,
                    email,
                    password: input.password.clone(),
                })
            }
            _ => Err(errors.into_serialized()),
        }
    }
}
