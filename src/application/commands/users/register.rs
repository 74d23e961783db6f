use std::{fmt, sync::Arc};

use crate::{
    application::{
        dto::ApiSuccessResponse,
        error::{ApplicationError, ApplicationResult, SerializedError},
        ports::{
            logger::{LogMessage, Logger},
            schema::SchemaParser,
            security::PasswordHasher,
            time::Clock,
        },
    },
    domain::{
        errors::DomainError,
        user::{Email, EmailAvailability, NewUser, PersonName, UserCreator},
    },
};

pub const REGISTRATION_SUCCESS: &str = "Successful registration";
pub const EMAIL_TAKEN: &str = "Email is already taken";

#[derive(Clone)]
pub struct RegisterUserCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Output of the registration schema: every field already normalised.
#[derive(Clone)]
pub struct RegistrationParams {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password: String,
}

impl fmt::Debug for RegistrationParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationParams")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub type RegistrationSchema = dyn SchemaParser<RegisterUserCommand, RegistrationParams>;

pub struct RegisterUserDependencies {
    pub parse_params: Arc<RegistrationSchema>,
    pub email_availability: Arc<dyn EmailAvailability>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub user_creator: Arc<dyn UserCreator>,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<dyn Logger>,
}

pub struct RegisterUserUseCase {
    parse_params: Arc<RegistrationSchema>,
    email_availability: Arc<dyn EmailAvailability>,
    password_hasher: Arc<dyn PasswordHasher>,
    user_creator: Arc<dyn UserCreator>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Logger>,
}

impl RegisterUserUseCase {
    pub fn new(deps: RegisterUserDependencies) -> Self {
        Self {
            parse_params: deps.parse_params,
            email_availability: deps.email_availability,
            password_hasher: deps.password_hasher,
            user_creator: deps.user_creator,
            clock: deps.clock,
            logger: deps.logger,
        }
    }

    pub async fn execute(
        &self,
        command: RegisterUserCommand,
    ) -> ApplicationResult<ApiSuccessResponse<()>> {
        let params = self
            .parse_params
            .parse(&command)
            .map_err(|errors| {
                self.logger
                    .log_and_return_error(ApplicationError::validation(errors))
            })?;

        self.ensure_email_available(&params.email).await?;

        let password_hash = self.password_hasher.hash(&params.password).await?;

        let RegistrationParams {
            first_name,
            last_name,
            email,
            ..
        } = params;
        let new_user = NewUser::new(
            first_name,
            last_name,
            email.clone(),
            password_hash,
            self.clock.now(),
        );

        match self.user_creator.add_user(new_user).await {
            Ok(()) => {}
            Err(DomainError::Conflict(_)) => {
                return Err(self.logger.log_and_return_error(email_taken_error(&email)));
            }
            Err(other) => return Err(other.into()),
        }

        Ok(self.logger.log_and_return_data(
            LogMessage::new(REGISTRATION_SUCCESS).with_extra(email.as_str()),
            None,
        ))
    }

    async fn ensure_email_available(&self, email: &Email) -> ApplicationResult<()> {
        if self.email_availability.is_email_taken(email).await? {
            return Err(self.logger.log_and_return_error(email_taken_error(email)));
        }

        Ok(())
    }
}

fn email_taken_error(email: &Email) -> ApplicationError {
    ApplicationError::bad_request(vec![
        SerializedError::for_field("email", EMAIL_TAKEN),
        SerializedError::logs_only(format!("Email is already registered: {email}")),
    ])
}
