use std::sync::Arc;

use crate::{
    application::{
        dto::{ApiSuccessResponse, AuthTokens},
        error::{ApplicationError, ApplicationResult, SerializedError},
        ports::{
            logger::{LogMessage, Logger},
            security::{PasswordComparer, TokenGenerator},
        },
    },
    domain::{
        token::TokenSaver,
        user::{Email, User, UserByEmail},
    },
};

pub const LOGIN_SUCCESS: &str = "Successful login";
pub const INVALID_CREDENTIALS: &str = "email and/or password is incorrect";

#[derive(Clone)]
pub struct LoginUserCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginUserDependencies {
    pub user_by_email: Arc<dyn UserByEmail>,
    pub password_comparer: Arc<dyn PasswordComparer>,
    pub access_token_generator: Arc<dyn TokenGenerator>,
    pub refresh_token_generator: Arc<dyn TokenGenerator>,
    pub token_saver: Arc<dyn TokenSaver>,
    pub logger: Arc<dyn Logger>,
}

pub struct LoginUserUseCase {
    user_by_email: Arc<dyn UserByEmail>,
    password_comparer: Arc<dyn PasswordComparer>,
    access_token_generator: Arc<dyn TokenGenerator>,
    refresh_token_generator: Arc<dyn TokenGenerator>,
    token_saver: Arc<dyn TokenSaver>,
    logger: Arc<dyn Logger>,
}

impl LoginUserUseCase {
    pub fn new(deps: LoginUserDependencies) -> Self {
        Self {
            user_by_email: deps.user_by_email,
            password_comparer: deps.password_comparer,
            access_token_generator: deps.access_token_generator,
            refresh_token_generator: deps.refresh_token_generator,
            token_saver: deps.token_saver,
            logger: deps.logger,
        }
    }

    pub async fn execute(
        &self,
        command: LoginUserCommand,
    ) -> ApplicationResult<ApiSuccessResponse<AuthTokens>> {
        let user = self
            .find_and_authenticate_user(&command.email, &command.password)
            .await?;

        let access_token = self.access_token_generator.generate(user.id).await?;
        let refresh_token = self.refresh_token_generator.generate(user.id).await?;
        let refresh_token = self.token_saver.save_token(refresh_token).await?;

        Ok(self.logger.log_and_return_data(
            LogMessage::new(LOGIN_SUCCESS).with_extra(user.email.as_str()),
            Some(AuthTokens {
                access_token,
                refresh_token,
            }),
        ))
    }

    async fn find_and_authenticate_user(
        &self,
        raw_email: &str,
        password: &str,
    ) -> ApplicationResult<User> {
        // A malformed address cannot belong to anyone; treat it as unknown.
        let user = match Email::new(raw_email) {
            Ok(email) => self.user_by_email.get_user_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            return Err(self
                .logger
                .log_and_return_error(invalid_credentials(format!(
                    "user does not exist: {raw_email}"
                ))));
        };

        if !self
            .password_comparer
            .compare(password, &user.password_hash)
            .await?
        {
            return Err(self
                .logger
                .log_and_return_error(invalid_credentials(format!(
                    "wrong password for: {}",
                    user.email
                ))));
        }

        Ok(user)
    }
}

/// Unknown email and wrong password share one caller-facing message; only
/// the log-only detail tells them apart.
fn invalid_credentials(log_detail: String) -> ApplicationError {
    ApplicationError::bad_request(vec![
        SerializedError::new(INVALID_CREDENTIALS),
        SerializedError::logs_only(log_detail),
    ])
}
