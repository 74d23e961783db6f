use std::sync::Arc;

use crate::{
    application::{
        dto::{ApiSuccessResponse, AuthTokens},
        error::{ApplicationError, ApplicationResult, SerializedError},
        ports::{
            logger::{LogMessage, Logger},
            security::{TokenGenerator, TokenVerifier},
        },
    },
    domain::token::{TokenByUserId, TokenEntity, TokenRemover, TokenSaver},
};

pub const REFRESH_SUCCESS: &str = "Successful refresh auth tokens";

#[derive(Clone)]
pub struct RefreshAuthTokensCommand {
    pub token: String,
}

pub struct RefreshAuthTokensDependencies {
    pub verifier: Arc<dyn TokenVerifier>,
    pub token_by_user_id: Arc<dyn TokenByUserId>,
    pub token_remover: Arc<dyn TokenRemover>,
    pub refresh_token_generator: Arc<dyn TokenGenerator>,
    pub access_token_generator: Arc<dyn TokenGenerator>,
    pub token_saver: Arc<dyn TokenSaver>,
    pub logger: Arc<dyn Logger>,
}

pub struct RefreshAuthTokensUseCase {
    verifier: Arc<dyn TokenVerifier>,
    token_by_user_id: Arc<dyn TokenByUserId>,
    token_remover: Arc<dyn TokenRemover>,
    refresh_token_generator: Arc<dyn TokenGenerator>,
    access_token_generator: Arc<dyn TokenGenerator>,
    token_saver: Arc<dyn TokenSaver>,
    logger: Arc<dyn Logger>,
}

impl RefreshAuthTokensUseCase {
    pub fn new(deps: RefreshAuthTokensDependencies) -> Self {
        Self {
            verifier: deps.verifier,
            token_by_user_id: deps.token_by_user_id,
            token_remover: deps.token_remover,
            refresh_token_generator: deps.refresh_token_generator,
            access_token_generator: deps.access_token_generator,
            token_saver: deps.token_saver,
            logger: deps.logger,
        }
    }

    pub async fn execute(
        &self,
        command: RefreshAuthTokensCommand,
    ) -> ApplicationResult<ApiSuccessResponse<AuthTokens>> {
        let stored = self.find_stored_token(&command.token).await?;

        // Delete before issuing: a failure after this point forces a fresh
        // login but never leaves two live refresh tokens for the user.
        self.token_remover
            .delete_token_by_user_id(stored.user_id, &stored.token)
            .await?;

        let refresh_token = self
            .refresh_token_generator
            .generate(stored.user_id)
            .await?;
        let access_token = self.access_token_generator.generate(stored.user_id).await?;
        let refresh_token = self.token_saver.save_token(refresh_token).await?;

        Ok(self.logger.log_and_return_data(
            LogMessage::new(REFRESH_SUCCESS).with_extra(stored.user_id.to_string()),
            Some(AuthTokens {
                access_token,
                refresh_token,
            }),
        ))
    }

    async fn find_stored_token(&self, token: &str) -> ApplicationResult<TokenEntity> {
        let Some(decoded) = self.verifier.verify(token).await? else {
            return Err(self.logger.log_and_return_error(unauthorized("invalid token")));
        };

        match self
            .token_by_user_id
            .get_token_by_user_id(decoded.user_id, token)
            .await?
        {
            Some(stored) => Ok(stored),
            None => Err(self
                .logger
                .log_and_return_error(unauthorized("token not found"))),
        }
    }
}

fn unauthorized(log_detail: &str) -> ApplicationError {
    ApplicationError::unauthorized(vec![SerializedError::logs_only(log_detail)])
}
