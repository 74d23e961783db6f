// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::users::{
            LoginUserDependencies, LoginUserUseCase, RefreshAuthTokensDependencies,
            RefreshAuthTokensUseCase, RegisterUserDependencies, RegisterUserUseCase,
            RegistrationSchema,
        },
        ports::{
            ClockPort, LoggerPort, TokenGeneratorPort, TokenVerifierPort,
            security::{PasswordComparer, PasswordHasher},
        },
    },
    domain::{
        token::{TokenByUserId, TokenRemover, TokenSaver},
        user::{EmailAvailability, UserByEmail, UserCreator},
    },
};

/// The three auth use cases, wired once at startup and shared by handlers.
pub struct ApplicationServices {
    pub register: Arc<RegisterUserUseCase>,
    pub login: Arc<LoginUserUseCase>,
    pub refresh: Arc<RefreshAuthTokensUseCase>,
}

impl ApplicationServices {
    /// `users`, `tokens` and `passwords` are single adapters that fulfil
    /// several ports each; they are split into per-port handles here.
    #[allow(clippy::too_many_arguments)]
    pub fn new<U, T, P>(
        registration_schema: Arc<RegistrationSchema>,
        users: Arc<U>,
        tokens: Arc<T>,
        passwords: Arc<P>,
        access_tokens: Arc<TokenGeneratorPort>,
        refresh_tokens: Arc<TokenGeneratorPort>,
        refresh_verifier: Arc<TokenVerifierPort>,
        clock: Arc<ClockPort>,
        logger: Arc<LoggerPort>,
    ) -> Self
    where
        U: EmailAvailability + UserByEmail + UserCreator + 'static,
        T: TokenSaver + TokenByUserId + TokenRemover + 'static,
        P: PasswordHasher + PasswordComparer + 'static,
    {
        let register = Arc::new(RegisterUserUseCase::new(RegisterUserDependencies {
            parse_params: registration_schema,
            email_availability: Arc::clone(&users) as Arc<dyn EmailAvailability>,
            password_hasher: Arc::clone(&passwords) as Arc<dyn PasswordHasher>,
            user_creator: Arc::clone(&users) as Arc<dyn UserCreator>,
            clock,
            logger: Arc::clone(&logger),
        }));

        let login = Arc::new(LoginUserUseCase::new(LoginUserDependencies {
            user_by_email: users as Arc<dyn UserByEmail>,
            password_comparer: passwords as Arc<dyn PasswordComparer>,
            access_token_generator: Arc::clone(&access_tokens),
            refresh_token_generator: Arc::clone(&refresh_tokens),
            token_saver: Arc::clone(&tokens) as Arc<dyn TokenSaver>,
            logger: Arc::clone(&logger),
        }));

        let refresh = Arc::new(RefreshAuthTokensUseCase::new(
            RefreshAuthTokensDependencies {
                verifier: refresh_verifier,
                token_by_user_id: Arc::clone(&tokens) as Arc<dyn TokenByUserId>,
                token_remover: Arc::clone(&tokens) as Arc<dyn TokenRemover>,
                refresh_token_generator: refresh_tokens,
                access_token_generator: access_tokens,
                token_saver: tokens as Arc<dyn TokenSaver>,
                logger,
            },
        ));

        Self {
            register,
            login,
            refresh,
        }
    }
}
