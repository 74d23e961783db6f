// src/application/commands/users.rs
mod login;
mod refresh;
mod register;

pub use login::{
    INVALID_CREDENTIALS, LOGIN_SUCCESS, LoginUserCommand, LoginUserDependencies, LoginUserUseCase,
};
pub use refresh::{
    REFRESH_SUCCESS, RefreshAuthTokensCommand, RefreshAuthTokensDependencies,
    RefreshAuthTokensUseCase,
};
pub use register::{
    EMAIL_TAKEN, REGISTRATION_SUCCESS, RegisterUserCommand, RegisterUserDependencies,
    RegisterUserUseCase, RegistrationParams, RegistrationSchema,
};
