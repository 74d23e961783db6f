// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::users::{LoginUserCommand, RefreshAuthTokensCommand, RegisterUserCommand},
    dto::{ApiSuccessResponse, AuthTokens},
    error::{ApplicationError, SerializedError},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use serde::Deserialize;

// Missing fields deserialize as empty strings so they are reported by the
// use case's own validation rather than by the JSON extractor.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshTokensRequest {
    pub token: String,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> HttpResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        HttpError::from_error(ApplicationError::bad_request(vec![SerializedError::new(
            rejection.body_text(),
        )]))
    })
}

pub async fn register(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<ApiSuccessResponse<()>>)> {
    let payload = json_body(payload)?;
    let command = RegisterUserCommand {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        password: payload.password,
        confirm_password: payload.confirm_password,
    };

    state
        .services
        .register
        .execute(command)
        .await
        .into_http()
        .map(|envelope| (StatusCode::CREATED, Json(envelope)))
}

pub async fn login(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> HttpResult<Json<ApiSuccessResponse<AuthTokens>>> {
    let payload = json_body(payload)?;
    let command = LoginUserCommand {
        email: payload.email,
        password: payload.password,
    };

    state
        .services
        .login
        .execute(command)
        .await
        .into_http()
        .map(Json)
}

pub async fn refresh_tokens(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<RefreshTokensRequest>, JsonRejection>,
) -> HttpResult<Json<ApiSuccessResponse<AuthTokens>>> {
    let payload = json_body(payload)?;
    let command = RefreshAuthTokensCommand {
        token: payload.token,
    };

    state
        .services
        .refresh
        .execute(command)
        .await
        .into_http()
        .map(Json)
}
