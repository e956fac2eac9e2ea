//! Registration and login endpoints.
//!
//! ```text
//! POST /auth/signup {"username":"ada","email":"ada@acme.io","password":"..."}
//! POST /auth/login  {"email":"ada@acme.io","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginPayload, SignupPayload, UserProfile};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Signup request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<SignupRequest> for SignupPayload {
    fn from(request: SignupRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

/// Signup response: the created user without any credential material.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Login request body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginPayload {
    fn from(request: LoginRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Login response carrying the bearer token.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Missing fields", body = ApiError),
        (status = 409, description = "Email or username taken", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .auth
        .signup(payload.into_inner().into())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "user created".to_owned(),
        user,
    }))
}

/// Authenticate and obtain a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing fields", body = ApiError),
        (status = 401, description = "Invalid credentials", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let token = state
        .auth
        .login(payload.into_inner().into())
        .await
        .map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "login successful".to_owned(),
        token,
    }))
}
