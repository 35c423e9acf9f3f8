//! Users API handlers.
//!
//! ```text
//! POST  /api/v1/users      {"email":"ada@example.com","name":"Ada","password":"analytical"}
//! POST  /api/v1/login      {"email":"ada@example.com","password":"analytical"}
//! POST  /api/v1/logout
//! GET   /api/v1/users/me
//! PUT   /api/v1/users/me   {"email":"ada@example.com","name":"Ada L."}
//! PATCH /api/v1/users/me   {"password":"new-secret"}
//! ```

use actix_web::{HttpResponse, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, ProfileUpdate, User, UserRegistration,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, NAME, PASSWORD, parse_email, parse_name, parse_optional, parse_password, require,
};

/// Registration request body for `POST /api/v1/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    /// Login email; the domain part is lowercased.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// At least eight characters.
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for UserRegistration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let email = require(value.email, EMAIL)?;
        let name = require(value.name, NAME)?;
        let password = require(value.password, PASSWORD)?;
        Ok(Self {
            email: parse_email(&email)?,
            name: parse_name(&name, NAME)?,
            password: parse_password(&password)?,
        })
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    /// Registered email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => {
            Error::invalid_field(EMAIL.as_str(), "empty_email", err.to_string())
        }
        LoginValidationError::EmptyPassword => {
            Error::invalid_field(PASSWORD.as_str(), "empty_password", err.to_string())
        }
    }
}

/// Profile changes for `PUT` and `PATCH /api/v1/users/me`.
///
/// `PUT` requires `email` and `name`; `PATCH` treats every field as optional.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRequest {
    /// Replacement login email.
    pub email: Option<String>,
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement password.
    pub password: Option<String>,
}

impl ProfileRequest {
    fn into_update(self) -> Result<ProfileUpdate, Error> {
        Ok(ProfileUpdate {
            email: parse_optional(self.email.as_deref(), parse_email)?,
            name: parse_optional(self.name.as_deref(), |raw| parse_name(raw, NAME))?,
            password: parse_optional(self.password.as_deref(), parse_password)?,
        })
    }

    fn into_replacement(self) -> Result<ProfileUpdate, Error> {
        let email = require(self.email, EMAIL)?;
        let name = require(self.name, NAME)?;
        Self {
            email: Some(email),
            name: Some(name),
            password: self.password,
        }
        .into_update()
    }
}

/// Public view of an account. Never includes password material.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Normalised login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Whether the account may use administrative tooling.
    pub is_staff: bool,
    /// Whether the account holds every permission.
    pub is_superuser: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let flags = user.flags();
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            name: user.name().to_string(),
            is_active: flags.is_active,
            is_staff: flags.is_staff,
            is_superuser: flags.is_superuser,
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = UserRegistration::try_from(payload.into_inner())?;
    let user = state.accounts.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate user and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.current_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Replace the signed-in account's email and name, optionally its password.
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceCurrentUser"
)]
#[put("/users/me")]
pub async fn replace_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let update = payload.into_inner().into_replacement()?;
    let user = state.accounts.update_profile(&user_id, update).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Change only the supplied profile fields.
#[utoipa::path(
    patch,
    path = "/api/v1/users/me",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "patchCurrentUser"
)]
#[patch("/users/me")]
pub async fn patch_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let update = payload.into_inner().into_update()?;
    let user = state.accounts.update_profile(&user_id, update).await?;
    Ok(web::Json(UserResponse::from(&user)))
}
