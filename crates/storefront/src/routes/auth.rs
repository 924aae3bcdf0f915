//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request body for POST /auth/login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Response for a successful login or registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
    /// Where the client should land next, based on the user's role.
    pub redirect: &'static str,
}

impl AuthResponse {
    fn new(user: CurrentUser) -> Self {
        let redirect = user.role.home_path();
        Self { user, redirect }
    }
}

/// POST /auth/login
///
/// The session is only written once the attempt has survived the mock
/// delay; a superseded attempt leaves the session untouched.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<AuthResponse>> {
    if form.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_owned()));
    }

    let user = AuthService::new(&state).login(&form.email).await?;
    set_current_user(&session, &user).await?;

    Ok(Json(AuthResponse::new(user)))
}

/// Request body for POST /auth/register.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /auth/register
#[instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = AuthService::new(&state)
        .register(&form.name, &form.email, &form.password)
        .await?;
    set_current_user(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::new(user))))
}

/// Response for POST /auth/logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub redirect: &'static str,
}

/// POST /auth/logout
///
/// Clears the user but keeps the cart, so a shopper who logs out does not
/// lose what they had picked.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>> {
    clear_current_user(&session).await?;
    Ok(Json(LogoutResponse { redirect: "/" }))
}
