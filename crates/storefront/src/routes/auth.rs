//! Authentication route handlers.
//!
//! Registration, login, and logout. A successful login stores a
//! `CurrentUser` in the session; the cart already in the session survives
//! both login and logout.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, user::User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// The logged-in user as returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: shopsphere_core::UserId,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_owned(),
        }
    }
}

/// Handle registration.
///
/// Creates the account and logs the new user in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<impl IntoResponse> {
    if form.password != form.password_confirm {
        return Err(AppError::BadRequest("passwords do not match".to_owned()));
    }

    let user = AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await?;

    login_session(&session, &user).await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Handle login.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<UserResponse>> {
    let user = AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await?;

    login_session(&session, &user).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Handle logout.
///
/// Clears the logged-in user but leaves the rest of the session (the cart)
/// alone.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

async fn login_session(session: &Session, user: &User) -> Result<()> {
    // Rotate the session ID on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
        is_staff: user.is_staff,
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(())
}
