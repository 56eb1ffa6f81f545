//! Registration, login and logout commands
use serde::{Deserialize, Serialize};

use mindsync_core::{RegistrationForm, UserProfile, View};

use super::CommandResult;
use crate::state::AppState;

/// Where to go next, and who is logged in once there
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub redirect: String,
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    fn new(view: View, user: Option<UserProfile>) -> Self {
        Self {
            redirect: view.path().to_string(),
            user,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<RegisterRequest> for RegistrationForm {
    fn from(req: RegisterRequest) -> Self {
        RegistrationForm::new(req.name, req.email, req.password, req.confirm_password)
    }
}

pub fn register(state: &AppState, request: RegisterRequest) -> CommandResult<AuthResponse> {
    let form = RegistrationForm::from(request);
    CommandResult::from_result(state.with_app(|app| {
        let nav = app.register(&form)?;
        Ok(AuthResponse::new(nav.redirect, None))
    }))
}

pub fn login(state: &AppState, email: String, password: String) -> CommandResult<AuthResponse> {
    match state.with_app(|app| app.login(&email, &password)) {
        Ok(nav) => {
            let user = nav.data.session.profile();
            state.set_token(Some(nav.data.token));
            CommandResult::ok(AuthResponse::new(nav.redirect, Some(user)))
        }
        Err(e) => CommandResult::from_error(&e),
    }
}

pub fn logout(state: &AppState) -> CommandResult<AuthResponse> {
    state.set_token(None);
    CommandResult::from_result(state.with_app(|app| {
        let nav = app.logout()?;
        Ok(AuthResponse::new(nav.redirect, None))
    }))
}

/// Logged in only if the held token belongs to the active session
pub fn session_status(state: &AppState) -> CommandResult<SessionStatus> {
    let user = state
        .token()
        .and_then(|token| state.app().validate_token(&token));

    CommandResult::ok(SessionStatus {
        authenticated: user.is_some(),
        user,
    })
}

/// Navigate to `view`, bouncing to login unless the held token belongs to
/// the active session
pub fn open_view(state: &AppState, view: View) -> CommandResult<AuthResponse> {
    let app = state.app();
    let token = state.token();
    let shown = app.guard(view, token.as_deref());
    let user = token.and_then(|t| app.validate_token(&t));
    CommandResult::ok(AuthResponse::new(shown, user))
}

pub fn list_users(state: &AppState) -> CommandResult<Vec<UserProfile>> {
    CommandResult::from_result(state.with_app(|app| app.list_users()))
}

/// Look up one registered user by exact email
pub fn find_user(state: &AppState, email: String) -> CommandResult<Option<UserProfile>> {
    CommandResult::from_result(state.with_app(|app| app.find_user(&email)))
}
