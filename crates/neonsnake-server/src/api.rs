use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use neonsnake_core::BoundaryMode;

use crate::accounts::{SignupError, User};
use crate::auth;
use crate::error::AppError;
use crate::leaderboard::LeaderboardEntry;
use crate::spectate::LiveGameSummary;
use crate::state::AppState;

/// Request body for account creation.
#[derive(Debug, Deserialize)]
pub struct SignupBody {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Response for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Request body for a score submission.
#[derive(Debug, Deserialize)]
pub struct SubmitScoreBody {
    pub score: u32,
    pub mode: BoundaryMode,
}

/// Response for a score submission.
#[derive(Debug, Serialize)]
pub struct SubmitScoreResponse {
    pub rank: usize,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub mode: Option<BoundaryMode>,
}

/// Sanity cap well above anything the simulation can produce, to keep junk
/// out of the mock table.
const MAX_SUBMITTED_SCORE: u32 = 1_000_000;

/// Validate signup field shapes to prevent abuse.
fn validate_signup_fields(body: &SignupBody) -> Result<(), AppError> {
    if body.username.len() < 3 || body.username.len() > 32 {
        return Err(AppError::BadRequest(
            "username must be 3-32 chars".to_string(),
        ));
    }
    if body.email.len() > 128 || !body.email.contains('@') {
        return Err(AppError::BadRequest("invalid email".to_string()));
    }
    if body.password.len() < 6 || body.password.len() > 128 {
        return Err(AppError::BadRequest(
            "password must be 6-128 chars".to_string(),
        ));
    }
    Ok(())
}

/// Resolve the caller from the Authorization header: signature check first,
/// then session lookup.
async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(String, User), AppError> {
    let token = auth::bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;
    let session_id = auth::verify_token(&state.auth.session_secret, token)
        .ok_or_else(|| AppError::Unauthorized("Invalid session token".to_string()))?;
    let accounts = state.accounts.read().await;
    let user = accounts
        .user_for_session(&session_id)
        .ok_or_else(|| AppError::Unauthorized("Session expired".to_string()))?;
    Ok((session_id, user))
}

/// POST /api/v1/auth/signup — create an account and open a session.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_signup_fields(&body)?;

    let mut accounts = state.accounts.write().await;
    let user = accounts
        .signup(&body.username, &body.email, &body.password)
        .map_err(|SignupError::EmailTaken| {
            AppError::Conflict("Email already registered".to_string())
        })?;

    let (token, session_id) = auth::issue_token(&state.auth.session_secret);
    accounts.create_session(&session_id, &user.email);
    tracing::info!(username = %user.username, "Account created");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// POST /api/v1/auth/login — open a session for an existing account.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, AppError> {
    let mut accounts = state.accounts.write().await;
    let user = accounts
        .login(&body.email, &body.password)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let (token, session_id) = auth::issue_token(&state.auth.session_secret);
    accounts.create_session(&session_id, &user.email);

    Ok(Json(AuthResponse { user, token }))
}

/// POST /api/v1/auth/logout — destroy the caller's session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let (session_id, _) = resolve_session(&state, &headers).await?;
    state.accounts.write().await.destroy_session(&session_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me — the caller's account.
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<User>, AppError> {
    let (_, user) = resolve_session(&state, &headers).await?;
    Ok(Json(user))
}

/// GET /api/v1/leaderboard — entries, best first, optionally mode-filtered.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let board = state.leaderboard.read().await;
    Json(board.entries(query.mode))
}

/// POST /api/v1/scores — record a finished game's score, returns its rank.
pub async fn submit_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SubmitScoreBody>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let (_, user) = resolve_session(&state, &headers).await?;

    if body.score > MAX_SUBMITTED_SCORE {
        return Err(AppError::BadRequest("score out of range".to_string()));
    }

    let rank = state
        .leaderboard
        .write()
        .await
        .submit(&user.username, body.score, body.mode);
    tracing::info!(username = %user.username, score = body.score, rank, "Score submitted");

    Ok(Json(SubmitScoreResponse { rank }))
}

/// GET /api/v1/live — currently running spectated games.
pub async fn list_live_games(State(state): State<AppState>) -> Json<Vec<LiveGameSummary>> {
    Json(state.spectate.list())
}
