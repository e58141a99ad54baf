use std::sync::Arc;

use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use bcrypt::{DEFAULT_COST, hash, verify};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task::spawn_blocking;
use tracing::info;

use crate::{
    database::{fetch_user, insert_user},
    error::AppError,
    search::{MatchResult, predict},
    state::AppState,
    user::User,
};

#[derive(Deserialize)]
pub struct PredictRequest {
    description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    results: Vec<MatchResult>,
    error: Option<String>,
    user_input: String,
    #[serde(rename = "selectedHTSNumber")]
    selected_hts_number: String,
    description: String,
}

pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    let input_text = payload
        .description
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    // An empty query would match the entire catalog, so it is rejected here
    // rather than inside `predict`.
    if input_text.is_empty() {
        return Err(AppError::EmptyInput);
    }

    let results = predict(&state.catalog, &input_text);

    let selected_hts_number = results
        .first()
        .map(|result| result.tariff_code.clone())
        .unwrap_or_default();
    let description = results
        .first()
        .map(|result| result.description.clone())
        .unwrap_or_default();

    let error = if results.is_empty() {
        Some("No matching results found.".to_string())
    } else {
        None
    };

    Ok(Json(PredictResponse {
        results,
        error,
        user_input: input_text,
        selected_hts_number,
        description,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.full_name.is_empty()
        || payload.username.is_empty()
        || payload.email.is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::MissingFields);
    }

    let password = payload.password;
    let hashed = spawn_blocking(move || hash(password, DEFAULT_COST)).await??;

    let user = User::new(payload.full_name, payload.username, payload.email, hashed);

    let mut connection = state.redis_connection.clone();
    if !insert_user(&mut connection, &user).await? {
        return Err(AppError::UserExists);
    }

    info!("Created user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully." })),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    full_name: String,
    username: String,
    email: String,
    message: String,
    redirect_url: String,
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::MissingFields);
    }

    let mut connection = state.redis_connection.clone();
    let user = fetch_user(&mut connection, &payload.email.to_lowercase())
        .await?
        .ok_or(AppError::UserNotFound)?;

    let password = payload.password;
    let stored_hash = user.password.clone();
    let valid = spawn_blocking(move || verify(password, &stored_hash)).await??;

    if !valid {
        return Err(AppError::IncorrectPassword);
    }

    Ok(Json(LoginResponse {
        full_name: user.full_name,
        username: user.username,
        email: user.email,
        message: "Login successful.".to_string(),
        redirect_url: "/".to_string(),
    }))
}
