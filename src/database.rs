//! # Redis
//!
//! User store backing signup and login.
//!
//! ## Layout
//!
//! - One hash at [`USERS_KEY`]: field = lowercased email, value = the
//!   JSON-encoded [`User`] record
//! - Existence check and insert are a single atomic `HSETNX`, so two
//!   concurrent signups for the same email cannot both succeed

use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::{error::AppError, user::User};

pub const USERS_KEY: &str = "users";

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new().set_number_of_retries(1);

    let client = Client::open(redis_url).unwrap();

    client
        .get_connection_manager_with_config(config)
        .await
        .unwrap()
}

/// Inserts the user keyed by email. Returns `false` when the email is
/// already taken, without touching the existing record.
pub async fn insert_user(
    connection: &mut ConnectionManager,
    user: &User,
) -> Result<bool, AppError> {
    let payload = serde_json::to_string(user)?;
    let created: bool = connection.hset_nx(USERS_KEY, &user.email, payload).await?;

    Ok(created)
}

pub async fn fetch_user(
    connection: &mut ConnectionManager,
    email: &str,
) -> Result<Option<User>, AppError> {
    let payload: Option<String> = connection.hget(USERS_KEY, email).await?;

    match payload {
        Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
        None => Ok(None),
    }
}
