use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user record. Emails are lowercased before storage so lookups are
/// case-insensitive; `password` holds the bcrypt hash, never the plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_on: DateTime<Utc>,
}

impl User {
    pub fn new(full_name: String, username: String, email: String, password_hash: String) -> Self {
        Self {
            full_name,
            username,
            email: email.to_lowercase(),
            password: password_hash,
            created_on: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_lowercased_on_construction() {
        let user = User::new(
            "John Doe".to_string(),
            "johndoe".to_string(),
            "John@Example.COM".to_string(),
            "$2b$12$hash".to_string(),
        );

        assert_eq!(user.email, "john@example.com");
    }
}
