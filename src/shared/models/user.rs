use argon2::{
    password_hash::{rand_core::OsRng, Error as PasswordHashError, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user_get_response::UserGetResponse;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a new account, hashing `password` with argon2.
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, PasswordHashError> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: User::normalize_email(email),
            password_hash: User::get_hashed_password(password.as_bytes())?,
            created_at: Utc::now(),
        })
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let parsed_hash = match PasswordHash::new(&self.password_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    pub fn to_get_dto(&self) -> UserGetResponse {
        UserGetResponse {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }

    /// Emails are unique per account and compared case-insensitively.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn get_hashed_password(password_bytes: &[u8]) -> Result<String, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        Ok(argon2.hash_password(password_bytes, &salt)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let user = User::new("Ada", "Ada@Example.com ", "correct horse").unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert!(user.verify_password("correct horse"));
        assert!(!user.verify_password("wrong horse"));
    }

    #[test]
    fn dto_never_carries_the_hash() {
        let user = User::new("Ada", "ada@example.com", "secret").unwrap();
        let json = serde_json::to_value(user.to_get_dto()).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["name"], "Ada");
    }
}
