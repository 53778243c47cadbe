//! Data models for the users API

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from validated input
    pub fn from_new(id: String, new_user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_user.name,
            email: new_user.email,
            created_at,
        }
    }

    /// The two records every store starts with
    pub fn seed(now: DateTime<Utc>) -> Vec<User> {
        vec![
            User {
                id: "1".to_string(),
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
                created_at: now - Duration::hours(24),
            },
            User {
                id: "2".to_string(),
                name: "Jane Smith".to_string(),
                email: "jane@example.com".to_string(),
                created_at: now - Duration::hours(48),
            },
        ]
    }
}

/// Create user request
///
/// Absent fields decode as empty strings so they are reported by
/// [`CreateUserRequest::validate`] rather than as decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Why a create user request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserValidationError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
}

/// A create user request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl CreateUserRequest {
    /// Validate the request, checking name before email
    pub fn validate(self) -> Result<NewUser, UserValidationError> {
        if self.name.is_empty() {
            return Err(UserValidationError::MissingName);
        }
        if self.email.is_empty() {
            return Err(UserValidationError::MissingEmail);
        }
        Ok(NewUser {
            name: self.name,
            email: self.email,
        })
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,

    /// Server time when the check was answered
    pub time: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(time: DateTime<Utc>) -> Self {
        Self {
            status: "ok".to_string(),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let new_user = request("Ann", "a@x.com").validate().unwrap();
        assert_eq!(new_user.name(), "Ann");
        assert_eq!(new_user.email(), "a@x.com");
    }

    #[test]
    fn test_validate_checks_name_first() {
        assert_eq!(
            request("", "").validate(),
            Err(UserValidationError::MissingName)
        );
        assert_eq!(
            request("Ann", "").validate(),
            Err(UserValidationError::MissingEmail)
        );
    }

    #[test]
    fn test_email_format_is_not_checked() {
        assert!(request("Ann", "not-an-email").validate().is_ok());
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(req.name.is_empty());
        assert_eq!(req.validate(), Err(UserValidationError::MissingName));
    }

    #[test]
    fn test_seed_records() {
        let now = Utc::now();
        let seeded = User::seed(now);
        assert_eq!(seeded.len(), 2);
        assert_eq!(seeded[0].id, "1");
        assert_eq!(seeded[0].name, "John Doe");
        assert_eq!(seeded[0].created_at, now - Duration::hours(24));
        assert_eq!(seeded[1].id, "2");
        assert_eq!(seeded[1].email, "jane@example.com");
        assert_eq!(seeded[1].created_at, now - Duration::hours(48));
    }

    #[test]
    fn test_user_json_shape() {
        let user = User::seed(Utc::now()).remove(0);
        let value = serde_json::to_value(&user).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(object.contains_key("id"));
        assert!(object.contains_key("name"));
        assert!(object.contains_key("email"));
        assert!(object["created_at"].is_string());
    }
}
