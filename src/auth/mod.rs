pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::{AuthMiddleware, MSG_INVALID_TOKEN, MSG_NO_AUTH_HEADER};
pub use password::PasswordVault;
pub use token::{Claims, SessionAuth, MSG_TOKEN_EXPIRED, MSG_TOKEN_MALFORMED};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password. No format constraints at login; a wrong shape is
    /// just a wrong password.
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account.
    #[validate(length(min = 1))]
    pub name: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response body after a successful login: the signed session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "jhon@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "jhonexample.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        // Login applies no password length rule; a short candidate is simply
        // compared and fails.
        let short_password_login = LoginRequest {
            email: "jhon@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_ok());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Jhon Doe".to_string(),
            email: "jhon@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let empty_name_register = RegisterRequest {
            name: "".to_string(),
            email: "jhon@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(empty_name_register.validate().is_err());

        let invalid_email_register = RegisterRequest {
            name: "Jhon Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "123456".to_string(),
        };
        assert!(invalid_email_register.validate().is_err());

        let short_password_register = RegisterRequest {
            name: "Jhon Doe".to_string(),
            email: "jhon@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password_register.validate().is_err());
    }
}
