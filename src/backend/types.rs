//! Request and response bodies of the EduScan API.

use serde::{Deserialize, Serialize};

/// Minimum password length accepted by the reset endpoint.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Both fields must be non-blank.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("Email cannot be empty");
        }
        if self.password.trim().is_empty() {
            return Err("Password cannot be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: i64,
    pub email: String,
    #[serde(alias = "hoTen")]
    pub name: String,
    #[serde(alias = "vaiTro")]
    pub role: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPasswordRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl NewPasswordRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.token.trim().is_empty() {
            return Err("Reset link is invalid");
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err("Password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        Ok(())
    }
}

/// Generic `{ success, message, data }` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_backend_field_names() {
        let json = r#"{
            "access_token": "abc",
            "token_type": "bearer",
            "expires_in": 1800,
            "user_id": 1,
            "email": "admin@eduscan.vn",
            "hoTen": "Quan Tri",
            "vaiTro": "admin"
        }"#;
        let login: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(login.name, "Quan Tri");
        assert_eq!(login.role, "admin");
        assert_eq!(login.expires_in, 1800);
    }

    #[test]
    fn test_login_request_accepts_username_alias() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username": "a@b.vn", "password": "x"}"#).unwrap();
        assert_eq!(request.email, "a@b.vn");
    }

    #[test]
    fn test_login_request_validation() {
        let mut request = LoginRequest {
            email: " ".to_string(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
        request.email = "a@b.vn".to_string();
        assert!(request.validate().is_ok());
        request.password = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_password_validation() {
        let mut request = NewPasswordRequest {
            token: "tok".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
        };
        assert_eq!(
            request.validate(),
            Err("Password must be at least 8 characters")
        );

        request.password = "long enough".to_string();
        assert_eq!(request.validate(), Err("Passwords do not match"));

        request.confirm_password = "long enough".to_string();
        assert_eq!(request.validate(), Ok(()));
    }
}
