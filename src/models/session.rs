//! Session, login and password-change models

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Role flag stored at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Usuario,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Usuario => "usuario",
            Role::Other(raw) => raw,
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        match raw {
            "admin" => Role::Admin,
            "usuario" => Role::Usuario,
            other => Role::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Login form
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub const MIN_PASSWORD_LEN: usize = 6;

    pub fn check(&self) -> AppResult<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::Validation(
                "El nombre de usuario es obligatorio.".to_string(),
            ));
        }
        if self.password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(AppError::Validation(
                "La contraseña debe tener al menos 6 caracteres.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Successful login answer of the auth service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub id_token: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub role: String,
}

static PASSWORD_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("valid password regex"));

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// At least 8 characters from `[A-Za-z0-9@$!%*?&]` with an uppercase
/// letter, a digit and one of `@$!%*?&`.
pub fn is_strong_password(candidate: &str) -> bool {
    PASSWORD_CHARSET.is_match(candidate)
        && candidate.chars().any(|c| c.is_ascii_uppercase())
        && candidate.chars().any(|c| c.is_ascii_digit())
        && candidate.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Password change form (first login with a temporary password)
#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub username: String,
    pub temporary_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Wire body of the password change request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePasswordRequest {
    pub username: String,
    pub temporary_password: String,
    pub new_password: String,
}

impl ChangePasswordForm {
    pub fn check(&self) -> AppResult<()> {
        let fields = [
            &self.username,
            &self.temporary_password,
            &self.new_password,
            &self.confirm_new_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AppError::Validation(
                "Todos los campos son obligatorios.".to_string(),
            ));
        }
        if self.username.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(
                "El nombre de usuario no debe contener espacios.".to_string(),
            ));
        }
        if !is_strong_password(&self.new_password) {
            return Err(AppError::Validation(
                "La nueva contraseña debe tener al menos 8 caracteres, incluyendo una mayúscula, un número y un carácter especial.".to_string(),
            ));
        }
        if self.new_password != self.confirm_new_password {
            return Err(AppError::Validation(
                "Las nuevas contraseñas no coinciden.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            username: self.username.clone(),
            temporary_password: self.temporary_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}
