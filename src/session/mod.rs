//! Session context, durable storage and role gate

pub mod gate;
pub mod storage;

use crate::error::AppResult;
use crate::models::Role;

pub use gate::{GateState, RoleGate};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Storage key of the identity token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key of the role flag
pub const USER_ROLE_KEY: &str = "userRole";

/// Session flags read once per navigation and handed to every view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    token: Option<String>,
    role: Option<Role>,
}

impl SessionContext {
    pub fn new(token: Option<String>, role: Option<Role>) -> Self {
        Self { token, role }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn read(storage: &dyn SessionStorage) -> AppResult<Self> {
        let token = storage.get(AUTH_TOKEN_KEY)?;
        let role = storage.get(USER_ROLE_KEY)?.map(|raw| Role::from(raw.as_str()));
        Ok(Self { token, role })
    }

    /// Persist a fresh login
    pub fn establish(storage: &dyn SessionStorage, token: &str, role: &str) -> AppResult<Self> {
        storage.set(AUTH_TOKEN_KEY, token)?;
        storage.set(USER_ROLE_KEY, role)?;
        tracing::info!("Session established with role {}", role);
        Ok(Self {
            token: Some(token.to_string()),
            role: Some(Role::from(role)),
        })
    }

    /// Forget the session (logout)
    pub fn clear(storage: &dyn SessionStorage) -> AppResult<()> {
        storage.remove(AUTH_TOKEN_KEY)?;
        storage.remove(USER_ROLE_KEY)?;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() || self.role.is_some()
    }

    pub fn has_role(&self, required: &Role) -> bool {
        self.role.as_ref() == Some(required)
    }
}
