//! Role gate in front of management views

use super::SessionContext;
use crate::models::Role;
use crate::routes::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Unchecked,
    Authorized,
    /// Navigate here and render nothing
    Redirected(Route),
}

/// Checks the persisted role once per mount.
///
/// Purely a navigation aid: the flag is client-controlled, the remote
/// services enforce the real authorization.
#[derive(Debug)]
pub struct RoleGate {
    required: Role,
    state: GateState,
}

impl RoleGate {
    pub fn new(required: Role) -> Self {
        Self {
            required,
            state: GateState::Unchecked,
        }
    }

    /// First call decides; later calls return the decided state
    pub fn check(&mut self, session: &SessionContext) -> &GateState {
        if self.state == GateState::Unchecked {
            self.state = if session.has_role(&self.required) {
                GateState::Authorized
            } else {
                tracing::debug!(
                    "Role {:?} does not grant {}; redirecting",
                    session.role().map(Role::as_str),
                    self.required
                );
                GateState::Redirected(Route::Landing)
            };
        }
        &self.state
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authorized(&self) -> bool {
        self.state == GateState::Authorized
    }
}
