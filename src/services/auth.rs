//! Login, logout and password change

use std::sync::Arc;
use std::time::Duration;

use super::Navigation;
use crate::{
    error::{AppError, AppResult},
    gateway::{ApiClient, AuthGateway},
    models::{ChangePasswordForm, LoginForm},
    routes::Route,
    session::{SessionContext, SessionStorage},
};

pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const LOGIN_SUCCEEDED: &str = "Inicio de sesión exitoso";
pub const PASSWORD_CHANGE_FAILED: &str = "Error al cambiar la contraseña.";
pub const PASSWORD_CHANGED: &str =
    "Contraseña cambiada exitosamente. Inicia sesión con tu nueva contraseña.";

/// Result of a completed flow
#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome {
    pub message: &'static str,
    pub navigation: Navigation,
}

#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    client: ApiClient,
    storage: Arc<dyn SessionStorage>,
    redirect_delay: Duration,
}

impl AuthService {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        client: ApiClient,
        storage: Arc<dyn SessionStorage>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            gateway,
            client,
            storage,
            redirect_delay,
        }
    }

    /// Check the form locally, then exchange it for a session.
    ///
    /// On failure the error's text is what the form shows: the validation
    /// message, the service's `error_message`, or a generic one.
    pub async fn login(&self, form: &LoginForm) -> AppResult<(SessionContext, FlowOutcome)> {
        form.check()?;

        let response = self.gateway.login(form).await.map_err(|e| {
            AppError::Validation(failure_message(&e, LOGIN_FAILED))
        })?;

        let session = SessionContext::establish(self.storage.as_ref(), &response.id_token, &response.role)?;
        self.client.set_token(Some(response.id_token));

        Ok((
            session,
            FlowOutcome {
                message: LOGIN_SUCCEEDED,
                navigation: Navigation::To(Route::Landing),
            },
        ))
    }

    pub fn logout(&self) -> AppResult<Navigation> {
        SessionContext::clear(self.storage.as_ref())?;
        self.client.set_token(None);
        Ok(Navigation::To(Route::Landing))
    }

    /// Re-read the persisted session and hand its token to the gateways
    pub fn current_session(&self) -> AppResult<SessionContext> {
        let session = SessionContext::read(self.storage.as_ref())?;
        self.client.set_token(session.token().map(str::to_string));
        Ok(session)
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> AppResult<FlowOutcome> {
        form.check()?;

        self.gateway
            .change_password(&form.to_request())
            .await
            .map_err(|e| {
                tracing::warn!("Password change for {} failed: {}", form.username, e);
                AppError::Validation(PASSWORD_CHANGE_FAILED.to_string())
            })?;

        tracing::info!("Password changed for {}", form.username);
        Ok(FlowOutcome {
            message: PASSWORD_CHANGED,
            navigation: Navigation::After {
                delay: self.redirect_delay,
                to: Route::Home,
            },
        })
    }
}

/// Text to show for a failed remote exchange
pub fn failure_message(error: &AppError, generic: &str) -> String {
    match error {
        AppError::Validation(message) => message.clone(),
        AppError::Remote(remote) => remote.server_message().unwrap_or(generic).to_string(),
        _ => generic.to_string(),
    }
}
