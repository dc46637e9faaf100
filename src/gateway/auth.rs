//! Gateway to the authentication service

use async_trait::async_trait;

use super::{check_status, read_json, ApiClient};
use crate::{
    config::AuthEndpoints,
    error::{AppResult, RemoteError},
    models::{session::ChangePasswordRequest, LoginForm, LoginResponse},
};

/// Login and password change exchanges
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, form: &LoginForm) -> AppResult<LoginResponse>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> AppResult<()>;
}

pub struct HttpAuthGateway {
    client: ApiClient,
    endpoints: AuthEndpoints,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient, endpoints: AuthEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, form: &LoginForm) -> AppResult<LoginResponse> {
        tracing::debug!("POST {} (login as {})", self.endpoints.login_url, form.username);

        let response = self
            .client
            .http()
            .post(&self.endpoints.login_url)
            .json(form)
            .send()
            .await
            .map_err(RemoteError::from)?;
        let response = check_status(response).await.map_err(|e| {
            tracing::warn!("Login rejected for {}: {}", form.username, e);
            e
        })?;
        let body = read_json(response).await?;
        Ok(serde_json::from_value(body).map_err(RemoteError::Decode)?)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> AppResult<()> {
        tracing::debug!(
            "POST {} (password change for {})",
            self.endpoints.change_password_url,
            request.username
        );

        let response = self
            .client
            .http()
            .post(&self.endpoints.change_password_url)
            .json(request)
            .send()
            .await
            .map_err(RemoteError::from)?;
        check_status(response).await?;
        Ok(())
    }
}
