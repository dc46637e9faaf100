//! HTTP implementation of a remote entity collection

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;
use std::marker::PhantomData;

use super::{check_status, read_json, ApiClient, RemoteCollection};
use crate::{
    config::{CollectionEndpoints, DeleteMode},
    error::{AppError, AppResult, RemoteError},
    models::Entity,
};

/// Remote collection reached over HTTP, shaped by its `CollectionEndpoints`
pub struct HttpCollection<E> {
    client: ApiClient,
    endpoints: CollectionEndpoints,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> HttpCollection<E> {
    pub fn new(client: ApiClient, endpoints: CollectionEndpoints) -> Self {
        Self {
            client,
            endpoints,
            _entity: PhantomData,
        }
    }

    async fn send(&self, method: Method, url: &str, body: Option<Value>) -> AppResult<Value> {
        tracing::debug!("{} {} ({})", method, url, E::NAME);

        let mut request = self.client.authorize(self.client.http().request(method.clone(), url));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let result: Result<Value, RemoteError> = async move {
            let response = request.send().await?;
            let response = check_status(response).await?;
            read_json(response).await
        }
        .await;

        result.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            AppError::Remote(e)
        })
    }

    /// `{delete_url}/{key}` with the key as a single path segment
    fn delete_path(&self, key: &E::DeleteKey) -> AppResult<String> {
        let segment = match serde_json::to_value(key)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(AppError::Unsupported(format!(
                    "{} delete key {} cannot be sent as a path segment",
                    E::NAME,
                    other
                )))
            }
        };

        let mut url = Url::parse(&self.endpoints.delete_url)
            .map_err(|e| AppError::Internal(format!("Invalid delete url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Delete url cannot take a path".to_string()))?
            .pop_if_empty()
            .push(&segment);
        Ok(url.to_string())
    }
}

#[async_trait]
impl<E: Entity> RemoteCollection<E> for HttpCollection<E> {
    async fn list(&self) -> AppResult<Vec<E>> {
        let body = self.send(Method::GET, &self.endpoints.list_url, None).await?;
        let items: Vec<E> = serde_json::from_value(body).map_err(RemoteError::Decode)?;
        tracing::debug!("Fetched {} {} records", items.len(), E::NAME);
        Ok(items)
    }

    async fn create(&self, draft: &E::Draft) -> AppResult<E> {
        let payload = serde_json::to_value(draft)?;
        let body = self
            .send(Method::POST, &self.endpoints.create_url, Some(payload))
            .await?;
        E::from_created(draft, body)
    }

    async fn update(&self, entity: &E) -> AppResult<E> {
        let url = self.endpoints.update_url.as_deref().ok_or_else(|| {
            AppError::Unsupported(format!("the {} service has no update endpoint", E::NAME))
        })?;
        let payload = serde_json::to_value(entity)?;
        let body = self.send(Method::PUT, url, Some(payload)).await?;
        Ok(serde_json::from_value(body).map_err(RemoteError::Decode)?)
    }

    async fn remove(&self, key: &E::DeleteKey) -> AppResult<()> {
        match self.endpoints.delete_mode {
            DeleteMode::Path => {
                let url = self.delete_path(key)?;
                self.send(Method::DELETE, &url, None).await?;
            }
            DeleteMode::Body => {
                let payload = serde_json::to_value(key)?;
                self.send(Method::POST, &self.endpoints.delete_url, Some(payload))
                    .await?;
            }
        }
        Ok(())
    }
}
