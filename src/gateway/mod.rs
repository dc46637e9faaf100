//! Gateways to the remote LIEN services
//!
//! One typed wrapper per entity family, each translating a CRUD intent into
//! exactly one HTTP request. No retries, no timeout beyond the transport
//! default.

pub mod auth;
pub mod http;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    config::ApiConfig,
    error::{AppResult, RemoteError},
    models::{Book, Entity, Loan, User},
};

pub use auth::{AuthGateway, HttpAuthGateway};
pub use http::HttpCollection;

/// CRUD access to one remote entity collection
#[async_trait]
pub trait RemoteCollection<E: Entity>: Send + Sync {
    /// Fetch the whole collection in server order
    async fn list(&self) -> AppResult<Vec<E>>;

    /// Send a draft; the returned record is the canonical one
    async fn create(&self, draft: &E::Draft) -> AppResult<E>;

    /// Full-record overwrite
    async fn update(&self, entity: &E) -> AppResult<E>;

    async fn remove(&self, key: &E::DeleteKey) -> AppResult<()>;
}

/// Shared HTTP client carrying the identity token of the current session
#[derive(Clone, Default)]
pub struct ApiClient {
    http: reqwest::Client,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new() -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("lien-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RemoteError::from)?;
        Ok(Self {
            http,
            token: Arc::default(),
        })
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// A panic elsewhere never leaves the previous token in place
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Attach the bearer token, when a session holds one
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }
}

/// Turn a non-2xx response into a `RemoteError`, keeping the service's
/// `error_message` when it sent one.
pub(crate) async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    Err(RemoteError::Status { status, message })
}

/// Read a JSON body; an empty body reads as `null`
pub(crate) async fn read_json(response: Response) -> Result<Value, RemoteError> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(RemoteError::Decode)
}

/// All gateways of the console
#[derive(Clone)]
pub struct Gateways {
    pub client: ApiClient,
    pub books: Arc<dyn RemoteCollection<Book>>,
    pub users: Arc<dyn RemoteCollection<User>>,
    pub loans: Arc<dyn RemoteCollection<Loan>>,
    pub auth: Arc<dyn AuthGateway>,
}

impl Gateways {
    /// Build HTTP gateways for every configured service
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = ApiClient::new()?;
        Ok(Self {
            books: Arc::new(HttpCollection::<Book>::new(client.clone(), config.books.clone())),
            users: Arc::new(HttpCollection::<User>::new(client.clone(), config.users.clone())),
            loans: Arc::new(HttpCollection::<Loan>::new(client.clone(), config.loans.clone())),
            auth: Arc::new(HttpAuthGateway::new(client.clone(), config.auth.clone())),
            client,
        })
    }
}
