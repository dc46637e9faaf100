//! LIEN library lending console
//!
//! Administrative client for the LIEN lending services: browses the public
//! catalog, manages books, borrower accounts and loans through the remote
//! REST API, and keeps the operator's session between runs.

use std::sync::Arc;

pub mod config;
pub mod console;
pub mod error;
pub mod gateway;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod store;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use gateway::Gateways;
use session::{FileStorage, SessionStorage};

/// Application state shared by every view
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateways: Gateways,
    pub services: Arc<services::Services>,
    pub storage: Arc<dyn SessionStorage>,
}

impl AppState {
    /// HTTP gateways and the file-backed session store named by `config`
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let gateways = Gateways::new(&config.api)?;
        let storage: Arc<dyn SessionStorage> =
            Arc::new(FileStorage::new(config.session.storage_path.clone()));
        Ok(Self::with_parts(config, gateways, storage))
    }

    pub fn with_parts(config: AppConfig, gateways: Gateways, storage: Arc<dyn SessionStorage>) -> Self {
        let services = services::Services::new(
            &gateways,
            storage.clone(),
            config.console.redirect_delay(),
        );
        Self {
            config: Arc::new(config),
            gateways,
            services: Arc::new(services),
            storage,
        }
    }
}
