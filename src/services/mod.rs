//! Session and form flows that are not tied to an entity list

pub mod auth;
pub mod loan_request;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    gateway::Gateways,
    routes::Route,
    session::SessionStorage,
};

/// Where the console goes after a flow completes
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Stay,
    To(Route),
    /// Show the confirmation first, then navigate
    After { delay: Duration, to: Route },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub loan_requests: loan_request::LoanRequestService,
}

impl Services {
    pub fn new(gateways: &Gateways, storage: Arc<dyn SessionStorage>, redirect_delay: Duration) -> Self {
        Self {
            auth: auth::AuthService::new(
                gateways.auth.clone(),
                gateways.client.clone(),
                storage,
                redirect_delay,
            ),
            loan_requests: loan_request::LoanRequestService::new(),
        }
    }
}
