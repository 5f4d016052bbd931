//! Adapter for managed platforms that invoke the application per request.
//!
//! The platform owns the socket; this side only turns one HTTP request into
//! one response using the same router the standalone server mounts.

use crate::config::ProxyConfig;
use crate::startup::{build_router, AppState};
use axum::{body::Body, http::Request, response::Response, Router};
use service_core::error::AppError;
use tower::ServiceExt;

#[derive(Clone)]
pub struct HostedApp {
    router: Router,
}

impl HostedApp {
    /// Build the router once; it is reused for every invocation.
    pub fn new(config: ProxyConfig) -> Result<Self, AppError> {
        Self::with_state(AppState::from_config(config)?)
    }

    pub fn with_state(state: AppState) -> Result<Self, AppError> {
        Ok(Self {
            router: build_router(state)?,
        })
    }

    /// Run a single request through the application.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}
