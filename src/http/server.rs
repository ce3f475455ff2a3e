//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use axum::{
    body::Body,
    extract::State,
    http::Request,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::health::{AggregateHealth, HealthAggregator};
use crate::http::request::{request_id, UuidRequestId};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<HealthAggregator>,
}

/// HTTP server exposing the health endpoint.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and probes.
    pub fn new(config: AppConfig, aggregator: HealthAggregator) -> Self {
        let state = AppState {
            aggregator: Arc::new(aggregator),
        };
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.health.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(config: &AppConfig, state: AppState) -> Router {
    Router::new()
        .route(&config.health.path, get(health_handler))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                request_id = %request_id(request),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
}

/// Aggregate health handler. Always `200 OK`; the body carries the status.
async fn health_handler(State(state): State<AppState>) -> Json<AggregateHealth> {
    Json(state.aggregator.aggregate().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{Probe, ProbeResult, Status};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    struct Down;

    #[async_trait]
    impl Probe for Down {
        fn name(&self) -> &str {
            "database"
        }

        async fn check(&self) -> ProbeResult {
            ProbeResult::down("database", "unable to execute queries")
        }
    }

    fn server(aggregator: HealthAggregator) -> HttpServer {
        HttpServer::new(AppConfig::default(), aggregator)
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_down_still_returns_200() {
        let server = server(HealthAggregator::new().with_probe(Down));
        let response = get(server.router(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: AggregateHealth = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health.status, Status::Down);
        assert_eq!(health.cause.as_deref(), Some("dependent service 'database' is down"));
    }

    #[tokio::test]
    async fn test_request_id_generated_and_propagated() {
        let server = server(HealthAggregator::new());
        let response = get(server.router(), "/health").await;
        assert!(response.headers().contains_key("x-request-id"));

        let response = server
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn test_custom_path_and_unknown_route() {
        let mut config = AppConfig::default();
        config.health.path = "/status".into();
        let server = HttpServer::new(config, HealthAggregator::new());

        assert_eq!(get(server.router(), "/status").await.status(), StatusCode::OK);
        assert_eq!(get(server.router(), "/health").await.status(), StatusCode::NOT_FOUND);
    }
}
