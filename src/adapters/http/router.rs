//! Router composition.
//!
//! Routes: `GET /`, `POST /api/chat`, `POST /api/send-email`,
//! `POST /api/send-chat-history`.
//! Middleware: request id, CORS, tracing, timeout, gzip.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::handlers::conversation::SendChatHandler;
use crate::application::handlers::leads::{
    LeadRouting, SendCallbackHandler, SendTranscriptHandler,
};
use crate::config::ServerConfig;
use crate::domain::persona::PersonaPolicy;
use crate::ports::{AIProvider, MailTransport};

use super::chat::{chat_routes, ChatAppState};
use super::health::{health_routes, HealthState};
use super::leads::{lead_routes, LeadAppState};

/// Everything the router needs, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    pub ai_provider: Arc<dyn AIProvider>,
    pub mail_transport: Arc<dyn MailTransport>,
    pub persona: PersonaPolicy,
    pub lead_routing: LeadRouting,
}

/// Build the complete router with all routes and middleware.
pub fn build_router(services: AppServices, server: &ServerConfig) -> Router {
    let chat_state = ChatAppState::new(Arc::new(SendChatHandler::new(
        services.ai_provider.clone(),
        services.persona,
    )));
    let lead_state = LeadAppState::new(
        Arc::new(SendCallbackHandler::new(
            services.mail_transport.clone(),
            services.lead_routing.clone(),
        )),
        Arc::new(SendTranscriptHandler::new(
            services.mail_transport,
            services.lead_routing,
        )),
    );
    let health_state = HealthState {
        provider_label: services.ai_provider.provider_info().display_name(),
    };

    let api_routes = chat_routes()
        .with_state(chat_state)
        .merge(lead_routes().with_state(lead_state));

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id
        )
    });

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes().with_state(health_state))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// CORS for the widget. An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
