use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::get_current_user::get_current_user;
use super::handlers::issue_token::issue_token;
use super::middleware::require_bearer;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::UserService;
use crate::outbound::user_store::AccountAuthenticator;

pub struct AppState<R>
where
    R: UserRepository,
{
    pub user_service: Arc<UserService<R>>,
    pub authenticator: Arc<AccountAuthenticator<R>>,
    pub access_token_ttl: chrono::Duration,
}

impl<R> Clone for AppState<R>
where
    R: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
            access_token_ttl: self.access_token_ttl,
        }
    }
}

pub fn create_router<R>(
    user_service: Arc<UserService<R>>,
    authenticator: Arc<AccountAuthenticator<R>>,
    access_token_ttl: chrono::Duration,
) -> Router
where
    R: UserRepository,
{
    let state = AppState {
        user_service,
        authenticator,
        access_token_ttl,
    };

    let public_routes = Router::new()
        .route("/api/auth/token", post(issue_token::<R>))
        .route("/api/users", post(create_user::<R>));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<R>,
        ));

    // request headers are left out of the span: they carry bearer tokens
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
