use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::refresh_token::refresh_token;
use super::handlers::auth::signin::signin;
use super::handlers::auth::signout::signout;
use super::handlers::auth::signup::signup;
use super::handlers::schedules::create_schedule::create_schedule;
use super::handlers::schedules::delete_schedule::delete_schedule;
use super::handlers::schedules::get_schedule::get_schedule;
use super::handlers::schedules::list_schedules::list_schedules;
use super::handlers::schedules::update_schedule::update_schedule;
use super::handlers::users::create_user::create_user;
use super::handlers::users::delete_user::delete_user;
use super::handlers::users::get_user::get_user;
use super::handlers::users::list_users::list_users;
use super::handlers::users::update_user::update_user;
use super::middleware::authenticate;
use super::middleware::require_admin;
use super::middleware::require_staff_or_admin;
use crate::domain::auth::service::AuthService;
use crate::domain::schedule::service::ScheduleService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::schedule::PostgresScheduleRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub schedule_service: Arc<ScheduleService<PostgresScheduleRepository, PostgresUserRepository>>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/v1/auth/signup", post(signup))
        .route("/v1/auth/signin", post(signin))
        .route("/v1/auth/signout", post(signout))
        .route("/v1/auth/refresh-token", post(refresh_token));

    // Schedule listing is open to every authenticated role; everything else
    // under /v1/users and /v1/schedules is admin-only.
    let staff_routes = Router::new()
        .route("/v1/schedules", get(list_schedules))
        .route_layer(middleware::from_fn(require_staff_or_admin));

    let admin_routes = Router::new()
        .route("/v1/users", post(create_user))
        .route("/v1/users", get(list_users))
        .route("/v1/users/:user_id", get(get_user))
        .route("/v1/users/:user_id", patch(update_user))
        .route("/v1/users/:user_id", delete(delete_user))
        .route("/v1/schedules", post(create_schedule))
        .route("/v1/schedules/:schedule_id", get(get_schedule))
        .route("/v1/schedules/:schedule_id", patch(update_schedule))
        .route("/v1/schedules/:schedule_id", delete(delete_schedule))
        .route_layer(middleware::from_fn(require_admin));

    // The authentication stage wraps both guarded groups; role checks run
    // after it per route group.
    let protected_routes = staff_routes.merge(admin_routes).route_layer(
        middleware::from_fn_with_state(state.clone(), authenticate),
    );

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
