//! HTTP surface of the events service.
//!
//! Endpoints:
//! - POST /create_user - Register a user
//! - POST /create_event - Create an event for a user
//! - POST /update_event - Partially update an event
//! - POST /delete_event - Delete an event
//! - GET /events_for_day - Events on a date
//! - GET /events_for_week - Events in the seven days from a date
//! - GET /events_for_month - Events in the month of a date

pub mod handlers;
pub mod server;
pub mod telemetry;
pub mod validation;

use std::any::Any;
use std::sync::Arc;

use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{BoxError, Router};
use shared::storage::{
    EventCreator, EventDeleter, EventUpdater, EventsByDay, EventsByMonth, EventsByWeek,
    UserCreator,
};
use shared::http::{json_response, Envelope};
use shared::HttpConfig;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::RequestBodyTimeoutLayer;
use tower_http::trace::TraceLayer;

use handlers::{create_event, delete_event, get_events, update_event, user};

/// Every capability the router hands out to its handlers.
pub trait Storage:
    UserCreator + EventCreator + EventUpdater + EventDeleter + EventsByDay + EventsByWeek + EventsByMonth
{
}

impl<T> Storage for T where
    T: UserCreator
        + EventCreator
        + EventUpdater
        + EventDeleter
        + EventsByDay
        + EventsByWeek
        + EventsByMonth
{
}

/// Routes only, no middleware.
pub fn router<S>(storage: Arc<S>) -> Router
where
    S: Storage + 'static,
{
    Router::new()
        .route("/create_user", post(user::create_user::<S>))
        .route("/create_event", post(create_event::create_event::<S>))
        .route("/update_event", post(update_event::update_event::<S>))
        .route("/delete_event", post(delete_event::delete_event::<S>))
        .route("/events_for_day", get(get_events::by_day::<S>))
        .route("/events_for_week", get(get_events::by_week::<S>))
        .route("/events_for_month", get(get_events::by_month::<S>))
        .with_state(storage)
}

/// Routes wrapped in the production middleware stack.
///
/// Outermost first: request id, trace, request id propagation, panic
/// recovery, request timeout, body timeout.
pub fn app<S>(storage: Arc<S>, config: &HttpConfig) -> Router
where
    S: Storage + 'static,
{
    with_middleware(router(storage), config)
}

fn with_middleware(mut router: Router, config: &HttpConfig) -> Router {
    router = router.layer(RequestBodyTimeoutLayer::new(config.idle_timeout));
    router = router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(middleware_error))
            .layer(TimeoutLayer::new(config.timeout)),
    );
    router = router.layer(CatchPanicLayer::custom(panic_response));
    router = router.layer(PropagateRequestIdLayer::x_request_id());
    router = router.layer(TraceLayer::new_for_http().make_span_with(
        |req: &Request<axum::body::Body>| {
            let request_id = req
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");

            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %request_id,
            )
        },
    ));
    router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        return json_response(StatusCode::REQUEST_TIMEOUT, Envelope::error("request timed out"));
    }

    tracing::error!(error = %err, "middleware failure");
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        Envelope::error("internal server error"),
    )
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        Envelope::error("internal server error"),
    )
}
