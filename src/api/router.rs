//! API router.
//!
//! One flat route table. Authorization is not expressed in the router:
//! every handler consults the central policy table, so the route list
//! stays a plain map of paths to handlers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>`.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/login", post(endpoints::auth::login))
        .route("/doctor", post(endpoints::doctors::create))
        .route(
            "/doctor/:id",
            get(endpoints::doctors::detail)
                .put(endpoints::doctors::update)
                .delete(endpoints::doctors::remove),
        )
        .route("/patient", post(endpoints::patients::create))
        .route(
            "/patient/:id",
            get(endpoints::patients::detail)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::remove),
        )
        .route("/patients", get(endpoints::patients::list))
        .route(
            "/appointment/:doctor_id/:patient_id",
            post(endpoints::appointments::create),
        )
        .route(
            "/appointment/:id",
            get(endpoints::appointments::detail)
                .put(endpoints::appointments::update)
                .delete(endpoints::appointments::remove),
        )
        .route("/appointments", get(endpoints::appointments::list))
        .route(
            "/appointments/status",
            post(endpoints::appointments::by_status),
        )
        .route(
            "/record/appointment/:appointment_id",
            get(endpoints::records::by_appointment).post(endpoints::records::create),
        )
        .route(
            "/record/:id",
            get(endpoints::records::detail)
                .put(endpoints::records::update)
                .delete(endpoints::records::remove),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(
            middleware::auth::identify_caller,
        ))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx))
        .layer(CorsLayer::permissive())
}
