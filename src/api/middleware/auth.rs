//! Bearer token identification middleware.
//!
//! Extracts `Authorization: Bearer <token>`, verifies it against the
//! process-wide signer, and injects a `Caller` into request extensions
//! for downstream handlers. Requests without a usable token proceed as
//! anonymous — endpoints that require identity reject them through the
//! policy check, which keeps expired tokens surfacing as 401, not 403.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Caller};
use crate::auth::Principal;

/// Resolve the caller for this request.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer).
pub async fn identify_caller(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let Some(ctx) = req.extensions().get::<ApiContext>().cloned() else {
        return ApiError::Internal("missing API context".into()).into_response();
    };

    let principal = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| ctx.signer.verify(token).ok())
        .map(Principal::from);

    if let Some(p) = &principal {
        tracing::debug!(id = p.id, role = %p.role, "caller identified");
    }

    req.extensions_mut().insert(Caller(principal));
    next.run(req).await
}
