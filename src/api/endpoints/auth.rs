//! Login endpoint — the only place credentials are accepted.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{self, Role};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

/// `POST /login` — verify credentials, mint a session token.
///
/// Unknown email is 404, wrong password 401. The role travels in the
/// token and is never re-derived on later requests.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let principal = auth::authenticate(&conn, &req.email, &req.password)?;
    let token = ctx
        .signer
        .issue(principal.id, &principal.email, principal.role)?;

    tracing::info!(id = principal.id, role = %principal.role, "login");

    Ok(Json(LoginResponse {
        token,
        role: principal.role,
    }))
}
