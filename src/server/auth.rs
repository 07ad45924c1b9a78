use std::sync::Arc;

use axum::{Form, Json, extract::State};

use crate::auth::{self, session};
use crate::server::AppState;
use crate::server::dto::{LoginForm, TokenResponse};
use crate::server::response::{ApiError, ApiResponse};

/// POST /token - exchange admin credentials for a bearer session token.
///
/// The one unauthenticated mutation endpoint. A bad username and a bad
/// password produce the same response.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let user = auth::authenticate(state.store.as_ref(), &form.username, &form.password)
        .map_err(|_| ApiError::internal("Failed to check credentials"))?
        .ok_or_else(|| ApiError::unauthorized("Incorrect username or password"))?;

    let token = session::issue(
        &user.username,
        state.config.token_ttl(),
        &state.config.secret_key,
        state.config.algorithm,
    )
    .map_err(|_| ApiError::internal("Failed to issue session token"))?;

    Ok(Json(ApiResponse::success(TokenResponse::bearer(token))))
}
