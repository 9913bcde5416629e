use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use storage::dto::user::UserDetailResponse;
use storage::repository::admin::AdminRepository;
use storage::repository::user::UserRepository;

use crate::auth::tokens::Claims;
use crate::error::WebError;
use crate::state::AppState;

/// Member principal resolved by `require_user`, available to handlers as a
/// request extension.
#[derive(Clone)]
pub struct CurrentUser(pub UserDetailResponse);

/// Reject the request unless it carries a valid member token. The principal
/// is re-loaded on every request so banned-and-deleted members lose access
/// immediately, token or not.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let claims = decode_bearer(&state, &req)?;

    let user = UserRepository::new(state.db.pool())
        .find_detailed_by_id(claims.sub)
        .await
        .map_err(|_| WebError::Unauthorized)?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Reject the request unless it carries a valid admin token. The admin row
/// is loaded only to confirm the account is still live; handlers behind this
/// gate do not consume the principal.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let claims = decode_bearer(&state, &req)?;

    AdminRepository::new(state.db.pool())
        .find_by_id(claims.sub)
        .await
        .map_err(|_| WebError::Unauthorized)?;

    Ok(next.run(req).await)
}

fn decode_bearer(state: &AppState, req: &Request) -> Result<Claims, WebError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebError::Unauthorized)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(WebError::Unauthorized)?;

    state.tokens.decode(token).map_err(|_| {
        tracing::warn!("Rejected request with invalid bearer token");
        WebError::Unauthorized
    })
}
