use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::{require_admin, require_user};
use crate::state::AppState;

use super::handlers::{create_user, delete_user, get_me, get_user, list_users, update_me};

pub fn routes(state: AppState) -> Router<AppState> {
    let member_scoped = Router::new()
        .route("/info", get(get_me))
        .route("/", patch(update_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    let admin_scoped = Router::new()
        .route("/", get(list_users))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/", post(create_user))
        .route("/:user_id", get(get_user))
        .route("/:user_id", delete(delete_user))
        .merge(member_scoped)
        .merge(admin_scoped)
}
