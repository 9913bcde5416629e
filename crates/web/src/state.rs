use axum::extract::FromRef;
use storage::Database;

use crate::auth::tokens::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenIssuer,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
