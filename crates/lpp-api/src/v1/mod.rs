use axum::Router;

use crate::{scoring, state::ApiState};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new().merge(scoring::routes())
}
