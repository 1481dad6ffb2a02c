use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::auth::require_api_key;
use crate::handlers::{available_slots, mock_slots};
use crate::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/available-slots", get(available_slots))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/mock-external-api/slots", get(mock_slots))
        .merge(protected)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!(
        "Incoming request: {} {}",
        request.method(),
        request.uri()
    );
    next.run(request).await
}
