use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// API-key gate for the protected routes. The allow-list comes from the
/// injected config; a missing key and an unknown key fail with distinct codes
/// so callers can tell the two apart.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(raw_key) = request.headers().get(API_KEY_HEADER) else {
        warn!("API key missing in request");
        return Err(ApiError::MissingApiKey);
    };

    // A present header that is not valid UTF-8 cannot match any configured
    // key, so it counts as invalid rather than missing
    let known = raw_key
        .to_str()
        .is_ok_and(|key| state.config.api_keys.iter().any(|k| k == key));
    if !known {
        warn!("Invalid API key provided");
        return Err(ApiError::InvalidApiKey);
    }

    info!("Authenticated request");
    Ok(next.run(request).await)
}
