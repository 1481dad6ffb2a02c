use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::domain::CanonicalSlot;
use crate::error::ApiError;
use crate::normalize::normalize_slots;
use crate::state::AppState;
use crate::upstream::mock_slot_listings;

static DATE_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Query parameters for /api/available-slots. Page and limit stay raw strings
/// so non-numeric input gets a validation error instead of a generic 400.
#[derive(Debug, Default, Deserialize)]
pub struct SlotQuery {
    pub provider: Option<String>,
    pub date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Response envelope for a page of canonical slots.
#[derive(Debug, Serialize)]
pub struct SlotPage {
    pub data: Vec<CanonicalSlot>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Mock third-party PMS endpoint.
pub async fn mock_slots() -> impl IntoResponse {
    info!("Mock API /mock-external-api/slots called");
    Json(mock_slot_listings())
}

/// Fetches the upstream listings, normalizes them, then applies the optional
/// provider/date filters and pagination.
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotPage>, ApiError> {
    let raw = state.source.fetch_slots().await.map_err(|err| {
        error!("Error fetching upstream slot data: {err}");
        ApiError::Server
    })?;

    let mut slots = normalize_slots(&raw);

    if let Some(provider) = &query.provider {
        let wanted = provider.to_lowercase();
        slots.retain(|slot| slot.provider.to_lowercase() == wanted);
    }

    if let Some(date) = &query.date {
        if !DATE_FORMAT.is_match(date) {
            warn!("Invalid date format: {date}");
            return Err(ApiError::InvalidDate);
        }
        slots.retain(|slot| &slot.date == date);
    }

    let (page, limit) =
        parse_pagination(query.page.as_deref(), query.limit.as_deref()).ok_or_else(|| {
            warn!(page = ?query.page, limit = ?query.limit, "Invalid pagination parameters");
            ApiError::InvalidPagination
        })?;

    let total = slots.len();
    let data = paginate(slots, page, limit);

    info!(
        result_count = data.len(),
        "Successfully processed /api/available-slots"
    );

    Ok(Json(SlotPage {
        data,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    }))
}

/// Both parameters must be integers >= 1 when present; absent means defaults.
fn parse_pagination(page: Option<&str>, limit: Option<&str>) -> Option<(usize, usize)> {
    let parse = |raw: &str| raw.trim().parse::<usize>().ok().filter(|n| *n >= 1);

    let page = match page {
        Some(raw) => parse(raw)?,
        None => DEFAULT_PAGE,
    };
    let limit = match limit {
        Some(raw) => parse(raw)?,
        None => DEFAULT_LIMIT,
    };
    Some((page, limit))
}

fn paginate(slots: Vec<CanonicalSlot>, page: usize, limit: usize) -> Vec<CanonicalSlot> {
    let start = (page - 1).saturating_mul(limit);
    slots.into_iter().skip(start).take(limit).collect()
}
