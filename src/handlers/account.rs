use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    error::Result,
    handlers::AppState,
    models::{account::AccountSummary, phone::SortKey},
};

/// Handler for the account stats page: per-status counts plus money
/// totals, recomputed from the full phone set on every request.
pub async fn account(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let phones = state
        .phone_store
        .get_all_phones(SortKey::DateAcquiredDesc)
        .await?;

    let mut all_parts = Vec::new();
    for phone in &phones {
        match phone.parts() {
            Ok(parts) => all_parts.extend(parts.0),
            // A row with an undecodable list keeps the rest of the stats
            // usable; the id is logged for manual cleanup.
            Err(_) => tracing::warn!(phone_id = phone.phone_id, "unparseable parts list"),
        }
    }
    let parts_cost = state.part_store.parts_cost(&all_parts).await?;

    Ok(Json(AccountSummary::compute(&phones, parts_cost)))
}
