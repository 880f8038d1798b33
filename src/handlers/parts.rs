use axum::{
    extract::{Form, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    error::Result,
    handlers::AppState,
    models::{part::PartEntry, phone::PartsList},
};

#[derive(Debug, Deserialize)]
pub struct ModelQuery {
    pub model: i64,
}

/// Handler listing the parts catalog for one phone model
pub async fn all_parts(
    State(state): State<AppState>,
    Query(query): Query<ModelQuery>,
) -> Result<impl IntoResponse> {
    let parts = state.part_store.get_model_parts(query.model).await?;

    Ok(Json(parts))
}

/// Parts form: the client joins the selected part ids with commas
#[derive(Debug, Deserialize)]
pub struct PartsForm {
    pub parts: String,
}

/// Handler resolving a phone's purchased part ids to names
pub async fn phone_parts(
    State(state): State<AppState>,
    Form(form): Form<PartsForm>,
) -> Result<impl IntoResponse> {
    let ids = PartsList::parse(&form.parts)?;
    let names = state.part_store.get_part_names(&ids.0).await?;
    let entries: Vec<PartEntry> = names.into_iter().map(|part| PartEntry { part }).collect();

    Ok(Json(entries))
}

/// Handler totalling the cost of the given part ids
pub async fn parts_cost(
    State(state): State<AppState>,
    Form(form): Form<PartsForm>,
) -> Result<impl IntoResponse> {
    let ids = PartsList::parse(&form.parts)?;
    let total = state.part_store.parts_cost(&ids.0).await?;

    Ok(format!("{total:.2}"))
}
