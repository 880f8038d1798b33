use axum::{
    extract::{Form, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    handlers::AppState,
    models::phone::{parse_date, PhoneStatus, SortKey},
};

/// Add form submitted by the client: model id, color, cost, acquisition date
#[derive(Debug, Deserialize)]
pub struct AddPhoneForm {
    pub model: i64,
    pub color: String,
    pub cost: f64,
    pub date: String,
}

/// Response for a newly added phone
#[derive(Debug, Serialize)]
pub struct AddPhoneResponse {
    pub phone_id: i64,
    pub message: String,
}

/// Handler for adding a phone to the inventory
pub async fn add_phone(
    State(state): State<AppState>,
    Form(form): Form<AddPhoneForm>,
) -> Result<impl IntoResponse> {
    parse_date(&form.date)?;
    if !form.cost.is_finite() || form.cost < 0.0 {
        return Err(AppError::InvalidInput(format!("invalid cost {}", form.cost)));
    }

    let phone_id = state
        .phone_store
        .add_phone(form.model, &form.color, form.cost, &form.date)
        .await?;

    Ok(Json(AddPhoneResponse {
        phone_id,
        message: "Phone added to inventory".to_string(),
    }))
}

/// Update request: parallel lists of "column =?" fragments and values
#[derive(Debug, Deserialize)]
pub struct UpdatePhoneRequest {
    #[serde(rename = "phoneId")]
    pub phone_id: i64,
    pub update: Vec<String>,
    pub value: Vec<serde_json::Value>,
}

/// Handler for the field-by-field phone update
pub async fn update_phone(
    State(state): State<AppState>,
    Json(request): Json<UpdatePhoneRequest>,
) -> Result<impl IntoResponse> {
    state
        .phone_store
        .update_phone(request.phone_id, &request.update, &request.value)
        .await?;

    Ok("Updated successfully")
}

/// Form carrying a single phone id
#[derive(Debug, Deserialize)]
pub struct PhoneIdForm {
    pub phone_id: i64,
}

/// Handler for removing a phone
pub async fn delete_phone(
    State(state): State<AppState>,
    Form(form): Form<PhoneIdForm>,
) -> Result<impl IntoResponse> {
    state.phone_store.delete_phone(form.phone_id).await?;

    Ok("Phone removed")
}

/// Handler for a single phone's details
pub async fn phone_info(
    State(state): State<AppState>,
    Form(form): Form<PhoneIdForm>,
) -> Result<impl IntoResponse> {
    let phone = state.phone_store.get_phone(form.phone_id).await?;

    Ok(Json(phone))
}

#[derive(Debug, Deserialize)]
pub struct AllPhonesQuery {
    pub order: i64,
}

/// Handler listing every phone in the requested order
pub async fn all_phones(
    State(state): State<AppState>,
    Query(query): Query<AllPhonesQuery>,
) -> Result<impl IntoResponse> {
    let sort = SortKey::try_from(query.order)?;
    let phones = state.phone_store.get_all_phones(sort).await?;

    Ok(Json(phones))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: i64,
}

/// Handler listing the phones currently in one status
pub async fn phones_by_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse> {
    let status = PhoneStatus::try_from(query.status)?;
    let phones = state.phone_store.get_phones_by_status(status).await?;

    Ok(Json(phones))
}
