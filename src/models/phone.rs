use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::error::{AppError, Result};

/// Phone models that can be tracked, keyed by the model id the add form
/// submits. The id doubles as the image name on the front end.
const MODEL_NAMES: &[(i64, &str)] = &[
    (50, "iPhone 5"),
    (55, "iPhone 5s"),
    (60, "iPhone 6"),
    (65, "iPhone 6s"),
    (70, "iPhone 7"),
    (80, "iPhone 8"),
    (100, "iPhone X"),
];

/// Look up the display name for a model id.
pub fn model_name(model_id: i64) -> Option<&'static str> {
    MODEL_NAMES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, name)| *name)
}

/// Repair status of a phone, stored as its integer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum PhoneStatus {
    NeedsFixed = 0,
    WaitingForParts = 1,
    Fixing = 2,
    Fixed = 3,
    Sold = 4,
    CannotFix = 5,
}

impl TryFrom<i64> for PhoneStatus {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(PhoneStatus::NeedsFixed),
            1 => Ok(PhoneStatus::WaitingForParts),
            2 => Ok(PhoneStatus::Fixing),
            3 => Ok(PhoneStatus::Fixed),
            4 => Ok(PhoneStatus::Sold),
            5 => Ok(PhoneStatus::CannotFix),
            _ => Err(AppError::InvalidInput(format!("unknown status {value}"))),
        }
    }
}

/// Sort orders for the phone list, selected by the `order` query index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAcquiredDesc,
    DateAcquiredAsc,
    ModelDesc,
    ModelAsc,
    StatusAsc,
    StatusDesc,
    CostAsc,
    CostDesc,
}

impl SortKey {
    /// ORDER BY fragment for this key. Only these fixed pairs ever reach
    /// the query builder.
    pub fn order_clause(self) -> &'static str {
        match self {
            SortKey::DateAcquiredDesc => "date_acquired DESC",
            SortKey::DateAcquiredAsc => "date_acquired ASC",
            SortKey::ModelDesc => "model_id DESC",
            SortKey::ModelAsc => "model_id ASC",
            SortKey::StatusAsc => "status ASC",
            SortKey::StatusDesc => "status DESC",
            SortKey::CostAsc => "phone_cost ASC",
            SortKey::CostDesc => "phone_cost DESC",
        }
    }
}

impl TryFrom<i64> for SortKey {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(SortKey::DateAcquiredDesc),
            1 => Ok(SortKey::DateAcquiredAsc),
            2 => Ok(SortKey::ModelDesc),
            3 => Ok(SortKey::ModelAsc),
            4 => Ok(SortKey::StatusAsc),
            5 => Ok(SortKey::StatusDesc),
            6 => Ok(SortKey::CostAsc),
            7 => Ok(SortKey::CostDesc),
            _ => Err(AppError::InvalidOrder),
        }
    }
}

/// Bracketed comma-separated list of purchased part ids, as stored in the
/// `parts_purchased` column, e.g. "[1,2,3]".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartsList(pub Vec<i64>);

impl PartsList {
    /// Parse the encoded list. Brackets are optional so the same parser
    /// accepts the bare comma list the part forms submit.
    pub fn parse(encoded: &str) -> Result<Self> {
        let inner = encoded
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        if inner.is_empty() {
            return Ok(PartsList(Vec::new()));
        }

        let mut ids = Vec::with_capacity(inner.matches(',').count() + 1);
        for token in inner.split(',') {
            let id = token.trim().parse::<i64>().map_err(|_| {
                AppError::InvalidInput(format!("invalid part id '{}'", token.trim()))
            })?;
            ids.push(id);
        }
        Ok(PartsList(ids))
    }

    pub fn encode(&self) -> String {
        let ids: Vec<String> = self.0.iter().map(|id| id.to_string()).collect();
        format!("[{}]", ids.join(","))
    }
}

/// Database phone row, serialized as-is for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Phone {
    pub phone_id: i64,
    pub model_id: i64,
    pub model: String,
    pub phone_cost: f64,
    pub date_acquired: String,
    pub status: i64,
    pub issues: String,
    pub parts_purchased: Option<String>,
    pub sold: Option<f64>,
}

impl Phone {
    /// Decoded parts list; an absent column is an empty list.
    pub fn parts(&self) -> Result<PartsList> {
        match &self.parts_purchased {
            Some(encoded) => PartsList::parse(encoded),
            None => Ok(PartsList::default()),
        }
    }
}

/// Columns the update endpoint may assign, parsed from the client's
/// "column =?" fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneField {
    Status,
    Issues,
    PartsPurchased,
    Sold,
    PhoneCost,
    DateAcquired,
    Model,
    ModelId,
}

/// A validated assignment value, ready to bind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Real(f64),
    Text(String),
}

impl PhoneField {
    pub fn column(self) -> &'static str {
        match self {
            PhoneField::Status => "status",
            PhoneField::Issues => "issues",
            PhoneField::PartsPurchased => "parts_purchased",
            PhoneField::Sold => "sold",
            PhoneField::PhoneCost => "phone_cost",
            PhoneField::DateAcquired => "date_acquired",
            PhoneField::Model => "model",
            PhoneField::ModelId => "model_id",
        }
    }

    /// Accept the assignment fragments the update form builds ("status =?",
    /// "issues=?"). Anything but a known updatable column is rejected.
    pub fn from_assignment(assignment: &str) -> Result<Self> {
        let column = assignment
            .trim()
            .trim_end_matches('?')
            .trim_end()
            .trim_end_matches('=')
            .trim();
        match column {
            "status" => Ok(PhoneField::Status),
            "issues" => Ok(PhoneField::Issues),
            "parts_purchased" => Ok(PhoneField::PartsPurchased),
            "sold" => Ok(PhoneField::Sold),
            "phone_cost" => Ok(PhoneField::PhoneCost),
            "date_acquired" => Ok(PhoneField::DateAcquired),
            "model" => Ok(PhoneField::Model),
            "model_id" => Ok(PhoneField::ModelId),
            _ => Err(AppError::InvalidInput(format!("unknown column '{column}'"))),
        }
    }

    /// Validate a raw JSON value against the column's type and range. The
    /// update form submits numbers as strings, so both are accepted.
    pub fn convert(self, raw: &Value) -> Result<FieldValue> {
        match self {
            PhoneField::Status => {
                let status = int_value(raw)?;
                PhoneStatus::try_from(status)?;
                Ok(FieldValue::Int(status))
            }
            PhoneField::ModelId => Ok(FieldValue::Int(int_value(raw)?)),
            PhoneField::Sold | PhoneField::PhoneCost => Ok(FieldValue::Real(real_value(raw)?)),
            PhoneField::PartsPurchased => {
                let text = text_value(raw)?;
                // Stored in the canonical bracketed form regardless of how
                // the client encoded it.
                Ok(FieldValue::Text(PartsList::parse(&text)?.encode()))
            }
            PhoneField::DateAcquired => {
                let text = text_value(raw)?;
                parse_date(&text)?;
                Ok(FieldValue::Text(text))
            }
            PhoneField::Issues | PhoneField::Model => Ok(FieldValue::Text(text_value(raw)?)),
        }
    }
}

/// Validate a date field from the client (ISO YYYY-MM-DD).
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput(format!("invalid date '{text}'")))
}

fn int_value(raw: &Value) -> Result<i64> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| invalid(raw)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(raw)),
        _ => Err(invalid(raw)),
    }
}

fn real_value(raw: &Value) -> Result<f64> {
    match raw {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(raw)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(raw)),
        _ => Err(invalid(raw)),
    }
}

fn text_value(raw: &Value) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        _ => Err(invalid(raw)),
    }
}

fn invalid(raw: &Value) -> AppError {
    AppError::InvalidInput(format!("invalid value {raw}"))
}
