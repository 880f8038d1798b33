use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry as returned by the parts endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PartName {
    pub part_id: i64,
    pub part_name: String,
}

/// Wrapper shape the phone-parts endpoint returns for each id.
#[derive(Debug, Clone, Serialize)]
pub struct PartEntry {
    pub part: PartName,
}
