use std::collections::HashMap;

use crate::{db::DbPool, error::Result, models::part::PartName};

/// Part store for catalog lookups
#[derive(Clone)]
pub struct PartStore {
    pool: DbPool,
}

impl PartStore {
    /// Create a new PartStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// All parts that fit the given phone model
    pub async fn get_model_parts(&self, model_id: i64) -> Result<Vec<PartName>> {
        let parts = sqlx::query_as::<_, PartName>(
            "SELECT part_id, part_name FROM parts WHERE model_id = ? ORDER BY part_id",
        )
        .bind(model_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    /// Name lookup for a list of part ids, preserving input order and
    /// duplicates. Ids with no catalog row are skipped.
    pub async fn get_part_names(&self, part_ids: &[i64]) -> Result<Vec<PartName>> {
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT part_id, part_name FROM parts WHERE part_id IN ({})",
            placeholders(part_ids.len())
        );
        let mut statement = sqlx::query_as::<_, PartName>(&query);
        for id in part_ids {
            statement = statement.bind(*id);
        }
        let found = statement.fetch_all(&self.pool).await?;

        let by_id: HashMap<i64, PartName> = found
            .into_iter()
            .map(|part| (part.part_id, part))
            .collect();

        Ok(part_ids
            .iter()
            .filter_map(|id| by_id.get(id).cloned())
            .collect())
    }

    /// Total cost of the given part ids, counting duplicates and skipping
    /// ids with no catalog row.
    pub async fn parts_cost(&self, part_ids: &[i64]) -> Result<f64> {
        if part_ids.is_empty() {
            return Ok(0.0);
        }

        let query = format!(
            "SELECT part_id, part_cost FROM parts WHERE part_id IN ({})",
            placeholders(part_ids.len())
        );
        let mut statement = sqlx::query_as::<_, (i64, f64)>(&query);
        for id in part_ids {
            statement = statement.bind(*id);
        }
        let costs: HashMap<i64, f64> = statement
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .collect();

        Ok(part_ids.iter().filter_map(|id| costs.get(id)).sum())
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
