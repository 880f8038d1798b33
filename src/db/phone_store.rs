use serde_json::Value;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::phone::{model_name, FieldValue, Phone, PhoneField, PhoneStatus, SortKey},
};

/// Phone store for database operations
#[derive(Clone)]
pub struct PhoneStore {
    pool: DbPool,
}

impl PhoneStore {
    /// Create a new PhoneStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a phone in its starting state: needs-fixed, no issues
    /// recorded, nothing purchased or sold yet. Returns the new id taken
    /// directly from the executed insert.
    pub async fn add_phone(
        &self,
        model_id: i64,
        color: &str,
        cost: f64,
        date_acquired: &str,
    ) -> Result<i64> {
        let name = model_name(model_id)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown model id {model_id}")))?;
        let model = format!("{name} {color}");

        let result = sqlx::query(
            r#"
            INSERT INTO phones (model_id, model, phone_cost, date_acquired, status, issues)
            VALUES (?, ?, ?, ?, 0, '')
            "#,
        )
        .bind(model_id)
        .bind(&model)
        .bind(cost)
        .bind(date_acquired)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Apply the given column assignments to one phone inside a single
    /// transaction; a failure leaves the row untouched.
    pub async fn update_phone(
        &self,
        phone_id: i64,
        assignments: &[String],
        values: &[Value],
    ) -> Result<()> {
        if assignments.len() != values.len() {
            return Err(AppError::InvalidInput(
                "update and value lists differ in length".to_string(),
            ));
        }

        // Validate every assignment before the first statement runs.
        let mut updates = Vec::with_capacity(assignments.len());
        for (assignment, raw) in assignments.iter().zip(values) {
            let field = PhoneField::from_assignment(assignment)?;
            updates.push((field, field.convert(raw)?));
        }

        let mut tx = self.pool.begin().await?;
        for (field, value) in updates {
            // Column names come from the validated enum, never from the
            // request.
            let query = format!("UPDATE phones SET {} = ? WHERE phone_id = ?", field.column());
            let statement = sqlx::query(&query);
            let statement = match value {
                FieldValue::Int(v) => statement.bind(v),
                FieldValue::Real(v) => statement.bind(v),
                FieldValue::Text(v) => statement.bind(v),
            };
            statement.bind(phone_id).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// Delete by primary key. Deleting an id with no row is not an error.
    pub async fn delete_phone(&self, phone_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM phones WHERE phone_id = ?")
            .bind(phone_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get a phone by ID
    pub async fn get_phone(&self, phone_id: i64) -> Result<Phone> {
        let phone = sqlx::query_as::<_, Phone>("SELECT * FROM phones WHERE phone_id = ?")
            .bind(phone_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(phone)
    }

    /// Get every phone, ordered by the given sort key
    pub async fn get_all_phones(&self, sort: SortKey) -> Result<Vec<Phone>> {
        let query = format!("SELECT * FROM phones ORDER BY {}", sort.order_clause());
        let phones = sqlx::query_as::<_, Phone>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(phones)
    }

    /// Get the phones currently in the given status
    pub async fn get_phones_by_status(&self, status: PhoneStatus) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>("SELECT * FROM phones WHERE status = ?")
            .bind(status as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(phones)
    }
}
