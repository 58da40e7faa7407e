//! Insurance policy repository

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::DatabaseError;

/// Database row for an insurance policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub policy_id: i64,
    pub car_id: i64,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Repository for insurance policies
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all policies of a car, ascending by start date
    #[instrument(skip(self))]
    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE car_id = $1
            ORDER BY start_date, policy_id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves policies whose end date lies in `[from, to]`
    #[instrument(skip(self))]
    pub async fn find_ending_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE end_date BETWEEN $1 AND $2
            ORDER BY end_date, policy_id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a policy
    ///
    /// # Errors
    ///
    /// `DatabaseError::ForeignKeyViolation` if the car does not exist,
    /// `DatabaseError::ConstraintViolation` if `start_date > end_date`
    #[instrument(skip(self))]
    pub async fn insert(
        &self,
        car_id: i64,
        provider: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PolicyRow, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(
            r#"
            INSERT INTO insurance_policies (car_id, provider, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING policy_id, car_id, provider, start_date, end_date
            "#,
        )
        .bind(car_id)
        .bind(provider)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }
}
