//! Insurance claim repository

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::error::DatabaseError;

/// Database row for an insurance claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub status: String,
}

/// Data for inserting a claim
#[derive(Debug, Clone)]
pub struct NewClaimRow {
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub status: String,
}

/// Repository for insurance claims
///
/// Claims are inserted and read; nothing here updates or deletes them.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new ClaimRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all claims of a car, ascending by claim date
    #[instrument(skip(self))]
    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT claim_id, car_id, claim_date, description, amount, status
            FROM insurance_claims
            WHERE car_id = $1
            ORDER BY claim_date, claim_id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a claim in a single statement
    ///
    /// # Returns
    ///
    /// The stored claim with its generated identity
    #[instrument(skip(self, claim), fields(car_id = claim.car_id))]
    pub async fn insert(&self, claim: NewClaimRow) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO insurance_claims (car_id, claim_date, description, amount, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING claim_id, car_id, claim_date, description, amount, status
            "#,
        )
        .bind(claim.car_id)
        .bind(claim.claim_date)
        .bind(&claim.description)
        .bind(claim.amount)
        .bind(&claim.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }
}
