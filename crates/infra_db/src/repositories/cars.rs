//! Owner and car repository

use sqlx::PgPool;
use tracing::instrument;

use crate::error::DatabaseError;

/// Database row for an owner
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OwnerRow {
    pub owner_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// Database row for a car
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarRow {
    pub car_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
}

/// A car row joined with its owner's columns
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CarWithOwnerRow {
    pub car_id: i64,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

/// Data for inserting a car
#[derive(Debug, Clone)]
pub struct NewCarRow {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
}

/// Repository for owners and cars
#[derive(Debug, Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    /// Creates a new CarRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every car with its owner, ordered by car identity
    #[instrument(skip(self))]
    pub async fn list_with_owners(&self) -> Result<Vec<CarWithOwnerRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CarWithOwnerRow>(
            r#"
            SELECT
                c.car_id,
                c.vin,
                c.make,
                c.model,
                c.year_of_manufacture,
                c.owner_id,
                o.name AS owner_name,
                o.email AS owner_email
            FROM cars c
            JOIN owners o ON o.owner_id = c.owner_id
            ORDER BY c.car_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves a car by identity
    ///
    /// # Returns
    ///
    /// `None` if no car has this identity
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, car_id: i64) -> Result<Option<CarRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            SELECT car_id, vin, make, model, year_of_manufacture, owner_id
            FROM cars
            WHERE car_id = $1
            "#,
        )
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Inserts a car
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` if the VIN is already registered
    #[instrument(skip(self, car), fields(vin = %car.vin))]
    pub async fn insert(&self, car: NewCarRow) -> Result<CarRow, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            INSERT INTO cars (vin, make, model, year_of_manufacture, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING car_id, vin, make, model, year_of_manufacture, owner_id
            "#,
        )
        .bind(&car.vin)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(car.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(row)
    }

    /// Inserts an owner
    #[instrument(skip(self))]
    pub async fn insert_owner(
        &self,
        name: &str,
        email: Option<&str>,
    ) -> Result<OwnerRow, DatabaseError> {
        let row = sqlx::query_as::<_, OwnerRow>(
            r#"
            INSERT INTO owners (name, email)
            VALUES ($1, $2)
            RETURNING owner_id, name, email
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Counts stored owners
    pub async fn count_owners(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM owners")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
