//! Repository for the `cars` table.

use sqlx::PgPool;
use transferhub_core::availability::EntityKind;
use transferhub_core::pagination::Page;
use transferhub_core::types::DbId;
use transferhub_core::validation::CarInput;

use super::{contains_pattern, overlapping_transfer_exists};
use crate::models::car::{Car, CarFilter};

/// Column list for the `cars` table.
const COLUMNS: &str = "id, plate, model, created_at, updated_at";

/// Provides CRUD operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car, returning the created row.
    pub async fn create(pool: &PgPool, input: &CarInput) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (plate, model) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&input.plate)
            .bind(&input.model)
            .fetch_one(pool)
            .await
    }

    /// Find a car by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cars WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether another car already uses `plate`. `exclude_id` skips the row
    /// being updated.
    pub async fn plate_taken(
        pool: &PgPool,
        plate: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM cars WHERE plate = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(plate)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of cars, newest first, with the total match count.
    pub async fn list(
        pool: &PgPool,
        filter: &CarFilter,
        page: &Page,
    ) -> Result<(Vec<Car>, i64), sqlx::Error> {
        let where_clause = list_where_clause();
        let start = filter.available_between.map(|w| w.start);
        let finish = filter.available_between.map(|w| w.finish);
        let search = filter.search.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM cars {where_clause}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(start)
            .bind(finish)
            .bind(&search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM cars {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        let cars = sqlx::query_as::<_, Car>(&query)
            .bind(start)
            .bind(finish)
            .bind(&search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((cars, total))
    }

    /// Replace a car's fields. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CarInput,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET plate = $2, model = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(&input.plate)
            .bind(&input.model)
            .fetch_optional(pool)
            .await
    }

    /// Delete a car. Fails with a foreign key violation while transfers reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `$1`/`$2` are the optional availability window, `$3` the optional search pattern.
fn list_where_clause() -> String {
    let busy = overlapping_transfer_exists(EntityKind::Car, "cars.id", "$1", "$2");
    format!(
        "WHERE ($1::timestamp IS NULL OR NOT {busy}) \
           AND ($3::text IS NULL OR cars.plate ILIKE $3 OR cars.model ILIKE $3)"
    )
}
