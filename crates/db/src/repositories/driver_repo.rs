//! Repository for the `drivers` table.

use sqlx::PgPool;
use transferhub_core::availability::EntityKind;
use transferhub_core::pagination::Page;
use transferhub_core::types::DbId;
use transferhub_core::validation::DriverInput;

use super::{contains_pattern, overlapping_transfer_exists};
use crate::models::driver::{Driver, DriverFilter};

/// Column list for the `drivers` table.
const COLUMNS: &str = "id, full_name, tc, created_at, updated_at";

/// Provides CRUD operations for drivers.
pub struct DriverRepo;

impl DriverRepo {
    pub async fn create(pool: &PgPool, input: &DriverInput) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (full_name, tc) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.full_name)
            .bind(&input.tc)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM drivers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Whether another driver already uses national id `tc`.
    pub async fn tc_taken(
        pool: &PgPool,
        tc: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE tc = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(tc)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// List one page of drivers, newest first, with the total match count.
    pub async fn list(
        pool: &PgPool,
        filter: &DriverFilter,
        page: &Page,
    ) -> Result<(Vec<Driver>, i64), sqlx::Error> {
        let where_clause = list_where_clause();
        let start = filter.available_between.map(|w| w.start);
        let finish = filter.available_between.map(|w| w.finish);
        let search = filter.search.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM drivers {where_clause}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(start)
            .bind(finish)
            .bind(&search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM drivers {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        let drivers = sqlx::query_as::<_, Driver>(&query)
            .bind(start)
            .bind(finish)
            .bind(&search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((drivers, total))
    }

    /// Replace a driver's fields. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DriverInput,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET full_name = $2, tc = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.tc)
            .fetch_optional(pool)
            .await
    }

    /// Delete a driver. Fails with a foreign key violation while transfers reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn list_where_clause() -> String {
    let busy = overlapping_transfer_exists(EntityKind::Driver, "drivers.id", "$1", "$2");
    format!(
        "WHERE ($1::timestamp IS NULL OR NOT {busy}) \
           AND ($3::text IS NULL OR drivers.full_name ILIKE $3 OR drivers.tc ILIKE $3)"
    )
}
