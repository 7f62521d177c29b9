//! Repository for the `passengers` table.

use std::collections::HashSet;

use sqlx::PgPool;
use transferhub_core::pagination::Page;
use transferhub_core::types::DbId;
use transferhub_core::validation::PassengerInput;

use super::contains_pattern;
use crate::models::passenger::{Passenger, PassengerFilter};

/// Column list for the `passengers` table.
const COLUMNS: &str = "id, name, surname, phone, passenger_type, created_at, updated_at";

/// `$1` is the passenger type, `$2` the optional search pattern.
const LIST_WHERE: &str = "WHERE passenger_type = $1 \
    AND ($2::text IS NULL \
         OR name ILIKE $2 OR surname ILIKE $2 OR phone ILIKE $2 OR passenger_type ILIKE $2)";

/// Provides CRUD operations for passengers.
pub struct PassengerRepo;

impl PassengerRepo {
    pub async fn create(pool: &PgPool, input: &PassengerInput) -> Result<Passenger, sqlx::Error> {
        let query = format!(
            "INSERT INTO passengers (name, surname, phone, passenger_type) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Passenger>(&query)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(&input.phone)
            .bind(input.passenger_type.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Passenger>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM passengers WHERE id = $1");
        sqlx::query_as::<_, Passenger>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM passengers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Which of `ids` exist. Duplicates in the input are fine.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<HashSet<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let found: Vec<DbId> = sqlx::query_scalar("SELECT id FROM passengers WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(found.into_iter().collect())
    }

    /// List one page of passengers of a single type, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &PassengerFilter,
        page: &Page,
    ) -> Result<(Vec<Passenger>, i64), sqlx::Error> {
        let search = filter.search.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM passengers {LIST_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.passenger_type.as_str())
            .bind(&search)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM passengers {LIST_WHERE} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        let passengers = sqlx::query_as::<_, Passenger>(&query)
            .bind(filter.passenger_type.as_str())
            .bind(&search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((passengers, total))
    }

    /// Replace a passenger's fields. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &PassengerInput,
    ) -> Result<Option<Passenger>, sqlx::Error> {
        let query = format!(
            "UPDATE passengers SET \
                name = $2, surname = $3, phone = $4, passenger_type = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Passenger>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.surname)
            .bind(&input.phone)
            .bind(input.passenger_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a passenger. Fails with a foreign key violation while a transfer links it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
