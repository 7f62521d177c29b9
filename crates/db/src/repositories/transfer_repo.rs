//! Repository for the `transfers` and `transfer_details` tables.
//!
//! A transfer and its passenger links are always written together in one
//! transaction: either the row and the complete link set are committed, or
//! nothing is.

use std::collections::HashMap;

use sqlx::PgPool;
use transferhub_core::availability::{EntityKind, TimeWindow};
use transferhub_core::pagination::Page;
use transferhub_core::types::DbId;
use transferhub_core::validation::TransferInput;

use super::overlapping_transfer_exists;
use crate::models::transfer::{
    Transfer, TransferDetail, TransferJoinRow, TransferPassenger, TransferWithRelations,
};

/// Column list for the `transfers` table.
const COLUMNS: &str = "id, car_id, driver_id, transfer_start_time, transfer_finish_time, \
    transfer_start_place, created_at, updated_at";

/// Column list for the `transfer_details` table.
const DETAIL_COLUMNS: &str = "id, transfer_id, passenger_id, created_at, updated_at";

/// Transfer columns joined with their car and driver.
const JOIN_SELECT: &str = "SELECT t.id, t.car_id, t.driver_id, \
        t.transfer_start_time, t.transfer_finish_time, t.transfer_start_place, \
        t.created_at, t.updated_at, \
        c.plate AS car_plate, c.model AS car_model, \
        c.created_at AS car_created_at, c.updated_at AS car_updated_at, \
        d.full_name AS driver_full_name, d.tc AS driver_tc, \
        d.created_at AS driver_created_at, d.updated_at AS driver_updated_at \
     FROM transfers t \
     JOIN cars c ON c.id = t.car_id \
     JOIN drivers d ON d.id = t.driver_id";

/// Provides the transfer write transaction, relation loading and availability queries.
pub struct TransferRepo;

impl TransferRepo {
    /// Insert a transfer and one link row per passenger id, atomically.
    pub async fn create(pool: &PgPool, input: &TransferInput) -> Result<Transfer, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO transfers \
                (car_id, driver_id, transfer_start_time, transfer_finish_time, transfer_start_place) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let transfer = sqlx::query_as::<_, Transfer>(&insert_query)
            .bind(input.car_id)
            .bind(input.driver_id)
            .bind(input.window.start)
            .bind(input.window.finish)
            .bind(&input.transfer_start_place)
            .fetch_one(&mut *tx)
            .await?;

        Self::insert_details_inner(&mut tx, transfer.id, &input.passenger_ids).await?;

        tx.commit().await?;
        tracing::debug!(
            transfer_id = transfer.id,
            passengers = input.passenger_ids.len(),
            "Transfer inserted"
        );
        Ok(transfer)
    }

    /// Overwrite a transfer's fields and replace its whole passenger link set.
    ///
    /// The transfer row is locked for the duration of the transaction so two
    /// concurrent replaces of the same transfer cannot interleave their
    /// delete and insert of link rows. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &TransferInput,
    ) -> Result<Option<Transfer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM transfers WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let update_query = format!(
            "UPDATE transfers SET \
                car_id = $2, \
                driver_id = $3, \
                transfer_start_time = $4, \
                transfer_finish_time = $5, \
                transfer_start_place = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let transfer = sqlx::query_as::<_, Transfer>(&update_query)
            .bind(id)
            .bind(input.car_id)
            .bind(input.driver_id)
            .bind(input.window.start)
            .bind(input.window.finish)
            .bind(&input.transfer_start_place)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM transfer_details WHERE transfer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::insert_details_inner(&mut tx, id, &input.passenger_ids).await?;

        tx.commit().await?;
        tracing::debug!(
            transfer_id = id,
            passengers = input.passenger_ids.len(),
            "Transfer replaced"
        );
        Ok(Some(transfer))
    }

    /// Find a transfer row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transfer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transfers WHERE id = $1");
        sqlx::query_as::<_, Transfer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a transfer by ID with its car, driver and passengers loaded.
    pub async fn find_by_id_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TransferWithRelations>, sqlx::Error> {
        let query = format!("{JOIN_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TransferJoinRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let passengers = Self::passengers_for(pool, &[row.id]).await?;
                Ok(Some(row.into_relations(passengers)))
            }
            None => Ok(None),
        }
    }

    /// List one page of fully loaded transfers, newest first, with the total count.
    pub async fn list_with_relations(
        pool: &PgPool,
        page: &Page,
    ) -> Result<(Vec<TransferWithRelations>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
            .fetch_one(pool)
            .await?;

        let query = format!(
            "{JOIN_SELECT} \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, TransferJoinRow>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut by_transfer: HashMap<DbId, Vec<TransferPassenger>> = HashMap::new();
        for passenger in Self::passengers_for(pool, &ids).await? {
            by_transfer
                .entry(passenger.transfer_id)
                .or_default()
                .push(passenger);
        }

        let transfers = rows
            .into_iter()
            .map(|row| {
                let passengers = by_transfer.remove(&row.id).unwrap_or_default();
                row.into_relations(passengers)
            })
            .collect();

        Ok((transfers, total))
    }

    /// Delete a transfer. Its passenger links are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link rows of a transfer in insertion order.
    pub async fn details_for(
        pool: &PgPool,
        transfer_id: DbId,
    ) -> Result<Vec<TransferDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM transfer_details \
             WHERE transfer_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, TransferDetail>(&query)
            .bind(transfer_id)
            .fetch_all(pool)
            .await
    }

    /// Passengers linked to any of `transfer_ids`, one entry per link row,
    /// ordered by link insertion.
    pub async fn passengers_for(
        pool: &PgPool,
        transfer_ids: &[DbId],
    ) -> Result<Vec<TransferPassenger>, sqlx::Error> {
        if transfer_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, TransferPassenger>(
            "SELECT td.id AS transfer_detail_id, td.transfer_id, td.passenger_id, \
                    p.name, p.surname, p.phone, p.passenger_type \
             FROM transfer_details td \
             JOIN passengers p ON p.id = td.passenger_id \
             WHERE td.transfer_id = ANY($1) \
             ORDER BY td.id",
        )
        .bind(transfer_ids)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    /// Transfers of a car or driver whose window overlaps `window` (inclusive).
    pub async fn find_overlapping(
        pool: &PgPool,
        kind: EntityKind,
        entity_id: DbId,
        window: &TimeWindow,
    ) -> Result<Vec<Transfer>, sqlx::Error> {
        let column = kind.transfer_column();
        let query = format!(
            "SELECT {COLUMNS} FROM transfers \
             WHERE {column} = $1 \
               AND transfer_start_time <= $3 \
               AND transfer_finish_time >= $2 \
             ORDER BY transfer_start_time, id"
        );
        sqlx::query_as::<_, Transfer>(&query)
            .bind(entity_id)
            .bind(window.start)
            .bind(window.finish)
            .fetch_all(pool)
            .await
    }

    /// Whether a car or driver has no transfer overlapping `window`.
    pub async fn is_available(
        pool: &PgPool,
        kind: EntityKind,
        entity_id: DbId,
        window: &TimeWindow,
    ) -> Result<bool, sqlx::Error> {
        let busy = overlapping_transfer_exists(kind, "$1", "$2", "$3");
        let busy: bool = sqlx::query_scalar(&format!("SELECT {busy}"))
            .bind(entity_id)
            .bind(window.start)
            .bind(window.finish)
            .fetch_one(pool)
            .await?;
        Ok(!busy)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert one link row per passenger id, in order, within an existing transaction.
    async fn insert_details_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        transfer_id: DbId,
        passenger_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for &passenger_id in passenger_ids {
            sqlx::query("INSERT INTO transfer_details (transfer_id, passenger_id) VALUES ($1, $2)")
                .bind(transfer_id)
                .bind(passenger_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}
