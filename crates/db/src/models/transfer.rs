//! Transfer aggregate: the transfer row, its passenger links, and the
//! fully loaded shape used for responses.

use serde::Serialize;
use sqlx::FromRow;
use transferhub_core::availability::TimeWindow;
use transferhub_core::types::{DbId, Timestamp, WindowTime};

use super::car::Car;
use super::driver::Driver;

/// A row from the `transfers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transfer {
    pub id: DbId,
    pub car_id: DbId,
    pub driver_id: DbId,
    pub transfer_start_time: WindowTime,
    pub transfer_finish_time: WindowTime,
    pub transfer_start_place: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Transfer {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.transfer_start_time, self.transfer_finish_time)
    }
}

/// A row from the `transfer_details` table linking one transfer to one passenger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransferDetail {
    pub id: DbId,
    pub transfer_id: DbId,
    pub passenger_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A passenger as seen through one of a transfer's link rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransferPassenger {
    pub transfer_detail_id: DbId,
    pub transfer_id: DbId,
    pub passenger_id: DbId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub passenger_type: String,
}

/// A transfer with its car, driver and passenger links loaded.
#[derive(Debug, Clone, Serialize)]
pub struct TransferWithRelations {
    #[serde(flatten)]
    pub transfer: Transfer,
    pub car: Car,
    pub driver: Driver,
    /// Link order, duplicates included.
    pub passengers: Vec<TransferPassenger>,
}

/// One `transfers` row joined with its car and driver columns.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TransferJoinRow {
    pub id: DbId,
    pub car_id: DbId,
    pub driver_id: DbId,
    pub transfer_start_time: WindowTime,
    pub transfer_finish_time: WindowTime,
    pub transfer_start_place: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub car_plate: String,
    pub car_model: String,
    pub car_created_at: Timestamp,
    pub car_updated_at: Timestamp,
    pub driver_full_name: String,
    pub driver_tc: String,
    pub driver_created_at: Timestamp,
    pub driver_updated_at: Timestamp,
}

impl TransferJoinRow {
    pub(crate) fn into_relations(self, passengers: Vec<TransferPassenger>) -> TransferWithRelations {
        TransferWithRelations {
            car: Car {
                id: self.car_id,
                plate: self.car_plate,
                model: self.car_model,
                created_at: self.car_created_at,
                updated_at: self.car_updated_at,
            },
            driver: Driver {
                id: self.driver_id,
                full_name: self.driver_full_name,
                tc: self.driver_tc,
                created_at: self.driver_created_at,
                updated_at: self.driver_updated_at,
            },
            transfer: Transfer {
                id: self.id,
                car_id: self.car_id,
                driver_id: self.driver_id,
                transfer_start_time: self.transfer_start_time,
                transfer_finish_time: self.transfer_finish_time,
                transfer_start_place: self.transfer_start_place,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            passengers,
        }
    }
}
