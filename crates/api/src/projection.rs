//! Wire representations of stored entities.
//!
//! Projection is a pure mapping from loaded rows: scalar fields pass
//! through, related rows are nested in a compact form, and every date-time
//! is rendered in the `DD.MM.YYYY HH:MM:SS` format.

use serde::Serialize;
use transferhub_core::pagination::PageMeta;
use transferhub_core::types::{DbId, Timestamp, WindowTime};
use transferhub_core::wire_time;
use transferhub_db::models::car::Car;
use transferhub_db::models::driver::Driver;
use transferhub_db::models::passenger::Passenger;
use transferhub_db::models::transfer::{TransferPassenger, TransferWithRelations};

#[derive(Debug, Clone, Serialize)]
pub struct CarResource {
    pub id: DbId,
    pub plate: String,
    pub model: String,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub updated_at: Timestamp,
}

impl From<Car> for CarResource {
    fn from(car: Car) -> Self {
        Self {
            id: car.id,
            plate: car.plate,
            model: car.model,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DriverResource {
    pub id: DbId,
    pub full_name: String,
    pub tc: String,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub updated_at: Timestamp,
}

impl From<Driver> for DriverResource {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            full_name: driver.full_name,
            tc: driver.tc,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PassengerResource {
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub passenger_type: String,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub updated_at: Timestamp,
}

impl From<Passenger> for PassengerResource {
    fn from(p: Passenger) -> Self {
        Self {
            id: p.id,
            name: p.name,
            surname: p.surname,
            phone: p.phone,
            passenger_type: p.passenger_type,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// A passenger as listed on a transfer, tagged with its link row id.
#[derive(Debug, Clone, Serialize)]
pub struct TransferPassengerResource {
    pub transfer_detail_id: DbId,
    pub id: DbId,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub passenger_type: String,
}

impl From<TransferPassenger> for TransferPassengerResource {
    fn from(p: TransferPassenger) -> Self {
        Self {
            transfer_detail_id: p.transfer_detail_id,
            id: p.passenger_id,
            name: p.name,
            surname: p.surname,
            phone: p.phone,
            passenger_type: p.passenger_type,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferResource {
    pub id: DbId,
    pub car: CarResource,
    pub driver: DriverResource,
    pub passengers: Vec<TransferPassengerResource>,
    #[serde(serialize_with = "wire_time::serialize")]
    pub transfer_start_time: WindowTime,
    #[serde(serialize_with = "wire_time::serialize")]
    pub transfer_finish_time: WindowTime,
    pub transfer_start_place: String,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "wire_time::serialize_timestamp")]
    pub updated_at: Timestamp,
}

impl From<TransferWithRelations> for TransferResource {
    fn from(loaded: TransferWithRelations) -> Self {
        let TransferWithRelations {
            transfer,
            car,
            driver,
            passengers,
        } = loaded;
        Self {
            id: transfer.id,
            car: car.into(),
            driver: driver.into(),
            passengers: passengers.into_iter().map(Into::into).collect(),
            transfer_start_time: transfer.transfer_start_time,
            transfer_finish_time: transfer.transfer_finish_time,
            transfer_start_place: transfer.transfer_start_place,
            created_at: transfer.created_at,
            updated_at: transfer.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// `data` payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CarData {
    pub car: CarResource,
}

#[derive(Debug, Serialize)]
pub struct CarList {
    pub cars: Vec<CarResource>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct DriverData {
    pub driver: DriverResource,
}

#[derive(Debug, Serialize)]
pub struct DriverList {
    pub drivers: Vec<DriverResource>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct PassengerData {
    pub passenger: PassengerResource,
}

#[derive(Debug, Serialize)]
pub struct PassengerList {
    pub passengers: Vec<PassengerResource>,
    pub pagination: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct TransferData {
    pub transfer: TransferResource,
}

#[derive(Debug, Serialize)]
pub struct TransferList {
    pub transfers: Vec<TransferResource>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use transferhub_db::models::transfer::Transfer;

    use super::*;

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    fn at(hour: u32) -> WindowTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn link(detail_id: DbId, passenger_id: DbId) -> TransferPassenger {
        TransferPassenger {
            transfer_detail_id: detail_id,
            transfer_id: 1,
            passenger_id,
            name: "Ayse".into(),
            surname: "Yilmaz".into(),
            phone: "+905551112233".into(),
            passenger_type: "adult".into(),
        }
    }

    fn loaded() -> TransferWithRelations {
        TransferWithRelations {
            transfer: Transfer {
                id: 1,
                car_id: 2,
                driver_id: 3,
                transfer_start_time: at(10),
                transfer_finish_time: at(12),
                transfer_start_place: "Airport".into(),
                created_at: ts(),
                updated_at: ts(),
            },
            car: Car {
                id: 2,
                plate: "34ABC123".into(),
                model: "Sedan".into(),
                created_at: ts(),
                updated_at: ts(),
            },
            driver: Driver {
                id: 3,
                full_name: "X Y".into(),
                tc: "12345678901".into(),
                created_at: ts(),
                updated_at: ts(),
            },
            passengers: vec![link(10, 7), link(11, 7), link(12, 8)],
        }
    }

    #[test]
    fn transfer_projection_shape() {
        let value = serde_json::to_value(TransferResource::from(loaded())).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["car"]["plate"], "34ABC123");
        assert_eq!(value["driver"]["tc"], "12345678901");
        assert_eq!(value["transfer_start_time"], "01.01.2024 10:00:00");
        assert_eq!(value["transfer_finish_time"], "01.01.2024 12:00:00");
        assert_eq!(value["created_at"], "01.01.2024 08:00:00");
        assert_eq!(value["transfer_start_place"], "Airport");
    }

    #[test]
    fn transfer_projection_keeps_link_order_and_duplicates() {
        let resource = TransferResource::from(loaded());
        let ids: Vec<DbId> = resource.passengers.iter().map(|p| p.id).collect();
        let links: Vec<DbId> = resource
            .passengers
            .iter()
            .map(|p| p.transfer_detail_id)
            .collect();
        assert_eq!(ids, vec![7, 7, 8]);
        assert_eq!(links, vec![10, 11, 12]);
    }

    #[test]
    fn car_projection_formats_timestamps() {
        let value = serde_json::to_value(CarResource::from(loaded().car)).unwrap();
        assert_eq!(value["updated_at"], "01.01.2024 08:00:00");
        assert_eq!(value["model"], "Sedan");
    }
}
