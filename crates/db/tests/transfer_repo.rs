//! Integration tests for the transfer write transaction, relation loading
//! and the availability queries.

use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use transferhub_core::availability::{EntityKind, TimeWindow};
use transferhub_core::pagination::Page;
use transferhub_core::passenger_type::PassengerType;
use transferhub_core::validation::{CarInput, DriverInput, PassengerInput, TransferInput};
use transferhub_db::repositories::{CarRepo, DriverRepo, PassengerRepo, TransferRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

struct Seed {
    car_id: i64,
    driver_id: i64,
    passengers: Vec<i64>,
}

async fn seed(pool: &PgPool) -> Seed {
    let car = CarRepo::create(
        pool,
        &CarInput {
            plate: "34ABC123".into(),
            model: "Sedan".into(),
        },
    )
    .await
    .unwrap();
    let driver = DriverRepo::create(
        pool,
        &DriverInput {
            full_name: "Mehmet Kaya".into(),
            tc: "12345678901".into(),
        },
    )
    .await
    .unwrap();

    let mut passengers = Vec::new();
    for (name, passenger_type) in [("Ayse", PassengerType::Adult), ("Can", PassengerType::Child)] {
        let passenger = PassengerRepo::create(
            pool,
            &PassengerInput {
                name: name.into(),
                surname: "Yilmaz".into(),
                phone: "+905551112233".into(),
                passenger_type,
            },
        )
        .await
        .unwrap();
        passengers.push(passenger.id);
    }

    Seed {
        car_id: car.id,
        driver_id: driver.id,
        passengers,
    }
}

fn input(seed: &Seed, window: TimeWindow, passenger_ids: Vec<i64>) -> TransferInput {
    TransferInput {
        car_id: seed.car_id,
        driver_id: seed.driver_id,
        window,
        transfer_start_place: "Istanbul Airport".into(),
        passenger_ids,
    }
}

fn morning() -> TimeWindow {
    TimeWindow::new(at(1, 10, 0), at(1, 12, 0))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_writes_one_link_per_id_in_order(pool: PgPool) {
    let seed = seed(&pool).await;
    let (a, b) = (seed.passengers[0], seed.passengers[1]);

    let transfer = TransferRepo::create(&pool, &input(&seed, morning(), vec![b, a, b]))
        .await
        .unwrap();

    let details = TransferRepo::details_for(&pool, transfer.id).await.unwrap();
    let linked: Vec<i64> = details.iter().map(|d| d.passenger_id).collect();
    assert_eq!(linked, vec![b, a, b]);
    assert_eq!(transfer.window(), morning());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_create_leaves_nothing_behind(pool: PgPool) {
    let seed = seed(&pool).await;

    // A dangling passenger id makes the last link insert fail.
    let result =
        TransferRepo::create(&pool, &input(&seed, morning(), vec![seed.passengers[0], 999_999]))
            .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    let transfers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
        .fetch_one(&pool)
        .await
        .unwrap();
    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfer_details")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(transfers, 0);
    assert_eq!(links, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_swaps_fields_and_link_set(pool: PgPool) {
    let seed = seed(&pool).await;
    let (a, b) = (seed.passengers[0], seed.passengers[1]);
    let created = TransferRepo::create(&pool, &input(&seed, morning(), vec![a, b]))
        .await
        .unwrap();

    let evening = TimeWindow::new(at(1, 18, 0), at(1, 19, 30));
    let replaced = TransferRepo::replace(&pool, created.id, &input(&seed, evening, vec![b]))
        .await
        .unwrap()
        .expect("transfer exists");

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.window(), evening);
    let details = TransferRepo::details_for(&pool, created.id).await.unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].passenger_id, b);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_replace_keeps_previous_state(pool: PgPool) {
    let seed = seed(&pool).await;
    let a = seed.passengers[0];
    let created = TransferRepo::create(&pool, &input(&seed, morning(), vec![a]))
        .await
        .unwrap();

    let evening = TimeWindow::new(at(1, 18, 0), at(1, 19, 0));
    let result = TransferRepo::replace(&pool, created.id, &input(&seed, evening, vec![999_999])).await;
    assert!(result.is_err());

    let current = TransferRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.window(), morning());
    let details = TransferRepo::details_for(&pool, created.id).await.unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].passenger_id, a);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_missing_transfer_returns_none(pool: PgPool) {
    let seed = seed(&pool).await;
    let result = TransferRepo::replace(&pool, 424_242, &input(&seed, morning(), vec![seed.passengers[0]]))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_cascades_to_links_but_not_passengers(pool: PgPool) {
    let seed = seed(&pool).await;
    let transfer = TransferRepo::create(&pool, &input(&seed, morning(), seed.passengers.clone()))
        .await
        .unwrap();

    assert!(TransferRepo::delete(&pool, transfer.id).await.unwrap());
    assert!(!TransferRepo::delete(&pool, transfer.id).await.unwrap());

    assert!(TransferRepo::details_for(&pool, transfer.id).await.unwrap().is_empty());
    for id in &seed.passengers {
        assert!(PassengerRepo::find_by_id(&pool, *id).await.unwrap().is_some());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn referenced_rows_cannot_be_deleted(pool: PgPool) {
    let seed = seed(&pool).await;
    TransferRepo::create(&pool, &input(&seed, morning(), vec![seed.passengers[0]]))
        .await
        .unwrap();

    let car = CarRepo::delete(&pool, seed.car_id).await;
    assert_matches!(car, Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23503"));
    let driver = DriverRepo::delete(&pool, seed.driver_id).await;
    assert_matches!(driver, Err(sqlx::Error::Database(_)));
    let passenger = PassengerRepo::delete(&pool, seed.passengers[0]).await;
    assert_matches!(passenger, Err(sqlx::Error::Database(_)));

    // The unlinked passenger is free to go.
    assert!(PassengerRepo::delete(&pool, seed.passengers[1]).await.unwrap());
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn relations_are_loaded_in_link_order(pool: PgPool) {
    let seed = seed(&pool).await;
    let (a, b) = (seed.passengers[0], seed.passengers[1]);
    let transfer = TransferRepo::create(&pool, &input(&seed, morning(), vec![b, a]))
        .await
        .unwrap();

    let loaded = TransferRepo::find_by_id_with_relations(&pool, transfer.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded.car.plate, "34ABC123");
    assert_eq!(loaded.driver.tc, "12345678901");
    let names: Vec<&str> = loaded.passengers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Can", "Ayse"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_groups_passengers_per_transfer(pool: PgPool) {
    let seed = seed(&pool).await;
    let (a, b) = (seed.passengers[0], seed.passengers[1]);
    let first = TransferRepo::create(&pool, &input(&seed, morning(), vec![a]))
        .await
        .unwrap();
    let second = TransferRepo::create(
        &pool,
        &input(&seed, TimeWindow::new(at(2, 8, 0), at(2, 9, 0)), vec![a, b]),
    )
    .await
    .unwrap();

    let (transfers, total) = TransferRepo::list_with_relations(&pool, &Page::default())
        .await
        .unwrap();

    assert_eq!(total, 2);
    assert_eq!(transfers[0].transfer.id, second.id);
    assert_eq!(transfers[0].passengers.len(), 2);
    assert_eq!(transfers[1].transfer.id, first.id);
    assert_eq!(transfers[1].passengers.len(), 1);
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn availability_uses_inclusive_endpoints(pool: PgPool) {
    let seed = seed(&pool).await;
    TransferRepo::create(&pool, &input(&seed, morning(), vec![seed.passengers[0]]))
        .await
        .unwrap();

    let cases = [
        (TimeWindow::new(at(1, 11, 0), at(1, 13, 0)), false),
        (TimeWindow::new(at(1, 12, 0), at(1, 13, 0)), false),
        (TimeWindow::new(at(1, 8, 0), at(1, 10, 0)), false),
        (TimeWindow::new(at(1, 9, 0), at(1, 14, 0)), false),
        (TimeWindow::new(at(1, 12, 1), at(1, 13, 0)), true),
        (TimeWindow::new(at(1, 7, 0), at(1, 9, 59)), true),
    ];

    for (window, expected) in cases {
        for (kind, id) in [
            (EntityKind::Car, seed.car_id),
            (EntityKind::Driver, seed.driver_id),
        ] {
            let available = TransferRepo::is_available(&pool, kind, id, &window)
                .await
                .unwrap();
            assert_eq!(available, expected, "{kind:?} for {window:?}");
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_overlapping_returns_conflicting_transfers(pool: PgPool) {
    let seed = seed(&pool).await;
    let morning_transfer = TransferRepo::create(&pool, &input(&seed, morning(), vec![seed.passengers[0]]))
        .await
        .unwrap();
    TransferRepo::create(
        &pool,
        &input(&seed, TimeWindow::new(at(1, 15, 0), at(1, 16, 0)), vec![seed.passengers[0]]),
    )
    .await
    .unwrap();

    let probe = TimeWindow::new(at(1, 11, 30), at(1, 12, 30));
    let found = TransferRepo::find_overlapping(&pool, EntityKind::Driver, seed.driver_id, &probe)
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, morning_transfer.id);
}
