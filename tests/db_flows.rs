//! Transactional flows exercised against a live Postgres database.
//!
//! Each test connects to `DATABASE_URL` and skips when the variable is unset,
//! so the suite stays green on machines without a database. Point it at a
//! disposable database; migrations run on first connect and fixtures use
//! unique names, so repeated runs do not collide.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::postgres::PgPoolOptions;

use ecoverse_api::database::users::{apply_delta, create_user, get_user, BalanceDelta};
use ecoverse_api::database::{pets, shop, DbPool};
use ecoverse_api::error::ApiError;

async fn test_pool() -> Option<DbPool> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");
    Some(pool)
}

fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}_{nanos}_{}", COUNTER.fetch_add(1, Ordering::Relaxed))
}

async fn new_user(pool: &DbPool) -> i64 {
    let name = unique("walker");
    create_user(pool, &name, &format!("{name}@example.com"), "not-a-real-hash")
        .await
        .unwrap()
}

async fn new_item(pool: &DbPool, cost_gp: i64) -> (i64, String) {
    let name = unique("compost_bin");
    let (item_id,): (i64,) = sqlx::query_as(
        "INSERT INTO items (name, description, item_type, cost_gp) \
         VALUES ($1, 'A sturdy bin.', 'tool', $2) RETURNING item_id",
    )
    .bind(&name)
    .bind(cost_gp)
    .fetch_one(pool)
    .await
    .unwrap();
    (item_id, name)
}

async fn new_pet(pool: &DbPool, owner_id: i64) -> i64 {
    let (pet_id,): (i64,) =
        sqlx::query_as("INSERT INTO plant_pets (owner_id) VALUES ($1) RETURNING pet_id")
            .bind(owner_id)
            .fetch_one(pool)
            .await
            .unwrap();
    pet_id
}

async fn active_pet_count(pool: &DbPool, owner_id: i64) -> i64 {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM plant_pets WHERE owner_id = $1 AND is_active")
            .bind(owner_id)
            .fetch_one(pool)
            .await
            .unwrap();
    count
}

#[tokio::test]
async fn purchase_debits_balance_and_appends_inventory() {
    let Some(pool) = test_pool().await else { return };
    let user_id = new_user(&pool).await;
    let (item_id, item_name) = new_item(&pool, 100).await;

    apply_delta(
        &pool,
        user_id,
        BalanceDelta {
            gp: 150,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let item = shop::purchase(&pool, user_id, item_id).await.unwrap();
    assert_eq!(item.name, item_name);

    let user = get_user(&pool, user_id).await.unwrap();
    assert_eq!(user.green_points, 50);
    assert_eq!(shop::get_inventory(&pool, user_id).await.unwrap(), vec![item_name]);
}

#[tokio::test]
async fn failed_purchase_leaves_balance_and_inventory_untouched() {
    let Some(pool) = test_pool().await else { return };
    let user_id = new_user(&pool).await;
    let (item_id, _) = new_item(&pool, 100).await;

    apply_delta(
        &pool,
        user_id,
        BalanceDelta {
            gp: 50,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = shop::purchase(&pool, user_id, item_id).await.unwrap_err();
    assert!(matches!(err, ApiError::InsufficientFunds(_)));

    let user = get_user(&pool, user_id).await.unwrap();
    assert_eq!(user.green_points, 50);
    assert!(shop::get_inventory(&pool, user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn purchase_of_unknown_item_is_not_found() {
    let Some(pool) = test_pool().await else { return };
    let user_id = new_user(&pool).await;

    let err = shop::purchase(&pool, user_id, i64::MAX).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn set_active_keeps_exactly_one_pet_active() {
    let Some(pool) = test_pool().await else { return };
    let user_id = new_user(&pool).await;
    let first = new_pet(&pool, user_id).await;
    let second = new_pet(&pool, user_id).await;

    let pet = pets::set_active(&pool, user_id, first).await.unwrap();
    assert!(pet.is_active);
    assert_eq!(active_pet_count(&pool, user_id).await, 1);

    // Switching hands the flag over rather than stacking a second active pet.
    let pet = pets::set_active(&pool, user_id, second).await.unwrap();
    assert_eq!(pet.pet_id, second);
    assert_eq!(active_pet_count(&pool, user_id).await, 1);

    let active = pets::get_active_pet(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(active.pet_id, second);
}

#[tokio::test]
async fn set_active_rejects_another_users_pet() {
    let Some(pool) = test_pool().await else { return };
    let owner = new_user(&pool).await;
    let intruder = new_user(&pool).await;
    let pet_id = new_pet(&pool, owner).await;

    pets::set_active(&pool, owner, pet_id).await.unwrap();

    let err = pets::set_active(&pool, intruder, pet_id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    // The owner's selection survives the failed attempt.
    let active = pets::get_active_pet(&pool, owner).await.unwrap().unwrap();
    assert_eq!(active.pet_id, pet_id);
    assert_eq!(active_pet_count(&pool, owner).await, 1);
}

#[tokio::test]
async fn evolve_consumes_distance_and_bumps_requirement() {
    let Some(pool) = test_pool().await else { return };
    let user_id = new_user(&pool).await;
    let pet_id = new_pet(&pool, user_id).await;

    apply_delta(
        &pool,
        user_id,
        BalanceDelta {
            distance: 1200,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let outcome = pets::evolve(&pool, user_id, pet_id).await.unwrap();
    assert_eq!(outcome.new_stage, 2);
    assert_eq!(outcome.new_distance_required, 1500);

    let user = get_user(&pool, user_id).await.unwrap();
    assert_eq!(user.distance_walked, 200);

    // Not enough banked distance left for the next stage.
    let err = pets::evolve(&pool, user_id, pet_id).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidState(_)));
    let user = get_user(&pool, user_id).await.unwrap();
    assert_eq!(user.distance_walked, 200);
}
