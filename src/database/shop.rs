//! The Eco-Shop: item catalog, purchases, and the general inventory.

use super::models::{Item, ItemListing};
use super::users::spend_green_points;
use super::DbPool;
use crate::error::ApiError;

const ITEM_COLUMNS: &str = "item_id, name, description, item_type, cost_gp, effect, icon";

/// Catalog listing; the `effect` internals stay server-side.
pub async fn list_items(pool: &DbPool) -> Result<Vec<ItemListing>, ApiError> {
    let items = sqlx::query_as::<_, ItemListing>(
        "SELECT item_id, name, description, item_type, cost_gp, icon FROM items ORDER BY item_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Buys an item with Green Points.
///
/// The balance precondition and the decrement are a single conditional update
/// inside one transaction with the inventory append, so concurrent purchases
/// can never drive the balance negative.
pub async fn purchase(pool: &DbPool, user_id: i64, item_id: i64) -> Result<Item, ApiError> {
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, Item>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE item_id = $1"
    ))
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::NotFound("Item not found.".to_string()))?;

    let user: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
    if user.is_none() {
        return Err(ApiError::NotFound("User not found.".to_string()));
    }

    spend_green_points(&mut tx, user_id, item.cost_gp).await?;

    sqlx::query("INSERT INTO user_inventory (user_id, item_name) VALUES ($1, $2)")
        .bind(user_id)
        .bind(&item.name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(item)
}

/// Item names the user owns, in acquisition order.
pub async fn get_inventory(pool: &DbPool, user_id: i64) -> Result<Vec<String>, ApiError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT item_name FROM user_inventory WHERE user_id = $1 ORDER BY entry_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}
