//! Read-only eco-spot queries. Geospatial filtering stays client-side for the
//! MVP; the core only lists spots and verifies deposit targets exist.

use super::models::EcoSpot;
use super::DbPool;
use crate::error::ApiError;

pub async fn list_spots(pool: &DbPool) -> Result<Vec<EcoSpot>, ApiError> {
    let spots = sqlx::query_as::<_, EcoSpot>(
        "SELECT spot_id, name, spot_type, longitude, latitude, material_accepted, current_status \
         FROM eco_spots ORDER BY spot_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(spots)
}

pub async fn spot_exists(pool: &DbPool, spot_id: i64) -> Result<bool, ApiError> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM eco_spots WHERE spot_id = $1)")
            .bind(spot_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
