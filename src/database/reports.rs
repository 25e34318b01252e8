//! User-filed reports against eco-spots. Reports enter as `New`; status
//! transitions are handled by an operations tool, not this API.

use super::ecospots::spot_exists;
use super::models::Report;
use super::DbPool;
use crate::error::ApiError;

pub async fn create_report(
    pool: &DbPool,
    reporter_id: i64,
    spot_id: i64,
    report_type: &str,
    description: &str,
) -> Result<Report, ApiError> {
    if !spot_exists(pool, spot_id).await? {
        return Err(ApiError::NotFound("EcoSpot not found.".to_string()));
    }
    let report = sqlx::query_as::<_, Report>(
        "INSERT INTO reports (reporter_id, spot_id, report_type, description) \
         VALUES ($1, $2, $3, $4) \
         RETURNING report_id, reporter_id, spot_id, report_type, description, status, created_at",
    )
    .bind(reporter_id)
    .bind(spot_id)
    .bind(report_type)
    .bind(description)
    .fetch_one(pool)
    .await?;
    Ok(report)
}
