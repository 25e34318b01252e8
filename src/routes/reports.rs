//! Report submission routes.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;

use super::{authenticate, json_response, read_json, ResponseBody};
use crate::database::reports as db;
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub eco_spot_id: i64,
    pub report_type: String,
    pub description: String,
}

pub async fn create(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: CreateReportRequest = read_json(req).await?;
    if body.report_type.trim().is_empty() || body.description.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Report type and description are required.".to_string(),
        ));
    }
    let report = db::create_report(
        &state.pool,
        user_id,
        body.eco_spot_id,
        body.report_type.trim(),
        body.description.trim(),
    )
    .await?;
    Ok(json_response(StatusCode::CREATED, &report))
}
