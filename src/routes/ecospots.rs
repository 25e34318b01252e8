//! Eco-spot listing routes.

use hyper::{Response, StatusCode};

use super::{json_response, ResponseBody};
use crate::database::ecospots as db;
use crate::error::ApiError;
use crate::server::AppState;

/// Public list of spots; the MVP client filters by proximity itself.
pub async fn nearby(state: &AppState) -> Result<Response<ResponseBody>, ApiError> {
    let spots = db::list_spots(&state.pool).await?;
    Ok(json_response(StatusCode::OK, &spots))
}
