//! Quest catalog routes.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};

use super::{authenticate, json_response, ResponseBody};
use crate::database::quests as db;
use crate::error::ApiError;
use crate::server::AppState;

pub async fn active(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    authenticate(state, req)?;
    let quests = db::active_quests(&state.pool).await?;
    Ok(json_response(StatusCode::OK, &quests))
}
