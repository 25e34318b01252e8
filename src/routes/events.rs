//! Community event routes.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use super::{authenticate, json_response, ResponseBody};
use crate::database::events as db;
use crate::error::ApiError;
use crate::server::AppState;

pub async fn upcoming(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    authenticate(state, req)?;
    let events = db::upcoming_events(&state.pool).await?;
    Ok(json_response(StatusCode::OK, &events))
}

pub async fn join(
    state: &AppState,
    req: &Request<Incoming>,
    event_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let event = db::join_event(&state.pool, user_id, event_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "msg": "Successfully joined event!", "event": event }),
    ))
}

pub async fn cancel_join(
    state: &AppState,
    req: &Request<Incoming>,
    event_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let event = db::cancel_join(&state.pool, user_id, event_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "msg": "Successfully cancelled registration.", "event": event }),
    ))
}
