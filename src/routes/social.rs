//! Social routes: user search and the friend-request lifecycle.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use super::{authenticate, json_response, query_param, ResponseBody};
use crate::database::social as db;
use crate::error::ApiError;
use crate::server::AppState;

pub async fn search(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let query = query_param(req, "query")
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Search query is required.".to_string()))?;
    let users = db::search_users(&state.pool, user_id, &query).await?;
    Ok(json_response(StatusCode::OK, &users))
}

pub async fn send_request(
    state: &AppState,
    req: &Request<Incoming>,
    target_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let sender_id = authenticate(state, req)?;
    let outcome = db::send_request(&state.pool, sender_id, target_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "status": outcome.as_status() }),
    ))
}

pub async fn accept_request(
    state: &AppState,
    req: &Request<Incoming>,
    sender_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let acceptor_id = authenticate(state, req)?;
    db::accept_request(&state.pool, acceptor_id, sender_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "acceptorId": acceptor_id }),
    ))
}

pub async fn friends(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let friends = db::get_friends(&state.pool, user_id).await?;
    let requests = db::get_pending_requests(&state.pool, user_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "friends": friends, "requests": requests }),
    ))
}
