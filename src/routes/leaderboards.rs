//! Leaderboard routes.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};

use super::{authenticate, json_response, query_param, ResponseBody};
use crate::database::leaderboard::{clamp_limit, top_users as query_top, LeaderboardCategory};
use crate::error::ApiError;
use crate::server::AppState;

pub async fn top_users(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    authenticate(state, req)?;
    let category = LeaderboardCategory::from_query(query_param(req, "category").as_deref());
    let limit = clamp_limit(query_param(req, "limit").and_then(|v| v.parse().ok()));
    let entries = query_top(&state.pool, category, limit).await?;
    Ok(json_response(StatusCode::OK, &entries))
}
