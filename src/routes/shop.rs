//! Eco-Shop routes: catalog and purchases.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use super::{authenticate, json_response, ResponseBody};
use crate::database::shop as db;
use crate::error::ApiError;
use crate::server::AppState;

/// Public catalog listing.
pub async fn items(state: &AppState) -> Result<Response<ResponseBody>, ApiError> {
    let items = db::list_items(&state.pool).await?;
    Ok(json_response(StatusCode::OK, &items))
}

pub async fn buy(
    state: &AppState,
    req: &Request<Incoming>,
    item_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let item = db::purchase(&state.pool, user_id, item_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({
            "msg": format!("Successfully purchased {}!", item.name),
            "item": item.name,
            "cost": item.cost_gp,
        }),
    ))
}
