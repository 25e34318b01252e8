//! Mission submission: recycling deposits at eco-spots.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{authenticate, json_response, read_json, ResponseBody};
use crate::database::users::{apply_delta, BalanceDelta};
use crate::database::{ecospots, DbPool};
use crate::error::ApiError;
use crate::game::rewards::deposit_reward;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub eco_spot_id: Option<i64>,
    pub points: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub xp_earned: i64,
    pub gp_earned: i64,
    #[serde(rename = "newXP")]
    pub new_xp: i64,
    #[serde(rename = "newGP")]
    pub new_gp: i64,
}

/// Accepts an aggregated deposit score, credits the reward, and counts the
/// points toward the user's collected total.
pub async fn submit_deposit(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: DepositRequest = read_json(req).await?;

    let spot_id = body.eco_spot_id.ok_or_else(|| {
        ApiError::InvalidInput("Missing EcoSpot ID or points data.".to_string())
    })?;
    let points = body.points.ok_or_else(|| {
        ApiError::InvalidInput("Missing EcoSpot ID or points data.".to_string())
    })?;

    let reward = deposit_reward(points)?;
    verify_spot(&state.pool, spot_id).await?;

    let balances = apply_delta(
        &state.pool,
        user_id,
        BalanceDelta {
            xp: reward.xp,
            gp: reward.gp,
            collected: points,
            ..Default::default()
        },
    )
    .await?;

    Ok(json_response(
        StatusCode::OK,
        &DepositResponse {
            xp_earned: reward.xp,
            gp_earned: reward.gp,
            new_xp: balances.xp,
            new_gp: balances.green_points,
        },
    ))
}

async fn verify_spot(pool: &DbPool, spot_id: i64) -> Result<(), ApiError> {
    if ecospots::spot_exists(pool, spot_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound("EcoSpot not found.".to_string()))
    }
}
