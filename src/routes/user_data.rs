//! Player-facing profile and balance routes.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{authenticate, json_response, read_json, ResponseBody};
use crate::database::users as db;
use crate::database::{models::User, shop};
use crate::error::ApiError;
use crate::game::leveling::level_of;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub username: String,
    #[serde(rename = "XP")]
    pub xp: i64,
    #[serde(rename = "GP")]
    pub gp: i64,
    pub rank: String,
    pub avatar_id: String,
    pub level: i32,
    pub progress_fraction: f64,
    pub xp_progress: i64,
    pub xp_required_this_level: i64,
}

/// Essential stats for the map screen and navbar.
pub async fn summary(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let user = db::get_user(&state.pool, user_id).await?;
    let level = level_of(user.xp);

    Ok(json_response(
        StatusCode::OK,
        &SummaryResponse {
            username: user.username,
            xp: user.xp,
            gp: user.green_points,
            rank: user.current_rank,
            avatar_id: user.avatar_id,
            level: level.level,
            progress_fraction: level.progress_fraction(),
            xp_progress: level.xp_into_level,
            xp_required_this_level: level.xp_needed_this_level,
        },
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub level: i32,
    pub progress_fraction: f64,
    pub xp_progress: i64,
    pub xp_required_this_level: i64,
    pub inventory: Vec<String>,
}

/// Everything the profile screen needs.
pub async fn full_profile(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let user = db::get_user(&state.pool, user_id).await?;
    let inventory = shop::get_inventory(&state.pool, user_id).await?;
    let level = level_of(user.xp);

    Ok(json_response(
        StatusCode::OK,
        &FullProfileResponse {
            level: level.level,
            progress_fraction: level.progress_fraction(),
            xp_progress: level.xp_into_level,
            xp_required_this_level: level.xp_needed_this_level,
            inventory,
            user,
        },
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub motto: Option<String>,
    pub avatar_id: Option<String>,
}

pub async fn update_profile(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: UpdateProfileRequest = read_json(req).await?;

    let user = db::update_profile(
        &state.pool,
        user_id,
        body.username.as_deref(),
        body.email.as_deref(),
        body.motto.as_deref(),
        body.avatar_id.as_deref(),
    )
    .await?;

    Ok(json_response(StatusCode::OK, &user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDistanceRequest {
    pub distance_delta: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDistanceResponse {
    pub new_total_distance: i64,
    pub milestones_crossed: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xp_earned: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gp_earned: Option<i64>,
}

/// Adds walked meters to the user's total and pays out milestone rewards.
pub async fn update_distance(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: UpdateDistanceRequest = read_json(req).await?;
    // Anything at or past 2^63 meters would saturate the integer cast below.
    if !body.distance_delta.is_finite()
        || body.distance_delta < 0.0
        || body.distance_delta >= i64::MAX as f64
    {
        return Err(ApiError::InvalidInput("Invalid distance delta.".to_string()));
    }

    // Fractional meters truncate; the remainder is the client's to re-report.
    let delta = body.distance_delta.floor() as i64;
    let outcome = db::record_distance(&state.pool, user_id, delta).await?;

    let (xp_earned, gp_earned) = if outcome.milestones_crossed > 0 {
        (Some(outcome.reward.xp), Some(outcome.reward.gp))
    } else {
        (None, None)
    };
    Ok(json_response(
        StatusCode::OK,
        &UpdateDistanceResponse {
            new_total_distance: outcome.new_total_distance,
            milestones_crossed: outcome.milestones_crossed,
            xp_earned,
            gp_earned,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub gp_earned: i64,
}

/// Converts premium currency to Green Points at the fixed rate.
pub async fn convert_diamond(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: AmountRequest = read_json(req).await?;
    let gp_earned = db::convert_diamonds(&state.pool, user_id, body.amount).await?;
    Ok(json_response(StatusCode::OK, &ConvertResponse { gp_earned }))
}

/// Stand-in for a payment provider callback: credits diamonds directly.
pub async fn top_up_diamond(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: AmountRequest = read_json(req).await?;
    let balances = db::top_up_diamonds(&state.pool, user_id, body.amount).await?;
    Ok(json_response(StatusCode::OK, &balances))
}
