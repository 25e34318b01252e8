//! Plant pet routes: active-pet view, owned list, selection, and evolution.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{authenticate, json_response, read_json, ResponseBody};
use crate::database::models::PlantPet;
use crate::database::{pets as db, users};
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyPetResponse {
    pub pet: Option<PlantPet>,
    pub user_distance: i64,
    pub user_rank: String,
    #[serde(rename = "userXP")]
    pub user_xp: i64,
    #[serde(rename = "userGP")]
    pub user_gp: i64,
}

/// The active pet plus the owner stats the pet screen shows.
pub async fn my_pet(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let user = users::get_user(&state.pool, user_id).await?;
    let pet = db::get_active_pet(&state.pool, user_id).await?;

    Ok(json_response(
        StatusCode::OK,
        &MyPetResponse {
            pet,
            user_distance: user.distance_walked,
            user_rank: user.current_rank,
            user_xp: user.xp,
            user_gp: user.green_points,
        },
    ))
}

/// Every pet the user owns.
pub async fn inventory(
    state: &AppState,
    req: &Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let pets = db::get_user_pets(&state.pool, user_id).await?;
    Ok(json_response(StatusCode::OK, &pets))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveRequest {
    pub pet_id: i64,
}

pub async fn set_active(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, &req)?;
    let body: SetActiveRequest = read_json(req).await?;
    let pet = db::set_active(&state.pool, user_id, body.pet_id).await?;
    Ok(json_response(StatusCode::OK, &json!({ "activePet": pet })))
}

pub async fn evolve(
    state: &AppState,
    req: &Request<Incoming>,
    pet_id: i64,
) -> Result<Response<ResponseBody>, ApiError> {
    let user_id = authenticate(state, req)?;
    let outcome = db::evolve(&state.pool, user_id, pet_id).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({
            "newStage": outcome.new_stage,
            "newDistanceRequired": outcome.new_distance_required,
        }),
    ))
}
