//! HTTP routes: path dispatch, request helpers, and error mapping.
//!
//! The route table is a plain match over (method, path segments); handlers
//! return `Result<Response, ApiError>` and the error kind determines the
//! status deterministically.

pub mod ecospots;
pub mod events;
pub mod leaderboards;
pub mod missions;
pub mod pets;
pub mod quests;
pub mod reports;
pub mod shop;
pub mod social;
pub mod user_data;
pub mod users;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::AUTHORIZATION;
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::auth::{extract_bearer, verify_token};
use crate::error::ApiError;
use crate::server::AppState;

pub type ResponseBody = Full<Bytes>;

pub async fn handle_request(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Response<ResponseBody> {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    debug!(%method, %path, "request");

    match route(&state, &method, &path, req).await {
        Ok(response) => response,
        Err(err) => {
            if let ApiError::Internal(ref cause) = err {
                error!(%method, %path, error = %cause, "request failed");
            }
            error_response(&err)
        }
    }
}

async fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        (&Method::GET, []) => Ok(text_response("Ecoverse API is Running!")),

        (&Method::POST, ["api", "users", "register"]) => users::register(state, req).await,
        (&Method::POST, ["api", "users", "login"]) => users::login(state, req).await,

        (&Method::GET, ["api", "user-data", "summary"]) => user_data::summary(state, &req).await,
        (&Method::GET, ["api", "user-data", "full-profile"]) => {
            user_data::full_profile(state, &req).await
        }
        (&Method::PUT, ["api", "user-data", "profile"]) => {
            user_data::update_profile(state, req).await
        }
        (&Method::POST, ["api", "user-data", "update-distance"]) => {
            user_data::update_distance(state, req).await
        }
        (&Method::POST, ["api", "user-data", "convert-diamond"]) => {
            user_data::convert_diamond(state, req).await
        }
        (&Method::POST, ["api", "user-data", "top-up-diamond"]) => {
            user_data::top_up_diamond(state, req).await
        }

        (&Method::POST, ["api", "missions", "submit", "deposit"]) => {
            missions::submit_deposit(state, req).await
        }

        (&Method::GET, ["api", "pets", "my-pet"]) => pets::my_pet(state, &req).await,
        (&Method::GET, ["api", "pets", "inventory"]) => pets::inventory(state, &req).await,
        (&Method::POST, ["api", "pets", "set-active"]) => pets::set_active(state, req).await,
        (&Method::POST, ["api", "pets", "evolve", pet_id]) => {
            let pet_id = parse_id(pet_id)?;
            pets::evolve(state, &req, pet_id).await
        }

        (&Method::GET, ["api", "shop", "items"]) => shop::items(state).await,
        (&Method::POST, ["api", "shop", "buy", item_id]) => {
            let item_id = parse_id(item_id)?;
            shop::buy(state, &req, item_id).await
        }

        (&Method::GET, ["api", "social", "search"]) => social::search(state, &req).await,
        (&Method::GET, ["api", "social", "friends"]) => social::friends(state, &req).await,
        (&Method::POST, ["api", "social", "request", target_id]) => {
            let target_id = parse_id(target_id)?;
            social::send_request(state, &req, target_id).await
        }
        (&Method::POST, ["api", "social", "accept", sender_id]) => {
            let sender_id = parse_id(sender_id)?;
            social::accept_request(state, &req, sender_id).await
        }

        (&Method::GET, ["api", "events", "upcoming"]) => events::upcoming(state, &req).await,
        (&Method::POST, ["api", "events", "join", event_id]) => {
            let event_id = parse_id(event_id)?;
            events::join(state, &req, event_id).await
        }
        (&Method::POST, ["api", "events", "cancel-join", event_id]) => {
            let event_id = parse_id(event_id)?;
            events::cancel_join(state, &req, event_id).await
        }

        (&Method::GET, ["api", "leaderboards", "top-users"]) => {
            leaderboards::top_users(state, &req).await
        }
        (&Method::GET, ["api", "quests", "active"]) => quests::active(state, &req).await,
        (&Method::GET, ["api", "ecospots", "nearby"]) => ecospots::nearby(state).await,
        (&Method::POST, ["api", "reports"]) => reports::create(state, req).await,

        _ => Err(ApiError::NotFound("Route not found.".to_string())),
    }
}

/// Resolves the bearer token to a trusted user id, or fails Unauthorized.
pub fn authenticate<B>(state: &AppState, req: &Request<B>) -> Result<i64, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied.".to_string()))?;
    let token = extract_bearer(header)
        .ok_or_else(|| ApiError::Unauthorized("No token, authorization denied.".to_string()))?;
    verify_token(token, &state.args.jwt_secret)
}

/// Collects and deserializes a JSON request body.
pub async fn read_json<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T, ApiError> {
    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| ApiError::Internal(e.into()))?
        .to_bytes();
    serde_json::from_slice(&body)
        .map_err(|_| ApiError::InvalidInput("Invalid request body.".to_string()))
}

/// Looks up a query-string parameter, percent-decoded.
pub fn query_param<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.uri().query()?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            urlencoding::decode(value).ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidInput("Invalid id.".to_string()))
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<ResponseBody> {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(bytes)))
        .expect("static response parts are valid")
}

pub fn msg_response(status: StatusCode, msg: &str) -> Response<ResponseBody> {
    json_response(status, &json!({ "msg": msg }))
}

fn text_response(body: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("content-type", "text/plain")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("static response parts are valid")
}

pub fn error_response(err: &ApiError) -> Response<ResponseBody> {
    msg_response(err.status_code(), &err.public_message())
}
