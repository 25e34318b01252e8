//! Contains all the data structures that map to database tables or query results.

use serde::Serialize;
use sqlx::types::chrono::{DateTime, Utc};

/// A full user row, minus the password hash. The hash is only ever fetched by
/// the dedicated login query.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "XP")]
    pub xp: i64,
    pub green_points: i64,
    pub diamonds: i64,
    pub current_rank: String,
    pub distance_walked: i64,
    pub total_collected: i64,
    pub motto: String,
    pub avatar_id: String,
    pub created_at: DateTime<Utc>,
}

/// The numeric counters the Balance Ledger owns.
#[derive(sqlx::FromRow, Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct UserBalances {
    #[serde(rename = "XP")]
    pub xp: i64,
    pub green_points: i64,
    pub diamonds: i64,
    pub distance_walked: i64,
    pub total_collected: i64,
}

/// Non-sensitive projection used by search results and pending-request lists.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub user_id: i64,
    pub username: String,
    pub current_rank: String,
    pub avatar_id: String,
}

/// Friend-list projection: public fields plus the stats shown next to friends.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    pub user_id: i64,
    pub username: String,
    pub current_rank: String,
    pub avatar_id: String,
    #[serde(rename = "XP")]
    pub xp: i64,
    pub green_points: i64,
}

#[derive(sqlx::Type, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(type_name = "pet_rarity")]
pub enum PetRarity {
    Basic,
    Rare,
    Exotic,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlantPet {
    pub pet_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub rarity: PetRarity,
    pub growth_stage: i32,
    pub distance_required: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub item_type: String,
    #[serde(rename = "costGP")]
    pub cost_gp: i64,
    pub effect: String,
    pub icon: String,
}

/// Shop catalog entry: an `Item` without the `effect` internals.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub item_type: String,
    #[serde(rename = "costGP")]
    pub cost_gp: i64,
    pub icon: String,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CommunityEvent {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub address: String,
    pub event_date: DateTime<Utc>,
    pub max_participants: i32,
    /// Filled by a join against `event_participants`.
    pub participant_count: i64,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub quest_id: i64,
    pub title: String,
    pub quest_type: String,
    pub objective_type: String,
    pub target_value: i64,
    pub xp_reward: i64,
    pub gp_reward: i64,
    pub is_active: bool,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EcoSpot {
    pub spot_id: i64,
    pub name: String,
    pub spot_type: String,
    pub longitude: f64,
    pub latitude: f64,
    pub material_accepted: Vec<String>,
    pub current_status: String,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: i64,
    pub reporter_id: i64,
    pub spot_id: i64,
    pub report_type: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Represents a single entry in a leaderboard.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub username: String,
    pub current_rank: String,
    pub avatar_id: String,
    pub score: i64,
}
