//! This module acts as a central hub for all database-related logic.
//! It declares the specialized submodules so they can be accessed from
//! elsewhere in the application via their full path, e.g.,
//! `database::pets::evolve`.

pub mod ecospots;
pub mod events;
pub mod leaderboard;
pub mod models;
pub mod pets;
pub mod quests;
pub mod reports;
pub mod shop;
pub mod social;
pub mod users;

use sqlx::{Pool, Postgres};

/// A type alias for the database connection pool (`Pool<Postgres>`).
/// Used throughout the application as the single shared resource between
/// otherwise stateless request handlers.
pub type DbPool = Pool<Postgres>;
