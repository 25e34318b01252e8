//! This module contains the pure progression and reward logic for Ecoverse.
//! Nothing here touches the database; `database/` applies these results.

pub mod growth;
pub mod leveling;
pub mod rewards;
pub mod social;
