//! Configuration for the Ecoverse API server.
//!
//! CLI arguments and environment variable handling using clap. The parsed
//! `Args` value is the single process-wide configuration object; everything
//! that needs the JWT secret or timeouts receives it explicitly instead of
//! reading globals.

use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser, Debug, Clone)]
#[command(name = "ecoverse-api")]
#[command(about = "Backend for the Ecoverse gamified eco-activity app")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum connections in the database pool
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Secret used to sign and verify bearer tokens
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: String,

    /// Token lifetime in seconds (default: 5 days, matching the mobile client)
    #[arg(long, env = "JWT_EXPIRY_SECONDS", default_value = "432000")]
    pub jwt_expiry_seconds: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
