use std::path::PathBuf;

use clap::Parser;

/// HTTP API server for the Journey travel journal
///
/// Serves trips with their ideas and day-by-day plans, user accounts and
/// journal entries from a single SQLite file. Every option can also be set
/// through the environment variable shown next to it.
#[derive(Parser, Debug)]
#[command(version, about, name = "journey")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/journey/journey.db
    #[arg(long, env = "JOURNEY_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "JOURNEY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, env = "JOURNEY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Secret used to sign access tokens
    #[arg(long, env = "JOURNEY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Lifetime of issued access tokens, in days
    #[arg(long, env = "JOURNEY_TOKEN_TTL_DAYS", default_value_t = 90)]
    pub token_ttl_days: u32,
}
