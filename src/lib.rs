//! Recipe Server - REST API for personal recipe collections
//!
//! Each registered user owns an isolated set of recipes, tags and
//! ingredients. JWT bearer tokens authenticate every request outside the
//! registration and token endpoints.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # JWT issuance and validation, auth middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool, models, repositories
//! ├── services/      # image storage
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env, create the working directory and initialize logging.
///
/// Called once at startup before configuration is read.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/recipe-server".into());
    std::fs::create_dir_all(&work_dir)?;

    let log_to_file = std::env::var("LOG_TO_FILE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if log_to_file {
        let log_dir = std::path::Path::new(&work_dir).join("logs");
        std::fs::create_dir_all(&log_dir)?;
        init_logger_with_file(None, log_dir.to_str());
    } else {
        init_logger();
    }

    Ok(())
}
