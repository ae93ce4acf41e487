use std::env;
use std::path::PathBuf;

use leptos::logging::{log, warn};

pub const DEFAULT_DB_PATH: &str = "seatrate.db";

/// Server settings read from the environment. Site address and asset paths
/// come from the Leptos configuration instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let config = Self {
            db_path: var_or("SEATRATE_DB_PATH", DEFAULT_DB_PATH),
            seed_path: env::var("SEATRATE_SEED_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        };
        log!(
            "[CONFIG] db_path={} seed_path={:?}",
            config.db_path,
            config.seed_path
        );
        config
    }
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            warn!("[CONFIG] {} not set, defaulting to {}", key, default);
            default.to_string()
        }
    }
}
