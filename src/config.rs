use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub catalog_path: PathBuf,
    pub redis_url: String,
    pub frontend_dir: PathBuf,
    pub login_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            catalog_path: try_load("CATALOG_PATH", "data.csv"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            frontend_dir: try_load("FRONTEND_DIR", "Frontend"),
            login_dir: try_load("LOGIN_DIR", "LoginPage"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
