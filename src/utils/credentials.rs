//! Catalog password loading: env var → .env in the working directory → secure prompt.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::path::Path;

const ENV_KEY: &str = "CATSCAN_PASSWORD";

/// Password from the environment (`CATSCAN_PASSWORD`), falling back to a
/// `.env` file in the current directory. Returns None when neither is set.
pub fn password_from_env() -> Option<String> {
    if let Ok(s) = std::env::var(ENV_KEY) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(s);
        }
    }
    let env_path = Path::new(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(env_path);
        if let Ok(s) = std::env::var(ENV_KEY) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                info!("Password found in .env");
                return Some(s);
            }
        }
    }
    None
}

/// Hidden password prompt for `user`.
pub fn prompt_password(user: &str) -> Result<String> {
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let pass = rpassword::prompt_password(format!("{} Password for {}: ", label, user))
        .context("read password")?;
    Ok(pass.trim().to_string())
}
