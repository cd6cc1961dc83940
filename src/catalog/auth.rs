//! Catalog login: build a client and verify credentials, up to 3 attempts.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::warn;
use std::io::{self, Write};
use std::time::Duration;

use crate::utils::config::AuthConsts;
use crate::utils::credentials;

use super::CatalogError;
use super::http::HttpCatalogClient;

/// Prompt-and-verify loop. The username comes from the CLI when given,
/// otherwise from a prompt; the password from the environment on the first
/// attempt, from a hidden prompt afterwards. Only a rejected credential is
/// retried; transport failures end the loop immediately. `fetch_timeout` is
/// the stage-2 deadline the client's socket timeout is derived from.
pub fn connect(
    host: &str,
    username: Option<&str>,
    fetch_timeout: Duration,
) -> Result<HttpCatalogClient> {
    for attempt in 1..=AuthConsts::MAX_LOGIN_ATTEMPTS {
        let user = match username {
            Some(u) => u.to_string(),
            None => prompt_username()?,
        };
        let pass = match credentials::password_from_env().filter(|_| attempt == 1) {
            Some(p) => p,
            None => credentials::prompt_password(&user)?,
        };
        let client = HttpCatalogClient::new(host, user, pass, fetch_timeout)?;
        match client.verify_credentials() {
            Ok(()) => return Ok(client),
            Err(CatalogError::Auth(msg)) => {
                warn!("Authentication failed (attempt {}): {}", attempt, msg);
            }
            Err(e) => return Err(e.into()),
        }
    }
    bail!(
        "number of login attempts exceeded ({})",
        AuthConsts::MAX_LOGIN_ATTEMPTS
    )
}

fn prompt_username() -> Result<String> {
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    print!("{} Username: ", label);
    io::stdout().flush().context("flush prompt")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("read username")?;
    Ok(line.trim().to_string())
}
