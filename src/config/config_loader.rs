use anyhow::{Context, Result};

use super::config_model::{DotEnvyConfig, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("SERVER_PORT is invalid")?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("SERVER_BODY_LIMIT is invalid")?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("SERVER_TIMEOUT is invalid")?,
    };

    Ok(DotEnvyConfig { server })
}
