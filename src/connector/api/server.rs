use std::net::SocketAddr;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use super::{router, RelayState};

/// Listening port when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 5174;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
}

impl RelayConfig {
    /// Read the optional `PORT` variable; anything unparseable falls back to
    /// the default.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Bind and serve the relay until the process is stopped.
pub async fn serve(config: RelayConfig, state: RelayState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("Relay listening on http://localhost:{}", config.port);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_matches_env_fallback() {
        std::env::remove_var("PORT");
        assert_eq!(RelayConfig::from_env().port, DEFAULT_PORT);
    }
}
