//! Top-level plant API
//!
//! Bundles the command client and the telemetry state server for one
//! plant. The plant pushes state updates to UDP port 12345 by default;
//! commands go out to the address given in the configuration.

use std::net::SocketAddr;

use tracing::info;

use fluora_core::{catalog, FluoraState};

use crate::{
    client::FluoraClient, config::FluoraConfig, error::ControlError, telemetry::StateServer,
    Result,
};

/// One connected plant: command path plus telemetry path
pub struct FluoraApi {
    client: FluoraClient,
    server: StateServer,
}

impl FluoraApi {
    /// Build the command client and bind the telemetry listener.
    ///
    /// Fails fast on an empty plant address or an unbindable listen
    /// address; the system cannot function without either.
    pub async fn connect(config: FluoraConfig) -> Result<Self> {
        if config.plant_addr.is_empty() {
            return Err(ControlError::InvalidConfig(
                "Plant address is missing".to_string(),
            ));
        }

        let client = FluoraClient::new(&config.plant_addr)?;
        let server = StateServer::bind(&config.listen_addr).await?;
        info!("Connected to plant at {}", config.plant_addr);

        Ok(Self { client, server })
    }

    /// Command client for the plant
    pub fn client(&self) -> &FluoraClient {
        &self.client
    }

    /// Snapshot of the most recent decoded plant state
    pub fn state(&self) -> FluoraState {
        self.server.state()
    }

    /// List of supported animation display names
    pub fn effect_list(&self) -> Vec<&'static str> {
        catalog::names()
    }

    /// Address telemetry is received on
    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    /// Stop the telemetry loop
    pub async fn shutdown(&mut self) {
        self.server.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_requires_plant_address() {
        let result = FluoraApi::connect(FluoraConfig::default()).await;
        assert!(matches!(result, Err(ControlError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_connect_and_shutdown() {
        let config = FluoraConfig::new("127.0.0.1:12345").with_listen_addr("127.0.0.1:0");
        let mut api = FluoraApi::connect(config).await.unwrap();

        assert_eq!(api.state(), FluoraState::default());
        assert!(api.effect_list().contains(&"Party"));
        api.shutdown().await;
    }
}
