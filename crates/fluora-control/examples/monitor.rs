//! Plant state monitor
//!
//! Connects to a plant and prints the decoded state once per second until
//! interrupted.
//!
//! Usage: `monitor <plant-addr> [listen-addr]`

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use fluora_control::{FluoraApi, FluoraConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let plant_addr = std::env::args()
        .nth(1)
        .context("usage: monitor <plant-addr> [listen-addr]")?;
    let mut config = FluoraConfig::new(plant_addr);
    if let Some(listen_addr) = std::env::args().nth(2) {
        config = config.with_listen_addr(listen_addr);
    }

    let mut api = FluoraApi::connect(config).await?;
    println!("Known effects: {}", api.effect_list().join(", "));
    println!("Listening for state updates on {}", api.local_addr());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                let state = api.state();
                println!(
                    "model={:?} rssi={} brightness={:.2} light_on={} animation={}",
                    state.model,
                    state.rssi,
                    state.brightness,
                    state.main_light_on,
                    state.active_animation,
                );
            }
        }
    }

    api.shutdown().await;
    Ok(())
}
