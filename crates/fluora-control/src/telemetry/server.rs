//! Telemetry state server
//!
//! Binds a UDP socket, receives state fragments from the plant and keeps
//! the most recent decoded state in a shared [`StateStore`]. The receive
//! loop runs on its own tokio task; per-datagram failures are logged and
//! recovered locally, so the loop only ends on shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use fluora_core::FluoraState;

use super::{assembler::FrameAssembler, decode::project_state, store::StateStore};
use crate::Result;

/// Receive buffer size; state fragments run well past a typical 1024-byte
/// payload
const RECV_BUFFER_SIZE: usize = 4096;

/// Handle to the running telemetry receive loop
pub struct StateServer {
    store: Arc<StateStore>,
    local_addr: SocketAddr,
    shutdown: Option<mpsc::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl StateServer {
    /// Bind the listening socket and start the receive loop.
    ///
    /// Bind failures are fatal and propagate: without a bound socket there
    /// is no telemetry to serve.
    pub async fn bind(addr: &str) -> Result<Self> {
        let socket = match UdpSocket::bind(addr).await {
            Ok(socket) => socket,
            Err(e) => {
                error!("Telemetry server could not bind {}: {}", addr, e);
                return Err(e.into());
            }
        };
        let local_addr = socket.local_addr()?;
        let store = Arc::new(StateStore::new());

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let loop_store = Arc::clone(&store);
        let task = tokio::spawn(async move {
            run_receive_loop(socket, loop_store, shutdown_rx).await;
        });

        info!("Telemetry server listening on {}", local_addr);
        Ok(Self {
            store,
            local_addr,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Snapshot of the most recent decoded plant state
    pub fn state(&self) -> FluoraState {
        self.store.snapshot()
    }

    /// Shared handle to the state store
    pub fn store(&self) -> Arc<StateStore> {
        Arc::clone(&self.store)
    }

    /// Address the server is listening on
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop the receive loop and wait for it to finish
    pub async fn shutdown(&mut self) {
        // Drop the sender to close the channel and stop the loop
        self.shutdown = None;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!("Telemetry server stopped");
    }
}

async fn run_receive_loop(
    socket: UdpSocket,
    store: Arc<StateStore>,
    mut shutdown: mpsc::Receiver<()>,
) {
    let mut assembler = FrameAssembler::new();
    let mut buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                // Channel closed: the handle shut down
                break;
            }
            received = socket.recv_from(&mut buf) => {
                match received {
                    Ok((len, _)) => handle_datagram(&mut assembler, &store, &buf[..len]),
                    Err(e) => error!("Telemetry receive failed: {}", e),
                }
            }
        }
    }
}

/// Process one datagram. All failures are local: the frame in flight is
/// dropped and the loop keeps serving.
fn handle_datagram(assembler: &mut FrameAssembler, store: &StateStore, datagram: &[u8]) {
    match assembler.feed(datagram) {
        Ok(None) => {}
        Ok(Some(doc)) => match project_state(&doc, &store.snapshot()) {
            Ok(next) => {
                store.commit(next);
                debug!("Plant state updated");
            }
            Err(e) => error!("Telemetry frame discarded: {}", e),
        },
        Err(e) => warn!("Telemetry datagram dropped: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_bind_and_shutdown() {
        let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
        assert_ne!(server.local_addr().port(), 0);
        assert_eq!(server.state(), FluoraState::default());
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_bind_failure_propagates() {
        let server = StateServer::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().to_string();

        // Second bind on the same port must fail
        assert!(StateServer::bind(&addr).await.is_err());
    }

    #[test]
    fn test_discarded_frame_preserves_store() {
        let mut assembler = FrameAssembler::new();
        let store = StateStore::new();
        let previous = FluoraState {
            model: "Fluora".to_string(),
            ..Default::default()
        };
        store.commit(previous.clone());

        // A complete frame whose document lacks every required path
        let doc = json!({ "unexpected": true }).to_string();
        let bytes = doc.as_bytes();
        for seq in 0u8..=12 {
            let mut datagram = vec![0, 0, 0, seq];
            if seq == 0 {
                datagram.extend_from_slice(bytes);
            }
            handle_datagram(&mut assembler, &store, &datagram);
        }

        assert_eq!(store.snapshot(), previous);
    }
}
