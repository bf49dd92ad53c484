//! End-to-end telemetry tests: real UDP datagrams into a bound server

use std::net::UdpSocket;
use std::time::Duration;

use serde_json::json;

use fluora_control::{FluoraState, StateServer};

const FRAGMENT_COUNT: usize = 13;

fn sample_doc(model: &str, brightness: f64) -> String {
    json!({
        "model": model,
        "rssi": -48,
        "network": { "macAddress": "AA:BB:CC:DD:EE:FF" },
        "audio": {
            "filter": { "value": 0.1 },
            "release": { "value": 0.2 },
            "gain": { "value": 0.3 },
            "attack": { "value": 0.4 }
        },
        "lightSensor": { "enabled": { "value": true } },
        "engine": {
            "brightness": { "value": brightness },
            "isDisplaying": { "value": true },
            "manualMode": {
                "loadedAnimationIndex": 2,
                "activeAnimationIndex": { "value": 7 },
                "dashboard": {
                    "Ve3ZS5tBUo4T": { "value": 0.5 }
                },
                "palette": {
                    "saturation": { "value": 0.8 },
                    "hue": { "value": 0.9 }
                }
            }
        }
    })
    .to_string()
}

/// Split a document into the 13 wire fragments with their 4-byte headers
fn split_into_fragments(doc: &str) -> Vec<Vec<u8>> {
    let bytes = doc.as_bytes();
    let chunk = bytes.len().div_ceil(FRAGMENT_COUNT);
    (0..FRAGMENT_COUNT)
        .map(|i| {
            let start = (i * chunk).min(bytes.len());
            let end = ((i + 1) * chunk).min(bytes.len());
            let mut datagram = vec![0u8, 0, 0, i as u8];
            datagram.extend_from_slice(&bytes[start..end]);
            datagram
        })
        .collect()
}

async fn wait_for_state<F>(server: &StateServer, pred: F) -> FluoraState
where
    F: Fn(&FluoraState) -> bool,
{
    for _ in 0..250 {
        let state = server.state();
        if pred(&state) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("timed out waiting for a state update");
}

/// Give the receive loop a moment to drain anything in flight
async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::test]
async fn test_complete_frame_updates_state() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    for frag in split_into_fragments(&sample_doc("Fluora", 0.75)) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }

    let state = wait_for_state(&server, |s| s.model == "Fluora").await;
    assert_eq!(state.brightness, 0.75);
    assert_eq!(state.rssi, -48);
    assert_eq!(state.animation_bloom, Some(0.5));
    assert_eq!(state.animation_speed, None);

    // The shared store handle sees the same record
    assert_eq!(server.store().snapshot(), state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_scrambled_arrival_order_decodes_identically() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    let fragments = split_into_fragments(&sample_doc("Fluora", 0.6));
    for &i in &[0usize, 2, 1, 4, 3, 6, 5, 8, 7, 10, 9, 11, 12] {
        sender.send_to(&fragments[i], server.local_addr()).unwrap();
    }

    let state = wait_for_state(&server, |s| s.model == "Fluora").await;
    assert_eq!(state.brightness, 0.6);

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_fragment_leaves_state_unchanged() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    // First a good frame
    for frag in split_into_fragments(&sample_doc("Fluora", 0.75)) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }
    let state = wait_for_state(&server, |s| s.model == "Fluora").await;

    // Then a frame with fragment 5 lost
    for (i, frag) in split_into_fragments(&sample_doc("Fluora", 0.1))
        .iter()
        .enumerate()
    {
        if i != 5 {
            sender.send_to(frag, server.local_addr()).unwrap();
        }
    }
    settle().await;

    assert_eq!(server.state(), state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_restarted_frame_wins_over_stale_partial() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    // Half of a frame that would report brightness 0.1 ...
    let stale = split_into_fragments(&sample_doc("Stale", 0.1));
    for frag in stale.iter().take(7) {
        sender.send_to(frag, server.local_addr()).unwrap();
    }

    // ... superseded by a complete frame
    for frag in split_into_fragments(&sample_doc("Fluora", 0.9)) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }

    let state = wait_for_state(&server, |s| s.model == "Fluora").await;
    assert_eq!(state.brightness, 0.9);

    server.shutdown().await;
}

#[tokio::test]
async fn test_optional_field_survives_later_frames() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    // First frame reports the bloom widget
    for frag in split_into_fragments(&sample_doc("Fluora", 0.5)) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }
    wait_for_state(&server, |s| s.animation_bloom == Some(0.5)).await;

    // Second frame omits the whole dashboard content
    let mut doc: serde_json::Value =
        serde_json::from_str(&sample_doc("Fluora", 0.2)).unwrap();
    doc["engine"]["manualMode"]["dashboard"]
        .as_object_mut()
        .unwrap()
        .clear();
    for frag in split_into_fragments(&doc.to_string()) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }

    let state = wait_for_state(&server, |s| s.brightness == 0.2).await;
    assert_eq!(state.animation_bloom, Some(0.5));

    server.shutdown().await;
}

#[tokio::test]
async fn test_garbage_datagrams_do_not_stop_the_loop() {
    let mut server = StateServer::bind("127.0.0.1:0").await.unwrap();
    let sender = UdpSocket::bind("127.0.0.1:0").unwrap();

    sender.send_to(&[0xff], server.local_addr()).unwrap();
    sender.send_to(&[0, 0, 0, 99, b'x'], server.local_addr()).unwrap();
    sender
        .send_to(&[0, 0, 0, 3, 0xff, 0xfe], server.local_addr())
        .unwrap();

    for frag in split_into_fragments(&sample_doc("Fluora", 0.3)) {
        sender.send_to(&frag, server.local_addr()).unwrap();
    }

    let state = wait_for_state(&server, |s| s.model == "Fluora").await;
    assert_eq!(state.brightness, 0.3);

    server.shutdown().await;
}
