use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use flbridge_core::{
    BridgeConfig, BridgeError, DataMessage, FixedDiscovery, MessageTransport, StudioBridge,
    TargetDiscovery, WindowRef, DEFAULT_KEY, DEFAULT_TEMPO,
};

/// Transport double that records every delivery it is asked to perform.
struct RecordingTransport {
    sent: Arc<Mutex<Vec<(WindowRef, DataMessage)>>>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn log(&self) -> Arc<Mutex<Vec<(WindowRef, DataMessage)>>> {
        Arc::clone(&self.sent)
    }
}

impl MessageTransport for RecordingTransport {
    fn deliver(&self, target: WindowRef, message: &DataMessage) -> Result<bool, BridgeError> {
        self.sent.lock().push((target, message.clone()));
        Ok(true)
    }
}

/// Discovery double that never finds the external window.
struct AbsentTarget;

impl TargetDiscovery for AbsentTarget {
    fn find(&self, _window_class: &str) -> Option<WindowRef> {
        None
    }
}

fn config() -> BridgeConfig {
    BridgeConfig {
        window_class: "FL Studio".to_string(),
        default_tag: 0,
    }
}

fn connected_bridge() -> (StudioBridge, Arc<Mutex<Vec<(WindowRef, DataMessage)>>>) {
    let transport = RecordingTransport::new();
    let log = transport.log();
    let discovery = FixedDiscovery(WindowRef::from_raw(0x0042));
    let mut bridge =
        StudioBridge::with_backends(config(), Box::new(discovery), Box::new(transport));
    assert!(bridge.connect());
    (bridge, log)
}

fn unreachable_bridge() -> (StudioBridge, Arc<Mutex<Vec<(WindowRef, DataMessage)>>>) {
    let transport = RecordingTransport::new();
    let log = transport.log();
    let bridge = StudioBridge::with_backends(config(), Box::new(AbsentTarget), Box::new(transport));
    (bridge, log)
}

#[test]
fn connect_without_a_window_fails_and_keeps_defaults() {
    let (mut bridge, _log) = unreachable_bridge();

    assert!(!bridge.connect());
    assert!(!bridge.is_connected());
    assert_eq!(bridge.tempo(), DEFAULT_TEMPO);
    assert_eq!(bridge.key(), DEFAULT_KEY);
}

#[test]
fn repeated_connect_is_idempotent() {
    let (mut bridge, _log) = unreachable_bridge();
    assert_eq!(bridge.connect(), bridge.connect());

    let (mut bridge, _log) = connected_bridge();
    assert_eq!(bridge.connect(), bridge.connect());
}

#[test]
fn operations_before_connect_never_touch_the_transport() {
    let (bridge, log) = unreachable_bridge();

    assert!(!bridge.send_raw(0, b"payload"));
    assert!(!bridge.send(b"payload"));
    assert!(!bridge.load_sample("kick.wav"));
    assert!(!bridge.create_channel("Sampler"));
    assert!(!bridge.set_sample_properties("kick.wav", 174.0, "Am"));

    assert!(log.lock().is_empty());
}

#[test]
fn send_raw_forwards_exact_bytes_exactly_once() {
    let (bridge, log) = connected_bridge();
    let payload = [0xde, 0xad, 0xbe, 0xef, 0x00, 0x7f];

    assert!(bridge.send_raw(9, &payload));

    let sent = log.lock();
    assert_eq!(sent.len(), 1);
    let (target, message) = &sent[0];
    assert_eq!(*target, WindowRef::from_raw(0x0042));
    assert_eq!(message.tag(), 9);
    assert_eq!(message.len(), payload.len());
    assert_eq!(message.payload(), &payload[..]);
}

#[test]
fn send_uses_the_configured_default_tag() {
    let transport = RecordingTransport::new();
    let log = transport.log();
    let mut bridge = StudioBridge::with_backends(
        BridgeConfig {
            window_class: "FL Studio".to_string(),
            default_tag: 21,
        },
        Box::new(FixedDiscovery(WindowRef::from_raw(1))),
        Box::new(transport),
    );
    assert!(bridge.connect());
    assert!(bridge.send(b"x"));

    assert_eq!(log.lock()[0].1.tag(), 21);
}

#[test]
fn cached_tempo_and_key_never_change() {
    let (bridge, _log) = connected_bridge();

    for _ in 0..4 {
        assert!(bridge.send_raw(0, b"payload"));
        assert!(bridge.load_sample("loop.wav"));
        assert!(bridge.create_channel("Audio"));
        assert!(bridge.set_sample_properties("loop.wav", 140.0, "F#"));
        assert_eq!(bridge.tempo(), DEFAULT_TEMPO);
        assert_eq!(bridge.key(), DEFAULT_KEY);
    }
}

#[test]
fn placeholder_actions_succeed_while_connected_without_messaging() {
    let (bridge, log) = connected_bridge();

    assert!(bridge.load_sample("break.wav"));
    assert!(bridge.create_channel("Breaks"));
    assert!(bridge.set_sample_properties("break.wav", 170.0, "Dm"));

    // Placeholders must not emit messages; only send_raw does.
    assert!(log.lock().is_empty());
}

#[test]
fn disconnect_gates_operations_like_a_fresh_handle() {
    let (mut bridge, log) = connected_bridge();
    assert!(bridge.send_raw(0, b"one"));

    bridge.disconnect();
    assert!(!bridge.is_connected());
    assert!(!bridge.send_raw(0, b"two"));
    assert!(!bridge.load_sample("kick.wav"));
    assert_eq!(bridge.tempo(), DEFAULT_TEMPO);
    assert_eq!(bridge.key(), DEFAULT_KEY);
    assert_eq!(log.lock().len(), 1);

    // The cached reference survives, so reconnecting needs no re-discovery.
    assert!(bridge.connect());
    assert!(bridge.send_raw(0, b"three"));
    assert_eq!(log.lock().len(), 2);
}
