//! JSON telemetry outbox.
//!
//! Serializes every [`AppEvent`] to a compact JSON line and queues it for
//! whatever uplink is attached (dashboard websocket, MQTT, serial bridge).
//! The queue is a fixed-capacity `heapless` deque: when the uplink falls
//! behind, the oldest line is dropped so the control loop never blocks or
//! allocates unboundedly.

use heapless::Deque;
use log::{debug, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Default outbox depth.
pub const OUTBOX_DEPTH: usize = 16;

pub struct JsonTelemetrySink<const N: usize = OUTBOX_DEPTH> {
    outbox: Deque<String, N>,
    dropped: u32,
}

impl<const N: usize> JsonTelemetrySink<N> {
    pub fn new() -> Self {
        Self {
            outbox: Deque::new(),
            dropped: 0,
        }
    }

    /// Next line for the uplink, oldest first.
    pub fn pop(&mut self) -> Option<String> {
        self.outbox.pop_front()
    }

    /// Hand every queued line to `send`.
    pub fn drain(&mut self, mut send: impl FnMut(String)) {
        while let Some(line) = self.outbox.pop_front() {
            send(line);
        }
    }

    pub fn len(&self) -> usize {
        self.outbox.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outbox.is_empty()
    }

    /// Lines lost to overflow or serialization failure.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> Default for JsonTelemetrySink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for JsonTelemetrySink<N> {
    fn emit(&mut self, event: &AppEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Telemetry: serialization failed: {}", e);
                self.dropped = self.dropped.saturating_add(1);
                return;
            }
        };

        if self.outbox.is_full() {
            self.outbox.pop_front();
            self.dropped = self.dropped.saturating_add(1);
            debug!("Telemetry: outbox full, dropped oldest ({} total)", self.dropped);
        }
        // Cannot fail: a slot was freed above if needed.
        let _ = self.outbox.push_back(line);
    }
}
