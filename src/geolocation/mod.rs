//! The geolocation collaborator contract.
//!
//! A [`PositionSource`] stands in for the host's geolocation capability and
//! produces one-shot fixes. Replies travel over a channel back to the
//! coordinator's event pump, so a source may answer synchronously or from a
//! background thread. A host with no capability at all is modelled by the
//! coordinator having no source configured.

use crate::core::geo::LatLng;
use crossbeam_channel::Sender;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Options for a position request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionOptions {
    pub high_accuracy: bool,
}

impl PositionOptions {
    pub fn high_accuracy() -> Self {
        Self { high_accuracy: true }
    }
}

/// Completed fix routed back into the coordinator's pump
pub(crate) struct FixMessage {
    pub(crate) generation: u64,
    pub(crate) outcome: Result<LatLng, String>,
}

/// One-shot continuation for a position request.
///
/// Exactly one of [`PositionReply::resolve`] or [`PositionReply::reject`]
/// is expected; both consume the reply. Dropping it unanswered models a
/// host that never responds.
pub struct PositionReply {
    tx: Sender<FixMessage>,
    generation: u64,
}

impl PositionReply {
    pub(crate) fn new(tx: Sender<FixMessage>, generation: u64) -> Self {
        Self { tx, generation }
    }

    pub fn resolve(self, position: LatLng) {
        let _ = self.tx.send(FixMessage {
            generation: self.generation,
            outcome: Ok(position),
        });
    }

    pub fn reject(self, message: String) {
        let _ = self.tx.send(FixMessage {
            generation: self.generation,
            outcome: Err(message),
        });
    }
}

/// A host backend able to produce one-shot position fixes
pub trait PositionSource: Send {
    /// Requests a single fix; the reply may be resolved synchronously or
    /// from another thread
    fn request_position(&mut self, options: PositionOptions, reply: PositionReply);
}

/// Source that always reports the same fix immediately
pub struct FixedPosition {
    position: LatLng,
}

impl FixedPosition {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

impl PositionSource for FixedPosition {
    fn request_position(&mut self, _options: PositionOptions, reply: PositionReply) {
        reply.resolve(self.position);
    }
}

type ManualQueue = Arc<Mutex<VecDeque<(PositionOptions, PositionReply)>>>;

/// Source whose answers are driven externally through a handle.
///
/// Requests queue up unanswered until the handle resolves or rejects them,
/// which makes deferred and out-of-order completions easy to exercise.
pub struct ManualPosition {
    queue: ManualQueue,
}

/// Cloneable controller for a [`ManualPosition`] source
#[derive(Clone)]
pub struct ManualPositionHandle {
    queue: ManualQueue,
}

impl ManualPosition {
    pub fn new() -> (Self, ManualPositionHandle) {
        let queue: ManualQueue = Arc::new(Mutex::new(VecDeque::new()));
        let handle = ManualPositionHandle {
            queue: queue.clone(),
        };
        (Self { queue }, handle)
    }
}

impl PositionSource for ManualPosition {
    fn request_position(&mut self, options: PositionOptions, reply: PositionReply) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push_back((options, reply));
        }
    }
}

impl ManualPositionHandle {
    /// Number of outstanding unanswered requests
    pub fn pending(&self) -> usize {
        self.queue.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    /// Options of the oldest outstanding request
    pub fn next_options(&self) -> Option<PositionOptions> {
        self.queue
            .lock()
            .ok()
            .and_then(|queue| queue.front().map(|(options, _)| *options))
    }

    /// Resolves the oldest outstanding request; returns false when none is pending
    pub fn resolve_next(&self, position: LatLng) -> bool {
        match self.pop_next() {
            Some((_, reply)) => {
                reply.resolve(position);
                true
            }
            None => false,
        }
    }

    /// Rejects the oldest outstanding request; returns false when none is pending
    pub fn reject_next(&self, message: &str) -> bool {
        match self.pop_next() {
            Some((_, reply)) => {
                reply.reject(message.to_string());
                true
            }
            None => false,
        }
    }

    fn pop_next(&self) -> Option<(PositionOptions, PositionReply)> {
        self.queue.lock().ok().and_then(|mut queue| queue.pop_front())
    }
}
