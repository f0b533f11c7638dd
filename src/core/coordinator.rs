//! The behavioral core of the viewer.
//!
//! `MapCoordinator` is the only component that mutates the map widget and
//! the only one that interprets geolocation results. Every operation takes
//! the [`MapStateStore`] explicitly; the coordinator itself only carries the
//! event plumbing (move notifications and geolocation completions travel
//! over channels, drained by [`MapCoordinator::poll`] on the UI loop) and
//! the request-generation counter that keeps stale fixes from clobbering a
//! newer request's outcome.
//!
//! Operations invoked before initialization are silent no-ops, logged at
//! debug. The widget may therefore be wired up in any order relative to the
//! first user action without a crash; the worst case is an unset display.

use crate::core::config::MapConfig;
use crate::core::constants::GEOLOCATION_UNAVAILABLE;
use crate::core::geo::LatLng;
use crate::core::store::MapStateStore;
use crate::geolocation::{FixMessage, PositionOptions, PositionReply, PositionSource};
use crate::layers::marker::{MarkerOptions, MarkerRole};
use crate::prelude::HashMap;
use crate::widget::{LayerControl, MapWidget};
use crate::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Continuation invoked with a human-readable message when a geolocation
/// request fails
pub type ErrorCallback = Box<dyn FnMut(String)>;

pub struct MapCoordinator {
    source: Option<Box<dyn PositionSource>>,
    move_tx: Sender<LatLng>,
    move_rx: Receiver<LatLng>,
    fix_tx: Sender<FixMessage>,
    fix_rx: Receiver<FixMessage>,
    /// Generation of the most recent position request; completions carrying
    /// an older generation are discarded
    generation: u64,
    /// Error continuations keyed by request generation
    pending: HashMap<u64, ErrorCallback>,
}

impl MapCoordinator {
    /// Coordinator for a host without geolocation capability; every
    /// [`center_on_current_position`](Self::center_on_current_position)
    /// call fails immediately with the fixed message.
    pub fn new() -> Self {
        let (move_tx, move_rx) = unbounded();
        let (fix_tx, fix_rx) = unbounded();
        Self {
            source: None,
            move_tx,
            move_rx,
            fix_tx,
            fix_rx,
            generation: 0,
            pending: HashMap::default(),
        }
    }

    pub fn with_source(source: Box<dyn PositionSource>) -> Self {
        let mut coordinator = Self::new();
        coordinator.source = Some(source);
        coordinator
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Swaps the geolocation backend; `None` models a host without the
    /// capability. In-flight requests on the old source keep their
    /// generation and are discarded if superseded.
    pub fn set_position_source(&mut self, source: Option<Box<dyn PositionSource>>) {
        self.source = source;
    }

    /// One-time setup of a freshly constructed widget.
    ///
    /// Applies the configured view and tile layers, creates both markers
    /// pre-positioned at the config center (detached), registers the move
    /// listener, hands all handles to the store and finishes with a
    /// best-effort [`center_on_current_position`](Self::center_on_current_position).
    /// A second call on an already-initialized store is a logged no-op, so
    /// a duplicate mount cannot rebuild the map or double-register
    /// listeners.
    pub fn initialize(
        &mut self,
        store: &mut MapStateStore,
        mut widget: Box<dyn MapWidget>,
        config: &MapConfig,
        on_error: ErrorCallback,
    ) -> Result<()> {
        if store.has_map() {
            log::warn!("initialize called on an initialized store, ignoring");
            return Ok(());
        }
        config.validate()?;

        widget.set_view(config.center);

        let mut control = LayerControl::new();
        for layer in &config.base_layers {
            let id = widget.add_tile_layer(layer.clone());
            control = control.add_base_layer(layer.name.clone(), id);
        }
        for layer in &config.overlays {
            let id = widget.add_tile_layer(layer.clone());
            control = control.add_overlay(layer.name.clone(), id);
        }
        widget.set_layer_control(control);

        for role in MarkerRole::ALL {
            let marker = widget.add_marker(MarkerOptions::for_role(role, config.center));
            store.set_marker(role, marker);
        }

        let move_tx = self.move_tx.clone();
        widget.on_move(Box::new(move |center| {
            let _ = move_tx.send(center);
        }));

        store.set_map(widget);
        log::debug!("map initialized at {} zoom {}", config.center, config.zoom);

        self.center_on_current_position(store, on_error);
        Ok(())
    }

    /// Synchronizes the authoritative center with the widget's visual
    /// center. Idempotent: with no intervening motion a second call writes
    /// the same value and the revision stays put.
    pub fn on_map_moved(&mut self, store: &mut MapStateStore) {
        let Some(center) = store.map().map(|widget| widget.center()) else {
            log::debug!("on_map_moved before initialization, ignoring");
            return;
        };
        store.set_map_center(Some(center));
    }

    /// Recenters the view on `point` and records it as the authoritative
    /// center directly, without waiting for the widget's own move
    /// notification. After return `store.map_center()` is exactly
    /// `Some(point)`, unrounded.
    pub fn center_on(&mut self, store: &mut MapStateStore, point: LatLng) {
        let Some(widget) = store.map_mut() else {
            log::debug!("center_on before initialization, ignoring");
            return;
        };
        widget.set_view(point);
        store.set_map_center(Some(point));
    }

    /// Repositions the role's marker to `point` and attaches it. Attaching
    /// an attached marker is a pure reposition; the overlay is never torn
    /// down and recreated.
    pub fn show_marker(&mut self, store: &mut MapStateStore, role: MarkerRole, point: LatLng) {
        let Some(marker) = store.marker(role) else {
            log::debug!("show_marker({}) before initialization, ignoring", role);
            return;
        };
        let Some(widget) = store.map_mut() else {
            log::debug!("show_marker({}) before initialization, ignoring", role);
            return;
        };
        widget.set_marker_position(marker, point);
        widget.attach_marker(marker);
    }

    /// Requests a one-shot high-accuracy fix and recenters on it.
    ///
    /// On success the current-location marker is shown at the fix and the
    /// view recenters there. On failure the marker is detached, `on_error`
    /// runs exactly once with a human-readable message, and the displayed
    /// center resynchronizes to wherever the map actually is. Without a
    /// configured source the request fails immediately with the fixed
    /// unavailable message. Only the most recent request's completion takes
    /// effect; older in-flight completions are discarded by `poll`.
    pub fn center_on_current_position(&mut self, store: &mut MapStateStore, on_error: ErrorCallback) {
        self.generation += 1;
        // Every held continuation now belongs to a superseded request whose
        // completion poll would discard; drop them here so a reply that
        // never arrives cannot keep its callback alive.
        self.pending.clear();
        if self.source.is_none() {
            self.fail_position_request(store, GEOLOCATION_UNAVAILABLE.to_string(), on_error);
            return;
        }

        let reply = PositionReply::new(self.fix_tx.clone(), self.generation);
        self.pending.insert(self.generation, on_error);
        if let Some(source) = self.source.as_mut() {
            source.request_position(PositionOptions::high_accuracy(), reply);
        }
    }

    /// Drains queued widget move events and geolocation completions.
    ///
    /// The cooperative event pump; call once per UI frame. Move events are
    /// applied in emission order without coalescing (each write is an
    /// idempotent overwrite).
    pub fn poll(&mut self, store: &mut MapStateStore) {
        while let Ok(center) = self.move_rx.try_recv() {
            store.set_map_center(Some(center));
        }

        while let Ok(message) = self.fix_rx.try_recv() {
            let on_error = self.pending.remove(&message.generation);
            if message.generation != self.generation {
                log::debug!(
                    "discarding stale geolocation fix (request {} superseded by {})",
                    message.generation,
                    self.generation
                );
                continue;
            }
            match message.outcome {
                Ok(fix) => {
                    log::debug!("geolocation fix at {}", fix);
                    self.show_marker(store, MarkerRole::CurrentLocation, fix);
                    self.center_on(store, fix);
                }
                Err(reason) => {
                    if let Some(on_error) = on_error {
                        self.fail_position_request(store, reason, on_error);
                    }
                }
            }
        }
    }

    /// Shared failure path: detach the current-location marker, surface the
    /// message, resync the displayed center to the widget's actual one.
    /// The resync is skipped when no map exists yet.
    fn fail_position_request(
        &mut self,
        store: &mut MapStateStore,
        message: String,
        mut on_error: ErrorCallback,
    ) {
        log::debug!("geolocation request failed: {}", message);
        if let Some(marker) = store.marker(MarkerRole::CurrentLocation) {
            if let Some(widget) = store.map_mut() {
                widget.detach_marker(marker);
            }
        }
        on_error(message);
        if store.has_map() {
            self.on_map_moved(store);
        }
    }
}

impl Default for MapCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
