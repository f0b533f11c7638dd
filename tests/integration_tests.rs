//! End-to-end scenarios over the public API: a headless map widget, a
//! manually driven geolocation source, the coordinator and the
//! notification queue wired the way the demo app wires them.

use geoscope::prelude::*;

struct Viewer {
    coordinator: MapCoordinator,
    store: MapStateStore,
    notifications: Notifications,
    geolocation: ManualPositionHandle,
    input: CoordinateInput,
}

/// Builds an initialized viewer; initialization fires the first
/// geolocation request, left pending on the returned handle.
fn viewer() -> Viewer {
    let (source, geolocation) = ManualPosition::new();
    let mut coordinator = MapCoordinator::with_source(Box::new(source));
    let mut store = MapStateStore::new();
    let notifications = Notifications::new();
    let config = MapConfig::default();

    let widget: Box<dyn MapWidget> = Box::new(HeadlessMap::new(config.center, config.zoom));
    let queue = notifications.clone();
    coordinator
        .initialize(
            &mut store,
            widget,
            &config,
            Box::new(move |message| {
                queue.push_error(message);
            }),
        )
        .unwrap();

    Viewer {
        coordinator,
        store,
        notifications,
        geolocation,
        input: CoordinateInput::new(),
    }
}

fn headless(store: &MapStateStore) -> &HeadlessMap {
    store
        .map()
        .unwrap()
        .as_any()
        .downcast_ref::<HeadlessMap>()
        .unwrap()
}

#[test]
fn init_fix_then_coordinate_entry() {
    let mut v = viewer();

    // Initialization requested one fix with high accuracy
    assert_eq!(v.geolocation.pending(), 1);
    assert!(v.geolocation.next_options().unwrap().high_accuracy);

    // Geolocation succeeds
    let fix = LatLng::new(48.26, 7.45);
    assert!(v.geolocation.resolve_next(fix));
    v.coordinator.poll(&mut v.store);

    let current = v.store.marker(MarkerRole::CurrentLocation).unwrap();
    assert!(v.store.map().unwrap().is_marker_attached(current));
    assert_eq!(v.store.map().unwrap().marker_position(current), Some(fix));
    assert_eq!(v.store.map_center(), Some(fix));
    assert!(v.notifications.is_empty());

    // User enters coordinates by hand
    v.input.sync(&v.store);
    v.input.set_text("45.5, 4.8".to_string());
    assert!(v.input.submit(&mut v.coordinator, &mut v.store));

    let entered = LatLng::new(45.5, 4.8);
    let target = v.store.marker(MarkerRole::Target).unwrap();
    assert!(v.store.map().unwrap().is_marker_attached(target));
    assert_eq!(v.store.map().unwrap().marker_position(target), Some(entered));
    assert_eq!(v.store.map_center(), Some(entered));

    // The current-location marker is untouched by the target flow
    assert!(v.store.map().unwrap().is_marker_attached(current));
    assert_eq!(v.store.map().unwrap().marker_position(current), Some(fix));
}

#[test]
fn geolocation_failure_resyncs_and_notifies_once() {
    let mut v = viewer();
    let before = headless(&v.store).center();

    assert!(v.geolocation.reject_next("User denied Geolocation"));
    v.coordinator.poll(&mut v.store);

    // Center unchanged, exactly one non-empty error, marker detached
    assert_eq!(v.store.map_center(), Some(before));
    let alerts = v.notifications.snapshot();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Error);
    assert!(!alerts[0].message.is_empty());
    let current = v.store.marker(MarkerRole::CurrentLocation).unwrap();
    assert!(!v.store.map().unwrap().is_marker_attached(current));
}

#[test]
fn host_without_geolocation_fails_with_fixed_message() {
    let mut coordinator = MapCoordinator::new();
    let mut store = MapStateStore::new();
    let notifications = Notifications::new();
    let config = MapConfig::default();
    let queue = notifications.clone();

    coordinator
        .initialize(
            &mut store,
            Box::new(HeadlessMap::new(config.center, config.zoom)),
            &config,
            Box::new(move |message| {
                queue.push_error(message);
            }),
        )
        .unwrap();

    let alerts = notifications.snapshot();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].message,
        "Geolocation is not available in your browser."
    );
    // Displayed coordinates resynced to where the map actually is
    assert_eq!(store.map_center(), Some(config.center));
}

#[test]
fn drag_pan_updates_displayed_coordinates() {
    let mut v = viewer();
    assert!(v.geolocation.resolve_next(LatLng::new(48.26, 7.45)));
    v.coordinator.poll(&mut v.store);
    v.input.sync(&v.store);
    let shown_before = v.input.text().to_string();

    // Drag east; the widget emits a move event per pan step
    let map = v
        .store
        .map_mut()
        .unwrap()
        .as_any_mut()
        .downcast_mut::<HeadlessMap>()
        .unwrap();
    map.pan_by(Point::new(120.0, 0.0));
    map.pan_by(Point::new(120.0, 0.0));
    let after = map.center();

    v.coordinator.poll(&mut v.store);
    v.input.sync(&v.store);

    assert_eq!(v.store.map_center(), Some(after));
    assert_ne!(v.input.text(), shown_before);
    assert_eq!(v.input.text(), after.rounded().to_string());
}

#[test]
fn marker_attach_is_idempotent_across_submissions() {
    let mut v = viewer();
    v.input.set_text("45.5, 4.8".to_string());
    assert!(v.input.submit(&mut v.coordinator, &mut v.store));
    v.input.set_text("46.1, 5.2".to_string());
    assert!(v.input.submit(&mut v.coordinator, &mut v.store));

    // One target overlay, at the latest point
    assert_eq!(headless(&v.store).attached_markers().len(), 1);
    let target = v.store.marker(MarkerRole::Target).unwrap();
    assert_eq!(
        v.store.map().unwrap().marker_position(target),
        Some(LatLng::new(46.1, 5.2))
    );
}

#[test]
fn rapid_gps_requests_apply_only_the_latest() {
    let mut v = viewer();

    // Button mashed twice before the first request resolves
    let queue = v.notifications.clone();
    v.coordinator.center_on_current_position(
        &mut v.store,
        Box::new(move |message| {
            queue.push_error(message);
        }),
    );
    assert_eq!(v.geolocation.pending(), 2);

    assert!(v.geolocation.resolve_next(LatLng::new(10.0, 10.0)));
    assert!(v.geolocation.resolve_next(LatLng::new(45.5, 4.8)));
    v.coordinator.poll(&mut v.store);

    assert_eq!(v.store.map_center(), Some(LatLng::new(45.5, 4.8)));
    assert!(v.notifications.is_empty());
}

#[test]
fn duplicate_mount_keeps_the_first_map() {
    let mut v = viewer();
    let fix = LatLng::new(48.26, 7.45);
    assert!(v.geolocation.resolve_next(fix));
    v.coordinator.poll(&mut v.store);

    // A second mount must not rebuild the widget or re-request a fix
    let config = MapConfig::default();
    v.coordinator
        .initialize(
            &mut v.store,
            Box::new(HeadlessMap::new(config.center, config.zoom)),
            &config,
            Box::new(|_| {}),
        )
        .unwrap();

    assert_eq!(v.geolocation.pending(), 0);
    assert_eq!(v.store.map_center(), Some(fix));
    let current = v.store.marker(MarkerRole::CurrentLocation).unwrap();
    assert!(v.store.map().unwrap().is_marker_attached(current));
}

#[test]
fn malformed_entry_changes_nothing() {
    let mut v = viewer();
    assert!(v.geolocation.resolve_next(LatLng::new(48.26, 7.45)));
    v.coordinator.poll(&mut v.store);
    let center = v.store.map_center();
    let attached = headless(&v.store).attached_markers().len();

    v.input.set_text("not,numbers".to_string());
    assert!(!v.input.submit(&mut v.coordinator, &mut v.store));

    assert_eq!(v.store.map_center(), center);
    assert_eq!(headless(&v.store).attached_markers().len(), attached);
    assert!(v.notifications.is_empty());
}

#[test]
fn dismissing_alerts_preserves_order_of_the_rest() {
    let mut v = viewer();
    assert!(v.geolocation.reject_next("Timeout expired"));
    v.coordinator.poll(&mut v.store);

    let queue = v.notifications.clone();
    v.coordinator.center_on_current_position(
        &mut v.store,
        Box::new(move |message| {
            queue.push_error(message);
        }),
    );
    assert!(v.geolocation.reject_next("Position unavailable"));
    v.coordinator.poll(&mut v.store);

    let alerts = v.notifications.snapshot();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].message, "Timeout expired");
    assert_eq!(alerts[1].message, "Position unavailable");

    v.notifications.dismiss(alerts[0].id);
    let rest = v.notifications.snapshot();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].message, "Position unavailable");
}
