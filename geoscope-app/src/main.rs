use anyhow::{anyhow, Result};
use geoscope::prelude::*;
use geoscope::ui::widgets;

/// Standalone viewer demonstrating the coordination core: headless map
/// surface with drag-to-pan, coordinate entry, a GPS button and the
/// dismissible alert list. Geolocation is simulated; the side panel drives
/// the pending requests by hand.
fn main() -> Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_title("Geoscope"),
        ..Default::default()
    };

    eframe::run_native(
        "geoscope-app",
        options,
        Box::new(|cc| Box::new(GeoscopeApp::new(cc))),
    )
    .map_err(|e| anyhow!("eframe failed: {e}"))?;

    Ok(())
}

/// Where the simulated GPS claims we are
const SIMULATED_FIX: LatLng = LatLng {
    lat: 48.262150,
    lng: 7.428933,
};

struct GeoscopeApp {
    coordinator: MapCoordinator,
    store: MapStateStore,
    notifications: Notifications,
    input: CoordinateInput,
    geolocation: ManualPositionHandle,
    gps_available: bool,
}

impl GeoscopeApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let (source, geolocation) = ManualPosition::new();
        let mut coordinator = MapCoordinator::with_source(Box::new(source));
        let mut store = MapStateStore::new();
        let notifications = Notifications::new();

        let config = MapConfig::default();
        let widget = Box::new(HeadlessMap::new(config.center, config.zoom));
        let queue = notifications.clone();
        if let Err(e) = coordinator.initialize(
            &mut store,
            widget,
            &config,
            Box::new(move |message| {
                queue.push_error(message);
            }),
        ) {
            log::error!("map initialization failed: {e}");
        }

        Self {
            coordinator,
            store,
            notifications,
            input: CoordinateInput::new(),
            geolocation,
            gps_available: true,
        }
    }

    fn geolocation_driver(&mut self, ui: &mut egui::Ui) {
        ui.heading("Geolocation (simulated)");
        if ui
            .checkbox(&mut self.gps_available, "Capability available")
            .changed()
        {
            if self.gps_available {
                let (source, handle) = ManualPosition::new();
                self.coordinator.set_position_source(Some(Box::new(source)));
                self.geolocation = handle;
            } else {
                // Requests now fail immediately with the fixed message
                self.coordinator.set_position_source(None);
            }
        }
        ui.label(format!("Pending requests: {}", self.geolocation.pending()));
        ui.horizontal(|ui| {
            if ui.button("Deliver fix").clicked() {
                self.geolocation.resolve_next(SIMULATED_FIX);
            }
            if ui.button("Deny").clicked() {
                self.geolocation.reject_next("User denied Geolocation");
            }
        });
    }
}

impl eframe::App for GeoscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain move events and geolocation completions once per frame
        self.coordinator.poll(&mut self.store);
        self.input.sync(&self.store);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                widgets::coordinate_row(
                    ui,
                    &mut self.input,
                    &mut self.coordinator,
                    &mut self.store,
                );
                ui.separator();
                widgets::gps_button(
                    ui,
                    &mut self.coordinator,
                    &mut self.store,
                    &self.notifications,
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.store.map_center() {
                        Some(center) => ui.label(format!("Center: {}", center.rounded())),
                        None => ui.label("Center: —"),
                    };
                });
            });
        });

        egui::SidePanel::right("side")
            .default_width(240.0)
            .show(ctx, |ui| {
                self.geolocation_driver(ui);
                ui.separator();
                ui.heading("Alerts");
                widgets::alert_list(ui, &self.notifications);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::map_panel(ui, &mut self.store);
        });
    }
}
