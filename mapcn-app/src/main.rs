use async_trait::async_trait;
use fxhash::FxHashMap;
use mapcn::prelude::*;
use mapcn::rendering::EguiMapPainter;
use mapcn::runtime::{drive_frames, frame_interval};

const TILE_SIZE: u32 = 256;

/// Standalone demo viewer. Pass `--headless` to run a scripted tour without
/// a window and log what each frame would draw.
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--headless") {
        run_headless().await;
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("mapcn - animated map demo"),
        ..Default::default()
    };

    eframe::run_native(
        "mapcn-app",
        options,
        Box::new(|_cc| Box::new(DemoApp::new())),
    )?;

    Ok(())
}

fn cities() -> [(&'static str, LatLng); 5] {
    [
        ("San Francisco", LatLng::new(37.7749, -122.4194)),
        ("New York", LatLng::new(40.7128, -74.0060)),
        ("London", LatLng::new(51.5074, -0.1278)),
        ("Tokyo", LatLng::new(35.6762, 139.6503)),
        ("Sydney", LatLng::new(-33.8688, 151.2093)),
    ]
}

fn demo_map(size: Point) -> AnimatedMap<HeadlessSurface> {
    let surface = HeadlessSurface::new(CameraState::new(cities()[0].1, 12.0), size);
    let mut map = AnimatedMap::with_options(surface, MapOptions::with_profile(AnimationProfile::Balanced));

    map.add_route(
        RouteSpec::new(vec![
            LatLng::new(37.7955, -122.3937),
            LatLng::new(37.7880, -122.4075),
            LatLng::new(37.7793, -122.4193),
            LatLng::new(37.7694, -122.4862),
        ])
        .with_id("ferry-to-park")
        .with_label("Ferry Building to Golden Gate Park")
        .with_style(RouteStyleConfig::navigation()),
    );
    map.add_route(
        RouteSpec::new(vec![
            LatLng::new(37.8024, -122.4058),
            LatLng::new(37.8087, -122.4098),
            LatLng::new(37.8080, -122.4177),
        ])
        .with_id("walk")
        .with_style(RouteStyleConfig::walking()),
    );

    let styles = [
        MarkerStyleConfig::default(),
        MarkerStyleConfig::prominent().with_kind(MarkerStyleKind::Radar),
        MarkerStyleConfig::elegant(),
        MarkerStyleConfig::default().with_kind(MarkerStyleKind::Ring),
        MarkerStyleConfig::minimal(),
    ];
    for ((name, position), style) in cities().into_iter().zip(styles) {
        map.add_marker(MarkerSpec::new(name, position, Color::from_hex(0xef4444)).with_style(style));
    }
    map
}

fn tour_stops() -> Vec<TourStop> {
    cities()
        .into_iter()
        .map(|(name, position)| TourStop::labeled(position, name))
        .collect()
}

async fn run_headless() {
    let mut map = demo_map(Point::new(800.0, 600.0));
    map.mark_ready();
    let _handle = map.controller_mut().start_tour(
        tour_stops(),
        10.0,
        Duration::from_millis(200),
        Duration::from_millis(400),
        |index, stop| log::info!("reached stop {} ({:?})", index, stop.label),
    );

    let frames = drive_frames(&mut map, frame_interval(60), 10_000, |frame| {
        log::debug!("frame: {} draw commands", frame.len());
    })
    .await;

    let camera = map.controller().camera();
    log::info!(
        "tour finished after {} frames at {:.4}, {:.4} zoom {:.2}",
        frames,
        camera.center.lat,
        camera.center.lng,
        camera.zoom
    );
}

/// Procedural tiles so the demo runs without network access
struct GridTileSource;

#[async_trait]
impl TileRasterSource for GridTileSource {
    async fn fetch(&self, coord: TileCoord) -> mapcn::Result<image::RgbaImage> {
        let shade = if (coord.x + coord.y) % 2 == 0 { 236 } else { 226 };
        Ok(image::RgbaImage::from_fn(TILE_SIZE, TILE_SIZE, |x, y| {
            if x % 64 == 0 || y % 64 == 0 {
                image::Rgba([200, 205, 214, 255])
            } else {
                image::Rgba([shade, shade, shade - 6, 255])
            }
        }))
    }

    fn attribution(&self) -> Option<&str> {
        Some("procedural grid")
    }
}

struct DemoApp {
    map: AnimatedMap<HeadlessSurface>,
    tiles: ThemedTileLayer<GridTileSource>,
    textures: FxHashMap<TileCoord, egui::TextureHandle>,
    theme: String,
    tour: Option<TourHandle>,
    tour_status: String,
    reveal: f64,
}

impl DemoApp {
    fn new() -> Self {
        Self {
            map: demo_map(Point::new(1200.0, 800.0)),
            tiles: ThemedTileLayer::new(GridTileSource),
            textures: FxHashMap::default(),
            theme: "identity".to_string(),
            tour: None,
            tour_status: String::new(),
            reveal: 0.0,
        }
    }

    fn set_theme(&mut self, name: &str) {
        if self.map.set_theme_by_name(name) {
            self.tiles.set_theme(self.map.theme().as_array());
            self.textures.clear();
        }
    }

    /// Loops the reveal of the navigation route
    fn advance_reveal(&mut self) {
        self.reveal = (self.reveal + 0.004) % 1.0;
        if let Some(route) = self.map.route_mut("ferry-to-park") {
            route.style = route
                .style
                .clone()
                .with_animation_progress(Some(self.reveal));
        }
    }

    fn upload_tiles(&mut self, ctx: &egui::Context, commands: &[DrawCommand]) {
        for command in commands {
            if let DrawCommand::Tile { coord, .. } = command {
                if self.textures.contains_key(coord) {
                    continue;
                }
                if let Some(tile) = self.tiles.themed_tile(*coord) {
                    let size = [tile.width() as usize, tile.height() as usize];
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, tile.as_raw());
                    let texture =
                        ctx.load_texture(format!("tile-{coord}"), image, egui::TextureOptions::LINEAR);
                    self.textures.insert(*coord, texture);
                }
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Fly to:");
            for (name, position) in cities() {
                if ui.button(name).clicked() {
                    self.map.controller_mut().fly_to_default(position, 11.0);
                }
            }

            ui.separator();
            if ui.button("+").clicked() {
                self.map.controller_mut().zoom_in();
            }
            if ui.button("-").clicked() {
                self.map.controller_mut().zoom_out();
            }
            if ui.button("Rotate 45").clicked() {
                let target = self.map.controller().rotation() + 45.0;
                let duration = self.map.controller().animation_config().rotate_duration();
                self.map.controller_mut().rotate_to(target, duration);
            }
            if ui.button("North up").clicked() {
                self.map.controller_mut().reset_rotation();
            }
            if ui.button("Fit all").clicked() {
                self.map.fit_to_content();
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Start tour").clicked() {
                self.tour = Some(self.map.controller_mut().start_tour(
                    tour_stops(),
                    10.0,
                    Duration::from_secs(2),
                    Duration::from_millis(2500),
                    |index, stop| log::info!("tour stop {}: {:?}", index, stop.label),
                ));
                self.tour_status = "touring".to_string();
            }
            if ui.button("Stop tour").clicked() {
                self.map.controller_mut().cancel_tour();
            }
            if let Some(outcome) = self.tour.as_mut().and_then(|handle| handle.try_outcome()) {
                self.tour_status = format!("{outcome:?}");
                self.tour = None;
            }
            ui.label(&self.tour_status);

            ui.separator();
            let mut selected = self.theme.clone();
            egui::ComboBox::from_label("Theme")
                .selected_text(&selected)
                .show_ui(ui, |ui| {
                    for name in MapcnThemes::names() {
                        ui.selectable_value(&mut selected, name.to_string(), *name);
                    }
                });
            if selected != self.theme {
                self.set_theme(&selected);
                self.theme = selected;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let camera = self.map.controller().camera();
                ui.label(format!(
                    "Center: {:.4}, {:.4} | Zoom: {:.2} | Rotation: {:.0}",
                    camera.center.lat, camera.center.lng, camera.zoom, camera.rotation
                ));
            });
        });

        if let Some(message) = self.tiles.banner().message() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 38, 38), message);
                if ui.button("Dismiss").clicked() {
                    self.tiles.banner_mut().dismiss();
                }
            });
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
            self.map
                .controller_mut()
                .surface_mut()
                .set_size(Point::new(rect.width() as f64, rect.height() as f64));
            if !self.map.controller().is_ready() {
                self.map.mark_ready();
            }

            self.advance_reveal();
            let frame = self.map.frame(Instant::now());
            let viewport = self.map.viewport();
            let tiles = futures::executor::block_on(self.tiles.load_visible(&viewport));
            self.upload_tiles(ctx, &tiles);

            let painter = ui.painter_at(rect);
            let map_painter = EguiMapPainter::new(&painter, rect.min);
            map_painter.paint(&tiles, |coord| self.textures.get(&coord).map(|t| t.id()));
            map_painter.paint(frame.commands(), |_| None);
        });

        ctx.request_repaint();
    }
}
