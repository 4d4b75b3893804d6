use async_trait::async_trait;
use mapcn::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Solid tiles, except one coordinate that always fails
struct FlakySource {
    broken: TileCoord,
    fetches: AtomicUsize,
}

#[async_trait]
impl TileRasterSource for FlakySource {
    async fn fetch(&self, coord: TileCoord) -> mapcn::Result<image::RgbaImage> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if coord == self.broken {
            return Err(MapError::TileLoad {
                coord,
                reason: "HTTP 404".to_string(),
            });
        }
        Ok(image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 0, 255])))
    }
}

fn viewport() -> Viewport {
    Viewport::new(
        CameraState::new(LatLng::new(0.0, 0.0), 3.0),
        Point::new(500.0, 500.0),
    )
}

#[tokio::test]
async fn test_failed_tiles_surface_in_banner() {
    let broken = TileCoord::new(3, 3, 3);
    let mut layer = ThemedTileLayer::new(FlakySource {
        broken,
        fetches: AtomicUsize::new(0),
    });

    let commands = layer.load_visible(&viewport()).await;
    assert_eq!(commands.len(), 3);
    assert!(commands
        .iter()
        .all(|c| matches!(c, DrawCommand::Tile { coord, color_matrix: None, .. } if *coord != broken)));

    let banner = layer.banner();
    assert!(banner.is_visible());
    assert_eq!(banner.failure_count(), 1);
    assert!(banner.message().unwrap().contains("3/3/3"));

    layer.banner_mut().dismiss();
    assert!(!layer.banner().is_visible());
}

#[tokio::test]
async fn test_cached_tiles_are_not_refetched() {
    let mut layer = ThemedTileLayer::new(FlakySource {
        broken: TileCoord::new(0, 0, 0),
        fetches: AtomicUsize::new(0),
    });

    layer.load_visible(&viewport()).await;
    assert_eq!(layer.source().fetches.load(Ordering::SeqCst), 4);
    layer.load_visible(&viewport()).await;
    assert_eq!(layer.source().fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_theme_travels_with_tile_commands() {
    let mut layer = ThemedTileLayer::new(FlakySource {
        broken: TileCoord::new(0, 0, 0),
        fetches: AtomicUsize::new(0),
    });
    layer.set_theme(&MapcnThemes::GRAYSCALE);

    let commands = layer.load_visible(&viewport()).await;
    assert_eq!(commands.len(), 4);
    for command in &commands {
        match command {
            DrawCommand::Tile { color_matrix, .. } => {
                assert_eq!(*color_matrix, Some(MapcnThemes::GRAYSCALE))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    // the CPU fallback applies the same theme
    let tile = layer.themed_tile(TileCoord::new(4, 4, 3)).unwrap();
    let pixel = tile.get_pixel(0, 0).0;
    assert_eq!(pixel[0], pixel[1]);
    assert_eq!(pixel[1], pixel[2]);
}

#[test]
fn test_options_round_trip_through_json() {
    let options = MapOptions {
        theme: Some("midnight".to_string()),
        ..MapOptions::with_profile(AnimationProfile::Cinematic)
    };
    let json = options.to_json_string().unwrap();
    assert_eq!(MapOptions::from_json_str(&json).unwrap(), options);

    let partial = MapOptions::from_json_str(r#"{ "camera": { "min_zoom": 9.0, "max_zoom": 3.0 } }"#)
        .unwrap();
    assert_eq!(partial.camera, CameraLimits::default());
    assert!(MapOptions::from_json_str("not json").is_err());
}
