use crate::core::{
    geo::{Point, TileCoord},
    viewport::Viewport,
};

/// Highest zoom level that has tiles
pub const MAX_TILE_ZOOM: u8 = 19;

/// Tiles covering the viewport at `floor(zoom)`, nearest to the center first
pub fn visible_tiles(viewport: &Viewport) -> Vec<TileCoord> {
    let zoom = viewport.camera.zoom.floor().clamp(0.0, MAX_TILE_ZOOM as f64) as u8;
    let bounds = viewport.bounds();
    let north_west = TileCoord::from_lat_lng(&bounds.north_west(), zoom);
    let south_east = TileCoord::from_lat_lng(&bounds.south_east(), zoom);
    let center = TileCoord::from_lat_lng(&viewport.camera.center, zoom);

    let mut tiles: Vec<TileCoord> = (north_west.y..=south_east.y)
        .flat_map(|y| (north_west.x..=south_east.x).map(move |x| TileCoord::new(x, y, zoom)))
        .collect();
    tiles.sort_by_key(|tile| {
        let dx = tile.x as i64 - center.x as i64;
        let dy = tile.y as i64 - center.y as i64;
        dx * dx + dy * dy
    });
    tiles
}

/// Screen rectangle covered by `coord`, as `(min, max)` corners
pub fn tile_screen_rect(viewport: &Viewport, coord: TileCoord) -> (Point, Point) {
    let bounds = coord.bounds();
    let a = viewport.lat_lng_to_pixel(&bounds.north_west());
    let b = viewport.lat_lng_to_pixel(&bounds.south_east());
    (
        Point::new(a.x.min(b.x), a.y.min(b.y)),
        Point::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

#[cfg(feature = "render")]
pub use themed::ThemedTileLayer;

#[cfg(feature = "render")]
mod themed {
    use super::{tile_screen_rect, visible_tiles};
    use crate::core::{geo::TileCoord, viewport::Viewport};
    use crate::rendering::context::DrawCommand;
    use crate::theme::matrix::ColorMatrix;
    use crate::tiles::{banner::TileErrorBanner, source::TileRasterSource};
    use image::RgbaImage;
    use lru::LruCache;
    use std::{num::NonZeroUsize, sync::Arc};

    const DEFAULT_CACHE_CAPACITY: usize = 256;

    /// Raster base layer with a color theme.
    ///
    /// Decoded tiles are cached as delivered by the source; the theme travels
    /// with each [`DrawCommand::Tile`] so switching themes never refetches.
    pub struct ThemedTileLayer<S: TileRasterSource> {
        source: S,
        theme: ColorMatrix,
        cache: LruCache<TileCoord, Arc<RgbaImage>>,
        banner: TileErrorBanner,
    }

    impl<S: TileRasterSource> ThemedTileLayer<S> {
        pub fn new(source: S) -> Self {
            Self::with_capacity(source, DEFAULT_CACHE_CAPACITY)
        }

        pub fn with_capacity(source: S, capacity: usize) -> Self {
            let capacity = match NonZeroUsize::new(capacity) {
                Some(capacity) => capacity,
                None => {
                    log::warn!("tile cache capacity must be positive, using 1");
                    NonZeroUsize::MIN
                }
            };
            Self {
                source,
                theme: ColorMatrix::IDENTITY,
                cache: LruCache::new(capacity),
                banner: TileErrorBanner::new(),
            }
        }

        pub fn source(&self) -> &S {
            &self.source
        }

        /// Sets the theme from raw matrix values; invalid input falls back to
        /// the identity
        pub fn set_theme(&mut self, matrix: &[f64]) {
            self.theme = ColorMatrix::from_slice(matrix);
        }

        pub fn theme(&self) -> ColorMatrix {
            self.theme
        }

        pub fn banner(&self) -> &TileErrorBanner {
            &self.banner
        }

        pub fn banner_mut(&mut self) -> &mut TileErrorBanner {
            &mut self.banner
        }

        pub fn cached_tile(&mut self, coord: TileCoord) -> Option<Arc<RgbaImage>> {
            self.cache.get(&coord).cloned()
        }

        /// Cached tile with the theme applied on the CPU, for hosts that
        /// cannot apply a color matrix while painting
        pub fn themed_tile(&mut self, coord: TileCoord) -> Option<RgbaImage> {
            let theme = self.theme;
            self.cache.get(&coord).map(|tile| {
                let mut image = RgbaImage::clone(tile);
                theme.apply_to_image(&mut image);
                image
            })
        }

        /// Fetches missing visible tiles concurrently and returns one draw
        /// command per tile that is available. Failed tiles are reported to
        /// the banner and skipped.
        pub async fn load_visible(&mut self, viewport: &Viewport) -> Vec<DrawCommand> {
            let coords = visible_tiles(viewport);
            let missing: Vec<TileCoord> = coords
                .iter()
                .copied()
                .filter(|coord| !self.cache.contains(coord))
                .collect();

            if !missing.is_empty() {
                log::debug!("fetching {} of {} visible tiles", missing.len(), coords.len());
                let source = &self.source;
                let results = futures::future::join_all(
                    missing
                        .iter()
                        .map(|coord| async move { (*coord, source.fetch(*coord).await) }),
                )
                .await;

                for (coord, result) in results {
                    match result {
                        Ok(tile) => {
                            self.cache.put(coord, Arc::new(tile));
                        }
                        Err(err) => self.banner.report(&err),
                    }
                }
            }

            let matrix = (!self.theme.is_identity()).then_some(self.theme.0);
            coords
                .into_iter()
                .filter(|coord| self.cache.contains(coord))
                .map(|coord| {
                    let (min, max) = tile_screen_rect(viewport, coord);
                    DrawCommand::Tile {
                        coord,
                        min,
                        max,
                        color_matrix: matrix,
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{geo::LatLng, viewport::CameraState};

    #[test]
    fn test_visible_tiles_cover_viewport() {
        let viewport = Viewport::new(
            CameraState::new(LatLng::new(0.0, 0.0), 3.0),
            Point::new(500.0, 500.0),
        );
        let tiles = visible_tiles(&viewport);

        // 500px at zoom 3 straddles the tile corner at the origin
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.z == 3 && t.is_valid()));
        assert!(tiles.contains(&TileCoord::new(4, 4, 3)));
        assert!(tiles.contains(&TileCoord::new(3, 3, 3)));
    }

    #[test]
    fn test_world_view_is_clamped() {
        let viewport = Viewport::new(
            CameraState::new(LatLng::new(0.0, 0.0), 0.0),
            Point::new(2000.0, 2000.0),
        );
        assert_eq!(visible_tiles(&viewport), vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_tile_rect_size_matches_tile_size() {
        let viewport = Viewport::new(
            CameraState::new(LatLng::new(10.0, 10.0), 5.0),
            Point::new(800.0, 600.0),
        );
        let (min, max) = tile_screen_rect(&viewport, TileCoord::new(16, 15, 5));
        assert!((max.x - min.x - 256.0).abs() < 1e-6);
        assert!((max.y - min.y - 256.0).abs() < 1e-6);
    }
}
