pub mod banner;
pub mod layer;
pub mod source;

pub use banner::TileErrorBanner;
pub use layer::{tile_screen_rect, visible_tiles};
#[cfg(feature = "render")]
pub use layer::ThemedTileLayer;
#[cfg(feature = "render")]
pub use source::TileRasterSource;
pub use source::TileUrlTemplate;
