use crate::core::geo::TileCoord;
use serde::{Deserialize, Serialize};

#[cfg(feature = "render")]
use async_trait::async_trait;

/// Produces decoded raster tiles. Implementations own the transport
/// (HTTP client, disk cache, generated imagery); failures are returned as
/// [`crate::MapError::TileLoad`] and end up in the layer's error banner.
#[cfg(feature = "render")]
#[async_trait]
pub trait TileRasterSource: Send + Sync {
    async fn fetch(&self, coord: TileCoord) -> crate::Result<image::RgbaImage>;

    /// Attribution text the host should display next to the map
    fn attribution(&self) -> Option<&str> {
        None
    }
}

/// Slippy-map URL pattern with `{s}`, `{z}`, `{x}`, `{y}` and optional
/// `{r}` (retina suffix) placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUrlTemplate {
    pub template: String,
    #[serde(default)]
    pub subdomains: Vec<String>,
    #[serde(default)]
    pub retina: bool,
}

impl TileUrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: Vec::new(),
            retina: false,
        }
    }

    pub fn with_subdomains<I, T>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_retina(mut self, retina: bool) -> Self {
        self.retina = retina;
        self
    }

    fn carto(style: &str) -> Self {
        Self::new(format!(
            "https://{{s}}.basemaps.cartocdn.com/{style}/{{z}}/{{x}}/{{y}}{{r}}.png"
        ))
        .with_subdomains(["a", "b", "c", "d"])
    }

    pub fn light() -> Self {
        Self::carto("light_all")
    }

    pub fn dark() -> Self {
        Self::carto("dark_all")
    }

    pub fn voyager() -> Self {
        Self::carto("rastertiles/voyager")
    }

    pub fn openstreetmap() -> Self {
        Self::new("https://tile.openstreetmap.org/{z}/{x}/{y}.png")
    }

    /// Template for a named base map (`light`, `dark`, `voyager`, `osm`)
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" | "positron" => Some(Self::light()),
            "dark" | "dark_matter" => Some(Self::dark()),
            "voyager" => Some(Self::voyager()),
            "osm" | "openstreetmap" => Some(Self::openstreetmap()),
            _ => None,
        }
    }

    pub fn url(&self, coord: TileCoord) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let index = (coord.x as usize + coord.y as usize) % self.subdomains.len();
            self.subdomains[index].as_str()
        };

        self.template
            .replace("{s}", subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", if self.retina { "@2x" } else { "" })
    }
}
