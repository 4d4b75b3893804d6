pub mod renderer;
pub mod simplify;
pub mod spec;
pub mod style;
pub mod utils;

pub use renderer::RouteRenderer;
pub use simplify::simplify_route;
pub use spec::RouteSpec;
pub use style::{RouteStyleConfig, RouteStyleKind};
pub use utils::RouteUtils;
