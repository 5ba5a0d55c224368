pub mod fleet;
pub mod geometry;
pub mod map;
pub mod routing;
pub mod shared;
pub mod style;

pub mod prelude {
    pub use crate::fleet::{Vehicle, VehicleType, Waypoint};
    pub use crate::geometry::{Extractor, RouteMetrics, RoutePath};
    pub use crate::map::{
        FleetRoutes, LogNotifier, MapSurface, Notice, Notifier, RenderReport, RouteDisplayEntry,
        RouteEntry, RouteRenderer, RouteState, SingleRoute,
    };
    pub use crate::routing::{
        Config, GeometrySource, RouteGeometry, RouteGeometryFetcher, RouteRequest, TravelMode,
    };
    pub use crate::shared::{Coordinate, Distance};
    pub use crate::style::{LineStyle, color_for, style_for};
}
