mod config;
mod fetcher;
pub mod transport;

pub use config::*;
pub use fetcher::*;

use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;

use crate::{
    fleet::VehicleType,
    geometry::{Extractor, RouteMetrics, RoutePath},
    shared::Coordinate,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Routing API key missing from {0}")]
    ConfigurationMissing(String),
    #[error("Route endpoint {0} is not a valid coordinate")]
    InvalidEndpoint(Coordinate),
    #[error("Routing API timed out after {attempts} attempts")]
    Timeout { attempts: u32 },
    #[error("Routing API returned HTTP {status}")]
    Http { status: u16, body: String },
    #[error("Routing request failed: {0}")]
    Transport(String),
    #[error("Malformed routing response: {0}")]
    MalformedResponse(String),
    #[error("Route data has no recognizable geometry")]
    ExtractionMismatch,
    #[error("Route geometry has fewer than two points")]
    EmptyGeometry,
}

/// The routing API's travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Drive,
    Truck,
    Motorcycle,
}

impl TravelMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Truck => "truck",
            TravelMode::Motorcycle => "motorcycle",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VehicleType> for TravelMode {
    fn from(value: VehicleType) -> Self {
        match value {
            VehicleType::Truck => TravelMode::Truck,
            VehicleType::Motorcycle => TravelMode::Motorcycle,
            VehicleType::Car | VehicleType::Bus | VehicleType::Van => TravelMode::Drive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub waypoints: Vec<Coordinate>,
    pub vehicle: VehicleType,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
            vehicle: VehicleType::default(),
        }
    }

    pub fn with_waypoints<I: IntoIterator<Item = Coordinate>>(mut self, waypoints: I) -> Self {
        self.waypoints = waypoints.into_iter().collect();
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleType) -> Self {
        self.vehicle = vehicle;
        self
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.vehicle.into()
    }

    /// Intermediate stops that can be sent to the routing API.
    pub fn routable_waypoints(&self) -> impl Iterator<Item = &Coordinate> {
        self.waypoints.iter().filter(|waypoint| waypoint.is_routable())
    }

    /// `lat,lon` pairs joined by `|`: origin, routable stops, destination.
    pub fn waypoints_param(&self) -> String {
        std::iter::once(&self.origin)
            .chain(self.routable_waypoints())
            .chain(std::iter::once(&self.destination))
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Anything that can produce road geometry for a route request.
pub trait GeometrySource {
    fn fetch(&self, request: &RouteRequest) -> Result<RouteResponse, Error>;
}

/// Resolved geometry for one route.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteGeometry {
    Available(RoutePath),
    Unavailable(Error),
}

impl RouteGeometry {
    /// Normalizes a route payload of unknown shape.
    pub fn from_payload(payload: &Value, extractor: &Extractor) -> Self {
        match extractor.extract(payload) {
            None => RouteGeometry::Unavailable(Error::ExtractionMismatch),
            Some(points) if points.len() < 2 => RouteGeometry::Unavailable(Error::EmptyGeometry),
            Some(points) => {
                RouteGeometry::Available(RoutePath::new(points, RouteMetrics::from_payload(payload)))
            }
        }
    }

    /// Fetches live geometry and normalizes it.
    pub fn fetch<S: GeometrySource + ?Sized>(
        source: &S,
        request: &RouteRequest,
        extractor: &Extractor,
    ) -> Self {
        match source.fetch(request) {
            Ok(response) => Self::from_payload(response.as_value(), extractor),
            Err(err) => RouteGeometry::Unavailable(err),
        }
    }
}
