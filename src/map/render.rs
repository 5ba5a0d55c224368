use serde::Deserialize;
use serde_json::Value;
use std::iter::once;
use tracing::{debug, info};

use crate::{
    fleet::{Vehicle, VehicleType, Waypoint},
    geometry::{Extractor, RouteMetrics},
    map::{
        Error, Notifier,
        legend::{Legend, LegendEntry, TOGGLE_SCRIPT},
        surface::{Cluster, Control, Icon, Layer, LayerGroup, LayerSink, MapSurface, Marker, Polyline, Popup},
    },
    routing::{self, GeometrySource, RouteGeometry, RouteRequest},
    shared::{Coordinate, escape_html, path_length},
    style::{self, LineStyle, FALLBACK_STYLE, REAL_ROUTE_STYLE},
};

const CLUSTER_THRESHOLD: usize = 10;
const DEFAULT_ZOOM: u8 = 13;
const FLEET_MAP_HEIGHT: u32 = 500;
const STOP_RADIUS: f64 = 6.0;

const FALLBACK_WARNING: &str = r#"<div id="route-fallback-warning" style="position: fixed; bottom: 10px; left: 10px; z-index: 1000; background-color: #ffcccc; padding: 10px; border-radius: 5px; border: 2px solid red; font-weight: bold; max-width: 300px;">&#9888; WARNING: this route is a straight-line approximation and does NOT follow real roads!</div>"#;

/// How a route ended up on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteState {
    RealGeometryRendered,
    FallbackStraightLineRendered,
    /// The surface rejected even the straight line. Markers drawn before
    /// the failure stay on the map.
    RenderFailed(Error),
}

impl RouteState {
    pub fn line_added(&self) -> bool {
        !matches!(self, RouteState::RenderFailed(_))
    }
}

/// One route on its own map.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleRoute {
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    /// Line color, the first palette color when unset.
    #[serde(default)]
    pub color: Option<String>,
    /// Geometry already computed by the route planner, in any shape the
    /// extractor understands.
    #[serde(default)]
    pub route_data: Option<Value>,
}

impl SingleRoute {
    pub fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            waypoints: Vec::new(),
            vehicle_type: VehicleType::default(),
            color: None,
            route_data: None,
        }
    }

    pub fn with_waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Builds a route from a planner result that lists its own `waypoints`.
    ///
    /// Each entry has a `location` of `[lat, lon]` and an optional `name`.
    /// The first and last entries are the endpoints; entries in between
    /// become named stops, skipping any without a location. Without a
    /// `waypoints` list the endpoints are the ends of the result's geometry.
    /// `None` when no start and end can be found.
    pub fn from_route_data(data: &Value, extractor: &Extractor) -> Option<Self> {
        let (origin, destination, waypoints) = match data.get("waypoints") {
            Some(listed) => {
                let (first, rest) = listed.as_array()?.split_first()?;
                let (last, middle) = rest.split_last()?;
                let stops = middle
                    .iter()
                    .filter_map(|entry| {
                        let mut stop = Waypoint::new(location(entry)?);
                        stop.name = entry.get("name").and_then(Value::as_str).map(str::to_string);
                        Some(stop)
                    })
                    .collect();
                (location(first)?, location(last)?, stops)
            }
            None => {
                let points = extractor.extract(data)?;
                if points.len() < 2 {
                    return None;
                }
                (*points.first()?, *points.last()?, Vec::new())
            }
        };
        Some(Self {
            route_data: Some(data.clone()),
            ..Self::new(origin, destination).with_waypoints(waypoints)
        })
    }
}

/// A planner waypoint's `location`, either `[lat, lon]` or an object.
fn location(entry: &Value) -> Option<Coordinate> {
    let location = entry.get("location")?;
    match location.as_array() {
        Some(pair) => Some(Coordinate::new(pair.first()?.as_f64()?, pair.get(1)?.as_f64()?)),
        None => serde_json::from_value(location.clone()).ok(),
    }
}

/// One vehicle's route on a shared fleet map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub vehicle: Vehicle,
    #[serde(default)]
    pub passengers: Vec<Waypoint>,
    /// Stable identifier; keeps the route's color across re-renders.
    #[serde(default)]
    pub route_id: Option<String>,
    /// Estimated travel time in minutes.
    #[serde(default)]
    pub estimated_time: Option<f64>,
    #[serde(default)]
    pub route_data: Option<Value>,
}

/// Several routes sharing an origin and destination.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetRoutes {
    pub origin: Coordinate,
    pub destination: Coordinate,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteDisplayEntry {
    pub index: usize,
    pub vehicle: Vehicle,
    pub passengers: usize,
    pub color: String,
    pub style: LineStyle,
    pub geometry: RouteGeometry,
    pub state: RouteState,
}

impl RouteDisplayEntry {
    /// Why the route is not drawn on real road geometry, if it isn't.
    pub fn degradation_reason(&self) -> Option<String> {
        match (&self.state, &self.geometry) {
            (RouteState::RealGeometryRendered, _) => None,
            (RouteState::RenderFailed(err), _) => Some(err.to_string()),
            (_, RouteGeometry::Unavailable(err)) => Some(err.to_string()),
            // Geometry was found but the surface refused it.
            (_, RouteGeometry::Available(_)) => Some("road geometry could not be drawn".into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub surface: MapSurface,
    pub routes: Vec<RouteDisplayEntry>,
}

impl RenderReport {
    pub fn to_html(&self) -> String {
        self.surface.to_html()
    }
}

struct RoutePlan<'a> {
    title: String,
    origin: Coordinate,
    destination: Coordinate,
    stops: &'a [Waypoint],
    color: &'a str,
    real_style: LineStyle,
    fallback_style: LineStyle,
    fallback_tooltip: String,
    real_labels: &'a dyn Fn(&RouteMetrics) -> (String, Popup),
}

/// Draws routes onto map surfaces.
///
/// Geometry comes from embedded route data when it holds a drawable path,
/// then from the live source, and as a last resort from a straight line
/// through the stops.
pub struct RouteRenderer<S> {
    source: S,
    extractor: Extractor,
}

impl<S: GeometrySource> RouteRenderer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: Extractor::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn resolve_geometry(&self, embedded: Option<&Value>, request: &RouteRequest) -> RouteGeometry {
        if let Some(payload) = embedded {
            match RouteGeometry::from_payload(payload, &self.extractor) {
                RouteGeometry::Available(path) => return RouteGeometry::Available(path),
                RouteGeometry::Unavailable(reason) => {
                    debug!("Embedded route data not drawable ({reason}), asking the routing API")
                }
            }
        }

        match RouteGeometry::fetch(&self.source, request, &self.extractor) {
            RouteGeometry::Available(mut path) => {
                if let Some(payload) = embedded {
                    path.metrics = path.metrics.or(RouteMetrics::from_payload(payload));
                }
                RouteGeometry::Available(path)
            }
            unavailable => unavailable,
        }
    }

    pub fn render_route<N: Notifier>(&self, route: &SingleRoute, notifier: &mut N) -> RenderReport {
        let color = route
            .color
            .clone()
            .unwrap_or_else(|| style::color_for(0, None).to_string());
        let center: Coordinate = [route.origin, route.destination].into_iter().sum();
        let mut surface = MapSurface::new(center, DEFAULT_ZOOM);

        let start = Marker::pin(route.origin, Icon::new("flag", "green"))
            .with_tooltip("Start (origin)")
            .with_popup(Popup::new("<b>Start</b><br>Garage / origin"));
        add_or_report(&mut surface, start, "the start marker", notifier);
        let end = Marker::pin(route.destination, Icon::new("flag-checkered", "red"))
            .with_tooltip("End (destination)")
            .with_popup(Popup::new("<b>End</b><br>Company / destination"));
        add_or_report(&mut surface, end, "the end marker", notifier);

        let stop_markers = route
            .waypoints
            .iter()
            .enumerate()
            .map(|(stop, waypoint)| waypoint_marker(stop, waypoint, &color));
        if route.waypoints.len() > CLUSTER_THRESHOLD {
            let mut cluster = Cluster::new("Stops");
            for (stop, marker) in stop_markers.enumerate() {
                add_or_report(&mut cluster, marker, &format!("stop {}", stop + 1), notifier);
            }
            add_or_report(&mut surface, cluster, "the stop cluster", notifier);
        } else {
            for (stop, marker) in stop_markers.enumerate() {
                add_or_report(&mut surface, marker, &format!("stop {}", stop + 1), notifier);
            }
        }

        let request = RouteRequest::new(route.origin, route.destination)
            .with_waypoints(route.waypoints.iter().map(|waypoint| waypoint.coordinate))
            .with_vehicle(route.vehicle_type);
        let geometry = self.resolve_geometry(route.route_data.as_ref(), &request);

        let real_labels = |metrics: &RouteMetrics| {
            let summary = metrics.summary();
            (
                format!("Real road route | {summary}"),
                Popup::new(format!("Distance and estimated time: {}", escape_html(&summary))),
            )
        };
        let plan = RoutePlan {
            title: "the route".to_string(),
            origin: route.origin,
            destination: route.destination,
            stops: &route.waypoints,
            color: &color,
            real_style: REAL_ROUTE_STYLE,
            fallback_style: FALLBACK_STYLE,
            fallback_tooltip: "WARNING: simplified path (does not follow real roads)".to_string(),
            real_labels: &real_labels,
        };
        let state = self.draw_route(&mut surface, &plan, &geometry, notifier);
        if state == RouteState::FallbackStraightLineRendered {
            surface.add_overlay(FALLBACK_WARNING);
        }

        for control in [Control::Fullscreen, Control::Locate, Control::Measure] {
            surface.add_control(control);
        }

        let entry = RouteDisplayEntry {
            index: 0,
            vehicle: Vehicle {
                model: route.vehicle_type.to_string(),
                ..Default::default()
            },
            passengers: route.waypoints.len(),
            style: drawn_style(&state, &plan),
            color,
            geometry,
            state,
        };
        RenderReport {
            surface,
            routes: vec![entry],
        }
    }

    /// Renders a planner result on its own map, see
    /// [`SingleRoute::from_route_data`]. Warns and returns `None` when the
    /// result has no usable start and end.
    pub fn render_route_data<N: Notifier>(
        &self,
        data: &Value,
        notifier: &mut N,
    ) -> Option<RenderReport> {
        let Some(route) = SingleRoute::from_route_data(data, &self.extractor) else {
            notifier.warning("Insufficient data to show the route on the map");
            return None;
        };
        Some(self.render_route(&route, notifier))
    }

    pub fn render_routes<N: Notifier>(&self, fleet: &FleetRoutes, notifier: &mut N) -> RenderReport {
        let center: Coordinate = [fleet.origin, fleet.destination].into_iter().sum();
        let mut surface = MapSurface::new(center, DEFAULT_ZOOM).with_height(FLEET_MAP_HEIGHT);
        for control in [Control::Scale, Control::Fullscreen, Control::Locate, Control::Measure] {
            surface.add_control(control);
        }

        let start = Marker::pin(fleet.origin, Icon::new("play", "green"))
            .with_tooltip("Start")
            .with_popup(Popup::new("<b>Start</b><br>Garage"));
        add_or_report(&mut surface, start, "the start marker", notifier);
        let end = Marker::pin(fleet.destination, Icon::new("stop", "red"))
            .with_tooltip("End")
            .with_popup(Popup::new("<b>End</b><br>Company"));
        add_or_report(&mut surface, end, "the end marker", notifier);

        let mut legend = Legend::default();
        let mut entries = Vec::with_capacity(fleet.routes.len());
        for (index, entry) in fleet.routes.iter().enumerate() {
            let number = index + 1;
            let vehicle = &entry.vehicle;
            let passengers = entry.passengers.len();
            let color = style::color_for(index, entry.route_id.as_deref());
            let line_style = style::style_for(index);
            // Leaflet's layer control shows group names as HTML.
            let group_name = format!("Route {number}: {}", escape_html(&vehicle.model));
            let mut group = LayerGroup::new(group_name.clone());

            let mut cluster = Cluster::new(format!("Stops route {number}"));
            for (stop, passenger) in entry.passengers.iter().enumerate() {
                let name = escape_html(passenger.name.as_deref().unwrap_or("Passenger"));
                let marker = Marker::circle(passenger.coordinate, STOP_RADIUS, color)
                    .with_tooltip(format!("Route {number} - {name}"))
                    .with_popup(Popup::new(passenger_popup(stop, number, passenger, vehicle)));
                let what = format!("stop {} of route {number}", stop + 1);
                add_or_report(&mut cluster, marker, &what, notifier);
            }
            add_or_report(&mut group, cluster, "the stop cluster", notifier);

            let request = RouteRequest::new(fleet.origin, fleet.destination)
                .with_waypoints(entry.passengers.iter().map(|passenger| passenger.coordinate))
                .with_vehicle(vehicle.vehicle_type());
            let geometry = self.resolve_geometry(entry.route_data.as_ref(), &request);

            let real_labels = |metrics: &RouteMetrics| {
                (
                    format!(
                        "Route {number}: {} - {passengers} passengers",
                        escape_html(&vehicle.model)
                    ),
                    Popup::new(route_popup(number, vehicle, passengers, metrics)),
                )
            };
            let plan = RoutePlan {
                title: format!("route {number}"),
                origin: fleet.origin,
                destination: fleet.destination,
                stops: &entry.passengers,
                color,
                real_style: line_style,
                fallback_style: LineStyle::dashed(line_style.weight, 0.5, "5, 5"),
                fallback_tooltip: format!(
                    "WARNING: simplified path for route {number} (does not follow real roads)"
                ),
                real_labels: &real_labels,
            };
            let state = self.draw_route(&mut group, &plan, &geometry, notifier);
            let drawn = drawn_style(&state, &plan);
            surface.add_group(group);

            legend.push(LegendEntry {
                index,
                group: group_name,
                color: color.to_string(),
                vehicle_label: vehicle.model.clone(),
                passengers,
                occupancy: vehicle.occupancy(passengers),
                estimated_minutes: entry.estimated_time,
            });
            entries.push(RouteDisplayEntry {
                index,
                vehicle: vehicle.clone(),
                passengers,
                color: color.to_string(),
                style: drawn,
                geometry,
                state,
            });
        }

        surface.add_control(Control::LayerSwitcher);
        surface.add_overlay(legend.to_html());
        surface.add_script(TOGGLE_SCRIPT);

        info!(
            "Rendered {} routes ({} with road geometry)",
            entries.len(),
            entries
                .iter()
                .filter(|entry| entry.state == RouteState::RealGeometryRendered)
                .count()
        );
        RenderReport {
            surface,
            routes: entries,
        }
    }

    fn draw_route<T: LayerSink, N: Notifier>(
        &self,
        target: &mut T,
        plan: &RoutePlan<'_>,
        geometry: &RouteGeometry,
        notifier: &mut N,
    ) -> RouteState {
        match geometry {
            RouteGeometry::Available(path) => {
                let (tooltip, popup) = (plan.real_labels)(&path.metrics);
                let line = Polyline::new(path.points.clone(), plan.color, plan.real_style)
                    .with_tooltip(tooltip)
                    .with_popup(popup);
                match target.add(line) {
                    Ok(()) => {
                        debug!("Drew {} road points for {}", path.points.len(), plan.title);
                        notifier.success(format!("Road geometry loaded for {}", plan.title));
                        return RouteState::RealGeometryRendered;
                    }
                    Err(err) => notifier.error(format!(
                        "Could not draw road geometry for {}: {err}",
                        plan.title
                    )),
                }
            }
            RouteGeometry::Unavailable(reason) => {
                notifier.warning(unavailable_message(&plan.title, reason));
            }
        }

        let points: Vec<Coordinate> = once(plan.origin)
            .chain(plan.stops.iter().map(|stop| stop.coordinate))
            .chain(once(plan.destination))
            .collect();
        let straight = path_length(&points);
        let line = Polyline::new(points, plan.color, plan.fallback_style).with_tooltip(format!(
            "{} | straight-line {:.1} km",
            plan.fallback_tooltip,
            straight.as_kilometers()
        ));
        match target.add(line) {
            Ok(()) => {
                notifier.warning(format!(
                    "Showing a straight-line path for {}; it does not follow real roads!",
                    plan.title
                ));
                RouteState::FallbackStraightLineRendered
            }
            Err(err) => {
                notifier.error(format!("Could not draw any path for {}: {err}", plan.title));
                RouteState::RenderFailed(err)
            }
        }
    }
}

fn add_or_report<T: LayerSink, N: Notifier>(
    target: &mut T,
    layer: impl Into<Layer>,
    what: &str,
    notifier: &mut N,
) -> bool {
    match target.add(layer) {
        Ok(()) => true,
        Err(err) => {
            notifier.error(format!("Could not draw {what}: {err}"));
            false
        }
    }
}

fn drawn_style(state: &RouteState, plan: &RoutePlan<'_>) -> LineStyle {
    match state {
        RouteState::RealGeometryRendered => plan.real_style,
        _ => plan.fallback_style,
    }
}

fn unavailable_message(title: &str, reason: &routing::Error) -> String {
    match reason {
        routing::Error::ConfigurationMissing(source) => format!(
            "Routing API key not configured ({source}). Set it to get real road routes."
        ),
        reason => format!("Road geometry unavailable for {title}: {reason}"),
    }
}

fn waypoint_marker(stop: usize, waypoint: &Waypoint, color: &str) -> Marker {
    let number = stop + 1;
    let name = waypoint.name.as_deref();
    let popup = format!(
        r#"<div style="font-family: Arial; width: 200px;"><h4>Stop {number}</h4><b>Passenger:</b> {}<br><b>ID:</b> {}</div>"#,
        escape_html(name.unwrap_or("Not provided")),
        escape_html(waypoint.person_id.as_deref().unwrap_or("N/A")),
    );
    Marker::pin(
        waypoint.coordinate,
        Icon::new("user", "blue").with_icon_color(color),
    )
    .with_tooltip(format!(
        "Stop {number}: {}",
        escape_html(name.unwrap_or("Passenger"))
    ))
    .with_popup(Popup::new(popup))
}

fn passenger_popup(stop: usize, route: usize, passenger: &Waypoint, vehicle: &Vehicle) -> String {
    format!(
        r#"<div style="font-family: Arial; min-width: 200px;"><h4 style="margin-bottom: 5px;">Stop {} - Route {route}</h4><b>Passenger:</b> {}<br><b>ID:</b> {}<br><hr style="margin: 5px 0;"><span style="font-size: 12px;"><b>Vehicle:</b> {} ({})<br><b>Driver:</b> {}</span></div>"#,
        stop + 1,
        escape_html(passenger.name.as_deref().unwrap_or("Not provided")),
        escape_html(passenger.person_id.as_deref().unwrap_or("N/A")),
        escape_html(&vehicle.model),
        escape_html(&vehicle.license_plate),
        escape_html(vehicle.driver.as_deref().unwrap_or("Not provided")),
    )
}

fn route_popup(route: usize, vehicle: &Vehicle, passengers: usize, metrics: &RouteMetrics) -> String {
    let distance = metrics
        .distance_km()
        .map(|km| format!("{km:.1} km"))
        .unwrap_or_else(|| "N/A".to_string());
    let duration = metrics
        .duration_minutes()
        .map(|minutes| format!("{minutes:.0} min"))
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        r#"<div style="font-family: Arial; min-width: 200px;"><h4 style="margin-bottom: 5px;">Route {route}</h4><b>Vehicle:</b> {} ({})<br><b>Driver:</b> {}<br><b>Passengers:</b> {passengers}<br><hr style="margin: 5px 0;"><b>Distance:</b> {distance}<br><b>Estimated time:</b> {duration}</div>"#,
        escape_html(&vehicle.model),
        escape_html(&vehicle.license_plate),
        escape_html(vehicle.driver.as_deref().unwrap_or("Not provided")),
    )
}
