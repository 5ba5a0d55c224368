use criterion::{Criterion, criterion_group, criterion_main};
use fleetmap::{
    fleet::{Vehicle, Waypoint},
    geometry::{Extractor, polyline},
    map::{FleetRoutes, RouteEntry, RouteRenderer},
    routing::{Error, GeometrySource, RouteRequest, RouteResponse},
    shared::Coordinate,
};
use serde_json::{Value, json};
use std::{hint::black_box, time::Duration};

/// Never reaches a routing API.
struct Offline;

impl GeometrySource for Offline {
    fn fetch(&self, _request: &RouteRequest) -> Result<RouteResponse, Error> {
        Err(Error::ConfigurationMissing("benchmark".into()))
    }
}

fn road(points: usize) -> Vec<Value> {
    (0..points)
        .map(|i| json!([-46.63 - i as f64 * 1e-4, -23.55 - i as f64 * 1e-4]))
        .collect()
}

fn fleet(routes: usize, passengers: usize) -> FleetRoutes {
    let origin = Coordinate::new(-23.55, -46.63);
    let destination = Coordinate::new(-23.60, -46.70);
    let routes = (0..routes)
        .map(|route| RouteEntry {
            vehicle: Vehicle {
                model: format!("Van {route}"),
                seats: 15,
                ..Default::default()
            },
            passengers: (0..passengers)
                .map(|stop| {
                    Waypoint::new(Coordinate::new(
                        -23.55 - stop as f64 * 1e-3,
                        -46.63 - route as f64 * 1e-3,
                    ))
                })
                .collect(),
            route_id: Some(format!("route-{route}")),
            estimated_time: Some(35.0),
            route_data: Some(json!({
                "features": [{"geometry": {"type": "LineString", "coordinates": road(500)}}]
            })),
        })
        .collect();
    FleetRoutes {
        origin,
        destination,
        routes,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let extractor = Extractor::default();
    let feature_collection = json!({
        "features": [{"geometry": {"type": "LineString", "coordinates": road(5_000)}}]
    });
    let encoded = format!("_p~iF~ps|U{}", "_ulLnnqC~tlLonqC".repeat(2_500));
    let fleet = fleet(20, 12);
    let renderer = RouteRenderer::new(Offline);

    let mut group = c.benchmark_group("Rendering");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Extract 5k point feature", |b| {
        b.iter(|| black_box(extractor.extract(&feature_collection)))
    });

    group.bench_function("Decode 5k point polyline", |b| {
        b.iter(|| black_box(polyline::decode(&encoded, polyline::DEFAULT_PRECISION)))
    });

    group.bench_function("Render 20 route fleet map", |b| {
        b.iter(|| {
            let mut notices = Vec::new();
            let report = renderer.render_routes(&fleet, &mut notices);
            black_box(report.to_html())
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
