use fleetmap::{
    geometry::{EncodedPolyline, Extractor, PathPoints},
    routing::{Error, RouteGeometry},
    shared::Coordinate,
};
use serde_json::json;

#[test]
fn feature_collection_test() {
    let payload = json!({
        "features": [
            {"geometry": {"type": "Point", "coordinates": [-46.6, -23.5]}},
            {"geometry": {"type": "LineString", "coordinates": [[-46.63, -23.55], [-46.64, -23.56]]}}
        ]
    });
    let points = Extractor::default().extract(&payload).unwrap();
    assert_eq!(
        points,
        vec![Coordinate::new(-23.55, -46.63), Coordinate::new(-23.56, -46.64)]
    );
}

#[test]
fn multi_line_string_test() {
    let payload = json!({
        "features": [{"geometry": {"type": "MultiLineString", "coordinates": [
            [[-46.63, -23.55], [-46.64, -23.56]],
            [[-46.64, -23.56], [-46.65, -23.57]]
        ]}}]
    });
    let points = Extractor::default().extract(&payload).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points[3], Coordinate::new(-23.57, -46.65));
}

#[test]
fn bare_geometry_test() {
    let wrapped = json!({"geometry": {"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}});
    let bare = json!({"type": "LineString", "coordinates": [[1.0, 2.0], [3.0, 4.0]]});
    let extractor = Extractor::default();
    assert_eq!(extractor.extract(&wrapped), extractor.extract(&bare));
    assert_eq!(extractor.extract(&bare).unwrap()[0], Coordinate::new(2.0, 1.0));
}

#[test]
fn path_points_test() {
    let payload = json!({"path": [{"lat": -23.55, "lon": -46.63}, {"lat": -23.56, "lon": -46.64}]});
    let points = Extractor::default().extract(&payload).unwrap();
    assert_eq!(points[0], Coordinate::new(-23.55, -46.63));
}

#[test]
fn encoded_polyline_test() {
    let payload = json!({"polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"});
    let points = Extractor::default().extract(&payload).unwrap();
    assert_eq!(points.len(), 3);
    assert!((points[0].latitude - 38.5).abs() < 1e-9);
    assert!((points[0].longitude + 120.2).abs() < 1e-9);
}

#[test]
fn unknown_shape_test() {
    let extractor = Extractor::default();
    assert_eq!(extractor.extract(&json!({"routes": []})), None);
    assert_eq!(extractor.extract(&json!({"path": []})), None);
    assert_eq!(
        RouteGeometry::from_payload(&json!({"something": 1}), &extractor),
        RouteGeometry::Unavailable(Error::ExtractionMismatch)
    );
}

#[test]
fn single_point_is_empty_geometry_test() {
    let payload = json!({"path": [{"lat": -23.55, "lon": -46.63}]});
    assert_eq!(
        RouteGeometry::from_payload(&payload, &Extractor::default()),
        RouteGeometry::Unavailable(Error::EmptyGeometry)
    );
}

#[test]
fn custom_matcher_order_test() {
    let payload = json!({
        "path": [{"lat": 1.0, "lon": 1.0}, {"lat": 2.0, "lon": 2.0}],
        "polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"
    });
    let polyline_first = Extractor::new()
        .with_matcher(EncodedPolyline::default())
        .with_matcher(PathPoints);
    assert_eq!(polyline_first.extract(&payload).unwrap().len(), 3);
    assert_eq!(Extractor::default().extract(&payload).unwrap().len(), 2);
    assert_eq!(Extractor::new().extract(&payload), None);
}

#[test]
fn metrics_travel_with_geometry_test() {
    let payload = json!({
        "total_distance_km": 12.5,
        "total_duration_minutes": 30,
        "path": [{"lat": 1.0, "lon": 1.0}, {"lat": 2.0, "lon": 2.0}]
    });
    match RouteGeometry::from_payload(&payload, &Extractor::default()) {
        RouteGeometry::Available(path) => {
            assert_eq!(path.metrics.distance_km(), Some(12.5));
            assert_eq!(path.metrics.duration_minutes(), Some(30.0));
        }
        other => panic!("expected geometry, got {other:?}"),
    }
}

#[test]
fn overflowing_polyline_is_declined_test() {
    let encoded = format!("}}{}B?", "~".repeat(11)).repeat(5);
    let payload = json!({ "polyline": encoded });
    assert_eq!(Extractor::default().extract(&payload), None);
    assert_eq!(
        RouteGeometry::from_payload(&payload, &Extractor::default()),
        RouteGeometry::Unavailable(Error::ExtractionMismatch)
    );
}

#[test]
fn malformed_polyline_is_declined_test() {
    let extractor = Extractor::default();
    assert_eq!(extractor.extract(&json!({"polyline": "_p~iF"})), None);
    assert_eq!(extractor.extract(&json!({"polyline": "_p~iF ps|U"})), None);
}
