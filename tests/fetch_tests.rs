mod support;

use fleetmap::{
    fleet::VehicleType,
    routing::{
        Error, RouteGeometryFetcher, RouteRequest, RouteResponse,
        transport::TransportError,
    },
    shared::Coordinate,
};
use serde_json::json;
use std::time::Duration;
use support::*;

fn request() -> RouteRequest {
    RouteRequest::new(Coordinate::new(-23.55, -46.63), Coordinate::new(-23.60, -46.70))
}

fn fetcher(
    transport: &ScriptedTransport,
    sleeper: &RecordingSleeper,
) -> RouteGeometryFetcher<ScriptedTransport, RecordingSleeper> {
    RouteGeometryFetcher::with_transport(keyed_config(), transport.clone(), sleeper.clone())
}

#[test]
fn success_test() {
    let body = feature_collection(&[(-23.55, -46.63), (-23.60, -46.70)], 9_000.0, 900.0);
    let transport = ScriptedTransport::new([ok(body.clone())]);
    let sleeper = RecordingSleeper::default();

    let response = fetcher(&transport, &sleeper).fetch(&request()).unwrap();
    assert_eq!(response.into_value(), body);
    assert_eq!(transport.calls(), 1);
    assert!(sleeper.sleeps().is_empty());
}

#[test]
fn query_test() {
    let transport = ScriptedTransport::new([status(500, "")]);
    let sleeper = RecordingSleeper::default();
    let request = request()
        .with_waypoints([
            Coordinate::new(-23.57, -46.65),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-23.58, -46.66),
        ])
        .with_vehicle(VehicleType::Truck);
    let _ = fetcher(&transport, &sleeper).fetch(&request);

    assert_eq!(
        transport.query_value(0, "waypoints").as_deref(),
        Some("-23.55,-46.63|-23.57,-46.65|-23.58,-46.66|-23.6,-46.7")
    );
    assert_eq!(transport.query_value(0, "mode").as_deref(), Some("truck"));
    assert_eq!(transport.query_value(0, "apiKey").as_deref(), Some("test-key"));
    assert_eq!(
        transport.query_value(0, "details").as_deref(),
        Some("instruction_details,route_details")
    );
}

#[test]
fn retries_timeouts_with_backoff_test() {
    let transport = ScriptedTransport::new([
        Err(TransportError::Timeout),
        Err(TransportError::Timeout),
        Err(TransportError::Timeout),
    ]);
    let sleeper = RecordingSleeper::default();

    let result = fetcher(&transport, &sleeper).fetch(&request());
    assert_eq!(result, Err(Error::Timeout { attempts: 3 }));
    assert_eq!(transport.calls(), 3);
    assert_eq!(
        sleeper.sleeps(),
        vec![Duration::from_secs(2), Duration::from_secs(4)]
    );
}

#[test]
fn recovers_after_timeout_test() {
    let body = feature_collection(&[(-23.55, -46.63), (-23.60, -46.70)], 9_000.0, 900.0);
    let transport = ScriptedTransport::new([Err(TransportError::Timeout), ok(body)]);
    let sleeper = RecordingSleeper::default();

    assert!(fetcher(&transport, &sleeper).fetch(&request()).is_ok());
    assert_eq!(transport.calls(), 2);
    assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(2)]);
}

#[test]
fn http_errors_are_not_retried_test() {
    for code in [400, 401, 500, 503] {
        let transport = ScriptedTransport::new([status(code, "{\"message\":\"nope\"}")]);
        let sleeper = RecordingSleeper::default();

        let result = fetcher(&transport, &sleeper).fetch(&request());
        assert_eq!(
            result,
            Err(Error::Http {
                status: code,
                body: "{\"message\":\"nope\"}".into()
            })
        );
        assert_eq!(transport.calls(), 1);
        assert!(sleeper.sleeps().is_empty());
    }
}

#[test]
fn transport_errors_are_not_retried_test() {
    let transport =
        ScriptedTransport::new([Err(TransportError::Other("connection refused".into()))]);
    let sleeper = RecordingSleeper::default();

    let result = fetcher(&transport, &sleeper).fetch(&request());
    assert_eq!(result, Err(Error::Transport("connection refused".into())));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn missing_key_makes_no_call_test() {
    let transport = ScriptedTransport::default();
    let sleeper = RecordingSleeper::default();
    let config = keyed_config().without_api_key();
    let fetcher = RouteGeometryFetcher::with_transport(config, transport.clone(), sleeper);

    assert!(matches!(
        fetcher.fetch(&request()),
        Err(Error::ConfigurationMissing(_))
    ));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn blank_key_makes_no_call_test() {
    let transport = ScriptedTransport::default();
    let config = keyed_config().with_api_key("   ");
    let fetcher =
        RouteGeometryFetcher::with_transport(config, transport.clone(), RecordingSleeper::default());

    assert!(matches!(
        fetcher.fetch(&request()),
        Err(Error::ConfigurationMissing(_))
    ));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn invalid_endpoint_test() {
    let transport = ScriptedTransport::default();
    let sleeper = RecordingSleeper::default();
    let request = RouteRequest::new(
        Coordinate::new(f64::NAN, -46.63),
        Coordinate::new(-23.60, -46.70),
    );

    assert!(matches!(
        fetcher(&transport, &sleeper).fetch(&request),
        Err(Error::InvalidEndpoint(_))
    ));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn malformed_response_test() {
    let bodies = [
        status(200, "not json"),
        ok(json!({"message": "quota exceeded"})),
        ok(json!({"features": []})),
        ok(json!({"features": [{"properties": {}}]})),
    ];
    for body in bodies {
        let transport = ScriptedTransport::new([body]);
        let sleeper = RecordingSleeper::default();
        assert!(matches!(
            fetcher(&transport, &sleeper).fetch(&request()),
            Err(Error::MalformedResponse(_))
        ));
        assert_eq!(transport.calls(), 1);
    }
}

#[test]
fn response_shape_test() {
    assert!(RouteResponse::from_value(json!({"features": [{"geometry": {}}]})).is_ok());
    assert!(RouteResponse::from_value(json!({"features": [{"geometry": null}]})).is_err());
}
