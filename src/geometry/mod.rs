mod extract;
pub mod polyline;

pub use extract::*;

use serde_json::Value;
use std::time::Duration;

use crate::shared::{Coordinate, Distance};

/// Distance and travel time reported alongside a route geometry.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    pub distance: Option<Distance>,
    pub duration: Option<Duration>,
}

impl RouteMetrics {
    /// Reads metrics from a route payload.
    ///
    /// Precomputed totals (`total_distance_km`, `total_duration_minutes`)
    /// win over the routing service's per-feature `distance` (metres) and
    /// `time` (seconds). Zero is treated as unknown.
    pub fn from_payload(payload: &Value) -> Self {
        let properties = payload
            .get("features")
            .and_then(Value::as_array)
            .and_then(|features| features.first())
            .and_then(|feature| feature.get("properties"));

        let distance = positive(payload.get("total_distance_km"))
            .map(Distance::from_kilometers)
            .or_else(|| {
                positive(properties.and_then(|p| p.get("distance"))).map(Distance::from_meters)
            });

        let duration = positive(payload.get("total_duration_minutes"))
            .map(|minutes| Duration::from_secs_f64(minutes * 60.0))
            .or_else(|| positive(properties.and_then(|p| p.get("time"))).map(Duration::from_secs_f64));

        Self { distance, duration }
    }

    /// Fills values missing here from `other`.
    pub fn or(self, other: RouteMetrics) -> Self {
        Self {
            distance: self.distance.or(other.distance),
            duration: self.duration.or(other.duration),
        }
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance.map(|distance| distance.as_kilometers())
    }

    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration.map(|duration| duration.as_secs_f64() / 60.0)
    }

    /// Short summary like `12.3 km | 25 min`. Unknown values show as `N/A`.
    pub fn summary(&self) -> String {
        let distance = self
            .distance_km()
            .map(|km| format!("{km:.1} km"))
            .unwrap_or_else(|| "N/A".into());
        let duration = self
            .duration_minutes()
            .map(|minutes| format!("{minutes:.0} min"))
            .unwrap_or_else(|| "N/A".into());
        format!("{distance} | {duration}")
    }
}

fn positive(value: Option<&Value>) -> Option<f64> {
    value
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Road-following geometry ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    pub points: Vec<Coordinate>,
    pub metrics: RouteMetrics,
}

impl RoutePath {
    pub fn new(points: Vec<Coordinate>, metrics: RouteMetrics) -> Self {
        Self { points, metrics }
    }
}

#[test]
fn metrics_from_feature_properties() {
    let payload = serde_json::json!({
        "features": [{"properties": {"distance": 12_300.0, "time": 1_500.0}, "geometry": {}}]
    });
    let metrics = RouteMetrics::from_payload(&payload);
    assert_eq!(metrics.distance_km(), Some(12.3));
    assert_eq!(metrics.duration_minutes(), Some(25.0));
    assert_eq!(metrics.summary(), "12.3 km | 25 min");
}

#[test]
fn metrics_prefer_totals() {
    let payload = serde_json::json!({
        "total_distance_km": 8.0,
        "total_duration_minutes": 0,
        "features": [{"properties": {"distance": 12_300.0, "time": 600.0}}]
    });
    let metrics = RouteMetrics::from_payload(&payload);
    assert_eq!(metrics.distance_km(), Some(8.0));
    assert_eq!(metrics.duration_minutes(), Some(10.0));
}

#[test]
fn metrics_fill_gaps() {
    let live = RouteMetrics {
        distance: Some(Distance::from_kilometers(4.0)),
        duration: None,
    };
    let embedded = RouteMetrics {
        distance: Some(Distance::from_kilometers(9.0)),
        duration: Some(Duration::from_secs(600)),
    };
    let merged = live.or(embedded);
    assert_eq!(merged.distance_km(), Some(4.0));
    assert_eq!(merged.duration_minutes(), Some(10.0));
}

#[test]
fn metrics_missing() {
    let metrics = RouteMetrics::from_payload(&serde_json::json!({}));
    assert_eq!(metrics, RouteMetrics::default());
    assert_eq!(metrics.summary(), "N/A | N/A");
}
