use serde_json::Value;
use tracing::debug;

use crate::{
    geometry::polyline::{self, DEFAULT_PRECISION},
    shared::Coordinate,
};

/// One recognizable shape of route geometry.
///
/// `extract` returns `None` when the payload is not in this shape (or is in
/// it but malformed), letting the next matcher try.
pub trait ShapeMatcher: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>>;
}

/// GeoJSON `FeatureCollection`: the first feature with line geometry wins.
pub struct FeatureGeometry;

/// A `geometry` member at the top level, or a payload that is a geometry.
pub struct BareGeometry;

/// A `path` array of `{lat, lon}` objects, already in display order.
pub struct PathPoints;

/// A `polyline` string in the encoded polyline format.
pub struct EncodedPolyline {
    pub precision: u32,
}

impl Default for EncodedPolyline {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl ShapeMatcher for FeatureGeometry {
    fn name(&self) -> &'static str {
        "feature-geometry"
    }

    fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>> {
        payload
            .get("features")?
            .as_array()?
            .iter()
            .filter_map(|feature| feature.get("geometry"))
            .find_map(line_geometry)
    }
}

impl ShapeMatcher for BareGeometry {
    fn name(&self) -> &'static str {
        "bare-geometry"
    }

    fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>> {
        match payload.get("geometry") {
            Some(geometry) => line_geometry(geometry),
            None => line_geometry(payload),
        }
    }
}

impl ShapeMatcher for PathPoints {
    fn name(&self) -> &'static str {
        "path-points"
    }

    fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>> {
        let path = payload.get("path")?.as_array()?;
        if path.is_empty() {
            return None;
        }
        path.iter()
            .map(|point| {
                let latitude = point.get("lat")?.as_f64()?;
                let longitude = point.get("lon")?.as_f64()?;
                Some(Coordinate::new(latitude, longitude))
            })
            .collect()
    }
}

impl ShapeMatcher for EncodedPolyline {
    fn name(&self) -> &'static str {
        "encoded-polyline"
    }

    fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>> {
        let encoded = payload.get("polyline")?.as_str()?;
        if encoded.is_empty() {
            return None;
        }
        polyline::decode(encoded, self.precision)
            .map_err(|err| debug!("Ignoring undecodable polyline: {err}"))
            .ok()
    }
}

/// Normalizes route geometry from any of the known response shapes into
/// `(lat, lon)` order.
pub struct Extractor {
    matchers: Vec<Box<dyn ShapeMatcher>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
            .with_matcher(FeatureGeometry)
            .with_matcher(BareGeometry)
            .with_matcher(PathPoints)
            .with_matcher(EncodedPolyline::default())
    }
}

impl Extractor {
    /// An extractor with no matchers. It recognizes nothing until some are added.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    pub fn with_matcher<M: ShapeMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    /// Returns the coordinates from the first matching shape.
    ///
    /// `None` means no shape matched; `Some(vec![])` is a recognized but
    /// empty path.
    pub fn extract(&self, payload: &Value) -> Option<Vec<Coordinate>> {
        self.matchers.iter().find_map(|matcher| {
            let points = matcher.extract(payload)?;
            debug!(
                "Extracted {} points using {}",
                points.len(),
                matcher.name()
            );
            Some(points)
        })
    }
}

fn line_geometry(geometry: &Value) -> Option<Vec<Coordinate>> {
    let coordinates = geometry.get("coordinates")?.as_array()?;
    match geometry.get("type")?.as_str()? {
        "LineString" => positions(coordinates),
        "MultiLineString" => {
            let mut points = Vec::new();
            for segment in coordinates {
                points.extend(positions(segment.as_array()?)?);
            }
            Some(points)
        }
        _ => None,
    }
}

/// GeoJSON positions are `[lon, lat, ...]`.
fn positions(values: &[Value]) -> Option<Vec<Coordinate>> {
    values
        .iter()
        .map(|position| {
            let position = position.as_array()?;
            let longitude = position.first()?.as_f64()?;
            let latitude = position.get(1)?.as_f64()?;
            Some(Coordinate::from_lon_lat(longitude, latitude))
        })
        .collect()
}
