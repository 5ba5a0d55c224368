use fleetmap::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateDto {
    Real,
    Fallback,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteDto {
    pub index: usize,
    pub vehicle: Vehicle,
    pub passengers: usize,
    pub color: String,
    pub style: LineStyle,
    pub state: StateDto,
    /// Why road geometry was not used, if it wasn't.
    pub reason: Option<String>,
    pub distance_km: Option<f64>,
    pub duration_minutes: Option<f64>,
    pub points: Vec<Coordinate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDto {
    pub routes: Vec<RouteDto>,
    pub notices: Vec<Notice>,
    pub html: String,
}

impl RouteDto {
    pub fn from(entry: &RouteDisplayEntry) -> Self {
        let state = match entry.state {
            RouteState::RealGeometryRendered => StateDto::Real,
            RouteState::FallbackStraightLineRendered => StateDto::Fallback,
            RouteState::RenderFailed(_) => StateDto::Failed,
        };
        let (metrics, points) = match &entry.geometry {
            RouteGeometry::Available(path) => (path.metrics, path.points.clone()),
            RouteGeometry::Unavailable(_) => (RouteMetrics::default(), Vec::new()),
        };
        Self {
            index: entry.index,
            vehicle: entry.vehicle.clone(),
            passengers: entry.passengers,
            color: entry.color.clone(),
            style: entry.style,
            state,
            reason: entry.degradation_reason(),
            distance_km: metrics.distance_km(),
            duration_minutes: metrics.duration_minutes(),
            points,
        }
    }
}

impl ReportDto {
    pub fn from(report: &RenderReport, notices: Vec<Notice>) -> Self {
        Self {
            routes: report.routes.iter().map(RouteDto::from).collect(),
            notices,
            html: report.to_html(),
        }
    }
}
