mod palette;

pub use palette::*;

use serde::Serialize;

/// Stroke settings for a route polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: Option<&'static str>,
}

impl LineStyle {
    pub const fn solid(weight: f64, opacity: f64) -> Self {
        Self {
            weight,
            opacity,
            dash_array: None,
        }
    }

    pub const fn dashed(weight: f64, opacity: f64, dash_array: &'static str) -> Self {
        Self {
            weight,
            opacity,
            dash_array: Some(dash_array),
        }
    }

    pub const fn is_dashed(&self) -> bool {
        self.dash_array.is_some()
    }
}

pub const LINE_STYLES: [LineStyle; 4] = [
    LineStyle::solid(4.0, 0.8),
    LineStyle::dashed(4.0, 0.8, "10, 10"),
    LineStyle::dashed(4.0, 0.8, "1, 10"),
    LineStyle::dashed(4.0, 0.8, "15, 10, 1, 10"),
];

/// Road geometry on a single-route map.
pub const REAL_ROUTE_STYLE: LineStyle = LineStyle::solid(5.0, 0.8);

/// Straight-line approximation, faded and dashed so it never reads as a road.
pub const FALLBACK_STYLE: LineStyle = LineStyle::dashed(3.0, 0.5, "5, 5");

pub fn style_for(index: usize) -> LineStyle {
    LINE_STYLES[index % LINE_STYLES.len()]
}
