mod html;
mod legend;
mod notice;
mod render;
mod surface;

pub use legend::{Legend, LegendEntry};
pub use notice::*;
pub use render::*;
pub use surface::*;

use thiserror::Error;

use crate::shared::Coordinate;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Coordinate {0:?} cannot be placed on the map")]
    InvalidCoordinate(Coordinate),
    #[error("A line needs at least two points")]
    EmptyPolyline,
}

impl MapSurface {
    /// The surface as a standalone HTML page.
    pub fn to_html(&self) -> String {
        html::render(self)
    }
}
