use serde::{Deserialize, Serialize};

use crate::shared::Coordinate;

/// A stop on a route, usually a passenger pickup.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub person_id: Option<String>,
}

impl Waypoint {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            ..Default::default()
        }
    }

    pub fn with_passenger(mut self, name: impl Into<String>, person_id: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.person_id = Some(person_id.into());
        self
    }
}

impl From<Coordinate> for Waypoint {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}
