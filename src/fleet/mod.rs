mod vehicle;
mod waypoint;

pub use vehicle::*;
pub use waypoint::*;
