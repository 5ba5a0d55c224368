mod health;
mod map;

pub use health::*;
pub use map::*;
