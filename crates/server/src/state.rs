use fleetmap::routing::Config;

pub struct AppState {
    pub routing: Config,
}

impl AppState {
    pub fn new(routing: Config) -> Self {
        Self { routing }
    }
}
