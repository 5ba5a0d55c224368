use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::routing::{
    Config, GeometrySource, RouteRequest,
    transport::{HttpResponse, ReqwestTransport, Sleeper, ThreadSleeper, Transport, TransportError},
};

/// Decoded body of a successful routing call.
///
/// Guaranteed to hold a non-empty `features` array whose first feature has
/// a `geometry` object.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse(Value);

impl RouteResponse {
    /// Checks the shape of a decoded routing payload.
    pub fn from_value(data: Value) -> Result<Self, super::Error> {
        let Some(feature) = data
            .get("features")
            .and_then(Value::as_array)
            .and_then(|features| features.first())
        else {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            error!("Routing response has no features: {message}");
            return Err(super::Error::MalformedResponse(format!(
                "no features ({message})"
            )));
        };

        let Some(geometry) = feature.get("geometry").filter(|g| g.is_object()) else {
            error!("Routing response feature has no geometry");
            return Err(super::Error::MalformedResponse(
                "feature has no geometry".into(),
            ));
        };

        let kind = geometry
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let parts = geometry
            .get("coordinates")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        debug!("Received {kind} geometry with {parts} parts");
        Ok(RouteResponse(data))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Client for the routing API's road-following geometry.
pub struct RouteGeometryFetcher<T = ReqwestTransport, S = ThreadSleeper> {
    config: Config,
    transport: T,
    sleeper: S,
}

impl RouteGeometryFetcher {
    pub fn new(config: Config) -> Result<Self, super::Error> {
        let transport = ReqwestTransport::new()
            .map_err(|err| super::Error::Transport(err.without_url().to_string()))?;
        Ok(Self::with_transport(config, transport, ThreadSleeper))
    }
}

impl<T: Transport, S: Sleeper> RouteGeometryFetcher<T, S> {
    pub fn with_transport(config: Config, transport: T, sleeper: S) -> Self {
        Self {
            config,
            transport,
            sleeper,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Requests geometry for the route.
    ///
    /// Only timeouts are retried. HTTP errors and other transport failures
    /// end the call on the first attempt. Without a credential no request
    /// is made.
    pub fn fetch(&self, request: &RouteRequest) -> Result<RouteResponse, super::Error> {
        let Some(api_key) = self.config.api_key() else {
            warn!(
                "No routing API key in {}, routes will be drawn as straight lines",
                self.config.key_source.describe()
            );
            return Err(super::Error::ConfigurationMissing(
                self.config.key_source.describe(),
            ));
        };

        for endpoint in [request.origin, request.destination] {
            if !endpoint.is_finite() {
                error!("Route endpoint {endpoint} is not a valid coordinate");
                return Err(super::Error::InvalidEndpoint(endpoint));
            }
        }

        let stops = request.routable_waypoints().count();
        let mode = request.travel_mode();
        let query = [
            ("waypoints", request.waypoints_param()),
            ("mode", mode.as_str().to_string()),
            ("details", self.config.details.clone()),
            ("apiKey", api_key),
        ];
        info!("Requesting {mode} route geometry with {stops} intermediate stops");

        let max_attempts = self.config.max_attempts.max(1);
        let mut backoff = self.config.initial_backoff;
        for attempt in 1..=max_attempts {
            match self
                .transport
                .get(&self.config.base_url, &query, self.config.timeout)
            {
                Ok(response) => return validate(response),
                Err(TransportError::Timeout) => {
                    warn!("Routing request timed out (attempt {attempt}/{max_attempts})");
                    if attempt < max_attempts {
                        self.sleeper.sleep(backoff);
                        backoff *= 2;
                    }
                }
                Err(TransportError::Other(message)) => {
                    error!("Routing request failed: {message}");
                    return Err(super::Error::Transport(message));
                }
            }
        }
        Err(super::Error::Timeout {
            attempts: max_attempts,
        })
    }
}

impl<T: Transport, S: Sleeper> GeometrySource for RouteGeometryFetcher<T, S> {
    fn fetch(&self, request: &RouteRequest) -> Result<RouteResponse, super::Error> {
        RouteGeometryFetcher::fetch(self, request)
    }
}

fn validate(response: HttpResponse) -> Result<RouteResponse, super::Error> {
    if !response.is_success() {
        error!(
            "Routing API returned HTTP {}: {}",
            response.status, response.body
        );
        return Err(super::Error::Http {
            status: response.status,
            body: response.body,
        });
    }

    let data: Value = serde_json::from_str(&response.body).map_err(|err| {
        error!("Failed to parse routing response: {err}");
        super::Error::MalformedResponse(format!("body is not JSON: {err}"))
    })?;

    RouteResponse::from_value(data)
}
