#![allow(dead_code)]

use fleetmap::routing::{
    Config,
    transport::{HttpResponse, Sleeper, Transport, TransportError},
};
use serde_json::{Value, json};
use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

type Reply = Result<HttpResponse, TransportError>;

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    queries: Vec<Vec<(String, String)>>,
}

/// Answers requests from a fixed list of replies, timing out once it runs dry.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        let transport = Self::default();
        transport.script.borrow_mut().replies = replies.into_iter().collect();
        transport
    }

    pub fn calls(&self) -> usize {
        self.script.borrow().queries.len()
    }

    pub fn query_value(&self, call: usize, name: &str) -> Option<String> {
        self.script
            .borrow()
            .queries
            .get(call)?
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, _url: &str, query: &[(&str, String)], _timeout: Duration) -> Reply {
        let mut script = self.script.borrow_mut();
        script.queries.push(
            query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        );
        script
            .replies
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))
    }
}

#[derive(Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

pub fn keyed_config() -> Config {
    Config::default().with_api_key("test-key")
}

pub fn ok(body: Value) -> Reply {
    Ok(HttpResponse {
        status: 200,
        body: body.to_string(),
    })
}

pub fn status(status: u16, body: &str) -> Reply {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

/// A routing response with one LineString feature through `(lat, lon)` points.
pub fn feature_collection(points: &[(f64, f64)], distance_m: f64, time_s: f64) -> Value {
    let coordinates: Vec<Value> = points.iter().map(|(lat, lon)| json!([lon, lat])).collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"distance": distance_m, "time": time_s},
            "geometry": {"type": "LineString", "coordinates": coordinates}
        }]
    })
}
