#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use pokedex_pipeline::config::ResolvedConfig;
use pokedex_pipeline::error::FetchError;
use pokedex_pipeline::gateway::JsonTransport;

pub const BASE: &str = "http://pokeapi.test/api/v2";

pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        base_url: BASE.to_string(),
        ..ResolvedConfig::default()
    }
}

/// Canned upstream keyed by url. Unknown urls answer 404.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, FetchError>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: impl Into<String>, body: Value) {
        self.routes.lock().unwrap().insert(url.into(), body);
    }

    pub fn fail(&self, url: impl Into<String>, err: FetchError) {
        self.failures.lock().unwrap().insert(url.into(), err);
    }

    pub fn delay(&self, url: impl Into<String>, delay: Duration) {
        self.delays.lock().unwrap().insert(url.into(), delay);
    }

    /// Registers `/pokemon/{id}` and `/pokemon-species/{id}` for one entry.
    pub fn add_pokemon(&self, id: u32, name: &str) {
        self.route(pokemon_url(id), pokemon_json(id, name));
        self.route(species_url(id), species_json(id, name, None));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }
}

#[async_trait]
impl JsonTransport for MockTransport {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failures.lock().unwrap().get(url).cloned() {
            return Err(err);
        }
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

pub fn pokemon_url(key: impl std::fmt::Display) -> String {
    format!("{BASE}/pokemon/{key}")
}

pub fn species_url(key: impl std::fmt::Display) -> String {
    format!("{BASE}/pokemon-species/{key}")
}

pub fn chain_url(id: u32) -> String {
    format!("{BASE}/evolution-chain/{id}/")
}

pub fn species_ref(id: u32) -> String {
    format!("{BASE}/pokemon-species/{id}/")
}

pub fn pokemon_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": [{ "slot": 1, "type": { "name": "grass", "url": "" } }],
        "abilities": [],
        "stats": [],
        "sprites": {
            "front_default": format!("https://img.test/{id}.png"),
            "other": {
                "official-artwork": {
                    "front_default": format!("https://img.test/art/{id}.png")
                }
            }
        }
    })
}

pub fn species_json(id: u32, name: &str, chain: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "flavor_text_entries": [
            { "flavor_text": format!("{name}\nin english"), "language": { "name": "en", "url": "" } },
            { "flavor_text": format!("{name}\x0cauf deutsch"), "language": { "name": "de", "url": "" } }
        ],
        "evolution_chain": chain.map(|url| json!({ "url": url }))
    })
}

pub fn chain_node(id: u32, children: Vec<Value>) -> Value {
    json!({
        "species": { "name": format!("species-{id}"), "url": species_ref(id) },
        "evolves_to": children
    })
}
