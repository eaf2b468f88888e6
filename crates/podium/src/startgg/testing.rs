//! In-memory transport for exercising the collectors without a network

use std::sync::Mutex;
use std::time::Duration;

use podium_core::graphql::Operation;
use serde_json::{json, Value};
use tokio::time::Instant;

use super::transport::Transport;
use crate::prelude::*;

type Handler = Box<dyn FnMut(&Operation) -> Result<Value, Error> + Send>;

/// Answers each operation with a caller-supplied closure and records the calls
pub struct ScriptedTransport {
    handler: Mutex<Handler>,
    calls: Mutex<Vec<(Instant, Operation)>>,
}

impl ScriptedTransport {
    pub fn new(handler: impl FnMut(&Operation) -> Result<Value, Error> + Send + 'static) -> Self {
        Self {
            handler: Mutex::new(Box::new(handler)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, op)| op.clone())
            .collect()
    }

    pub fn calls_named(&self, name: &str) -> Vec<Operation> {
        self.calls()
            .into_iter()
            .filter(|op| op.name == name)
            .collect()
    }

    /// Time between consecutive calls
    pub fn call_gaps(&self) -> Vec<Duration> {
        let calls = self.calls.lock().unwrap();
        calls
            .windows(2)
            .map(|pair| pair[1].0 - pair[0].0)
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, operation: &Operation) -> Result<Value, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), operation.clone()));
        let mut handler = self.handler.lock().unwrap();
        (*handler)(operation)
    }
}

/// Integer variable of an operation
pub fn var(operation: &Operation, name: &str) -> u64 {
    operation.variables[name].as_u64().unwrap()
}

/// A standings node as the service returns it
pub fn standing_node(rank: u32, entrant: u64, tag: &str) -> Value {
    json!({
        "placement": rank,
        "entrant": {
            "id": entrant,
            "participants": [{"gamerTag": tag, "prefix": null, "user": null}]
        }
    })
}

/// Serve `nodes` as a paginated standings connection reporting `total`
pub fn standings_response(operation: &Operation, nodes: &[Value], total: u64) -> Value {
    let per_page = var(operation, "perPage") as usize;
    match operation.name {
        "EventStandingsInfo" => {
            let total_pages = (total as usize).div_ceil(per_page);
            json!({"event": {"standings": {"pageInfo": {"total": total, "totalPages": total_pages}}}})
        }
        "EventStandings" => {
            let page = var(operation, "page") as usize;
            let start = ((page - 1) * per_page).min(nodes.len());
            let end = (start + per_page).min(nodes.len());
            json!({"event": {"standings": {"nodes": nodes[start..end].to_vec()}}})
        }
        other => panic!("unexpected operation {other}"),
    }
}

/// A character lookup response
pub fn characters_response(characters: &[(u64, &str)]) -> Value {
    let nodes: Vec<Value> = characters
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    json!({"event": {"videogame": {"characters": nodes}}})
}

/// One page of sets, each holding the given games
pub fn sets_response(total_pages: u32, sets: Value) -> Value {
    json!({"event": {"sets": {"pageInfo": {"totalPages": total_pages}, "nodes": sets}}})
}
