#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use raindropio::{
    client::{Request, Response, Transport},
    policy::Pacer,
    Config, RaindropIo, Result,
};
use serde_json::{json, Value};

/// Replays canned responses in order and records every request.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<Response>>>,
    seen: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Response::new(status, body.to_string()));
        self
    }

    pub fn page(&self, ids: std::ops::Range<i64>) -> &Self {
        let items: Vec<Value> = ids.map(item).collect();
        self.reply(200, json!({ "result": true, "items": items }))
    }

    pub fn requests(&self) -> Vec<Request> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.seen.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| Response::new(500, "no scripted reply")))
    }
}

/// Records pauses instead of sleeping.
#[derive(Clone, Default)]
pub struct Pauses(Arc<Mutex<Vec<Duration>>>);

impl Pauses {
    pub fn taken(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for Pauses {
    async fn pause(&self, duration: Duration) {
        self.0.lock().unwrap().push(duration);
    }
}

pub fn item(id: i64) -> Value {
    json!({
        "_id": id,
        "link": format!("https://example{id}.com"),
        "title": format!("Example {id}"),
        "tags": ["test"],
        "collection": { "$id": 46274319 },
    })
}

pub fn repo(transport: &Scripted, pauses: &Pauses) -> RaindropIo {
    let config = Config::new("test-token").with_base_url("http://api.test/rest/v1");
    RaindropIo::with_transport(config, transport.clone()).with_pacer(pauses.clone())
}

pub fn query(request: &Request, key: &str) -> Option<String> {
    request
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}
