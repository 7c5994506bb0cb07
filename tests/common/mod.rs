#![allow(dead_code)]
use abc_radio_plays::{AbcRadioClientImpl, ClientConfig};
use async_trait::async_trait;
use http_client::HttpClient;
use http_types::{Error, Request, Response, StatusCode};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const TEST_BASE_URL: &str = "http://radio.test/api/v1/plays/search.json";

/// A scripted reply of the fake transport
#[derive(Debug, Clone)]
pub enum CannedReply {
    Response { status: u16, body: String },
    Failure(String),
}

/// HTTP client that answers from a queue of canned replies and records every
/// requested URL. Clones share the queue and the record.
#[derive(Debug, Clone, Default)]
pub struct FakeHttpClient {
    replies: Arc<Mutex<VecDeque<CannedReply>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, body: impl Into<String>) -> &Self {
        self.push_response(200, body)
    }

    pub fn push_response(&self, status: u16, body: impl Into<String>) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Response {
                status,
                body: body.into(),
            });
        self
    }

    pub fn push_failure(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Failure(message.to_string()));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        self.requests.lock().unwrap().push(req.url().to_string());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(CannedReply::Response { status, body }) => {
                let status = StatusCode::try_from(status).expect("valid status code");
                let mut response = Response::new(status);
                response.insert_header("Content-Type", "application/json");
                response.set_body(body);
                Ok(response)
            }
            Some(CannedReply::Failure(message)) => {
                Err(Error::from_str(StatusCode::InternalServerError, message))
            }
            None => Err(Error::from_str(
                StatusCode::InternalServerError,
                "no canned reply left",
            )),
        }
    }
}

/// Client pointed at the fake endpoint, plus a handle on its transport
pub fn create_test_client() -> (AbcRadioClientImpl, FakeHttpClient) {
    let http_client = FakeHttpClient::new();
    let client = AbcRadioClientImpl::with_config(
        Box::new(http_client.clone()),
        ClientConfig::new().with_base_url(TEST_BASE_URL),
    );
    (client, http_client)
}

pub fn load_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

/// A minimal play as the API returns it, `index` minutes after midnight UTC
pub fn play_json(index: u32) -> Value {
    json!({
        "entity": "Play",
        "arid": format!("play-{index}"),
        "played_time": format!("2024-01-01T{:02}:{:02}:00+00:00", index / 60, index % 60),
        "service_id": "triplej",
        "recording": {
            "title": format!("Song {index}"),
            "duration": 180,
            "links": [],
            "releases": []
        },
        "release": null
    })
}

/// One page of a result set of `total` plays
pub fn page_json(total: u32, offset: u32, limit: u32) -> String {
    let end = total.min(offset + limit);
    json!({
        "total": total,
        "offset": offset,
        "limit": limit,
        "items": (offset..end).map(play_json).collect::<Vec<_>>()
    })
    .to_string()
}
