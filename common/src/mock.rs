//! In-memory [`Transport`] for tests.
//!
//! Responses are queued per `METHOD path` and handed out in order. Requests
//! without a queued response fail with a transport error, which is also how
//! an unreachable server looks to the client.
//!
//! ```rust
//! use common::mock::MockTransport;
//! use common::ApiClient;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mock = Arc::new(MockTransport::new());
//! mock.respond("GET /searchByTitle/matrix", 200, json!({ "film": [{ "film_id": 7, "title": "The Matrix" }] }));
//!
//! let client = ApiClient::new(mock.clone());
//! let films = client.search_by_title("matrix").await.unwrap();
//! assert_eq!(films[0].film_id, 7);
//! assert_eq!(mock.requests().len(), 1);
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::client::{ApiRequest, ApiResponse, Transport};
use crate::error::ApiError;

#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<ApiResponse, ApiError>>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for `route`, written as `"METHOD /path"`
    pub fn respond(&self, route: &str, status: u16, body: Value) {
        self.push(route, Ok(ApiResponse { status, body }));
    }

    pub fn fail(&self, route: &str, error: ApiError) {
        self.push(route, Err(error));
    }

    fn push(&self, route: &str, outcome: Result<ApiResponse, ApiError>) {
        let mut responses = self.responses.lock().unwrap();
        responses
            .entry(route.to_string())
            .or_default()
            .push_back(outcome);
    }

    /// Every request seen so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let route = request.endpoint.to_string();
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&route).and_then(|queue| queue.pop_front()) {
            Some(outcome) => outcome,
            None => Err(ApiError::Transport(format!("no response queued for {route}"))),
        }
    }
}
