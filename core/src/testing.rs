//! Scripted in-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptedError {
    #[error("network: {0}")]
    Network(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Replays queued outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<HttpResponse, ScriptedError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, error: ScriptedError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    type Error = ScriptedError;

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ScriptedError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted outcome left")
    }
}
