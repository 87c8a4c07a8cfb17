//! Scripted transport double for in-crate tests.
//!
//! The `Transport` trait is sealed, so test doubles live inside the crate.
//! `MockTransport` replays a queue of scripted responses and captures every
//! request it receives for later assertions.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use crate::{
    error::{GatewayError, Result},
    request::OutboundRequest,
    transport::{Transport, TransportResponse, sealed},
};

/// Transport that replays scripted responses in FIFO order.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON response.
    pub(crate) fn push_json(&self, status: u16, json: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse { status, body: json.as_bytes().to_vec() }));
    }

    /// Queues a failure.
    pub(crate) fn push_error(&self, error: GatewayError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Returns a copy of every request received so far.
    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose URL ends with the given suffix.
    pub(crate) fn count_requests_to(&self, path_suffix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.url.ends_with(path_suffix))
            .count()
    }
}

impl sealed::private::Sealed for MockTransport {}

impl Transport for MockTransport {
    async fn post<'a>(&'a self, request: &'a OutboundRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted response".to_owned())))
    }

    fn protocol_name(&self) -> &'static str {
        "mock"
    }
}
