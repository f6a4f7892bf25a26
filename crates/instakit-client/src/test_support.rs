//! In-memory transport for unit tests

use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use instakit_core::{
    domain::ConsumerCredentials,
    ports::{HttpTransport, OutgoingRequest, RawResponse, TransportError},
};

/// Replays queued responses and records every request it receives
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<OutgoingRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.respond_with(RawResponse::new(status, body))
    }

    pub(crate) fn respond_with(self, response: RawResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub(crate) fn fail(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> OutgoingRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no response queued".into())))
    }
}

pub(crate) fn consumer() -> ConsumerCredentials {
    ConsumerCredentials::new(Some("ckey".into()), Some("csecret".into())).unwrap()
}

/// Returns the form value of `name`, if sent
pub(crate) fn form_value<'a>(request: &'a OutgoingRequest, name: &str) -> Option<&'a str> {
    request
        .form
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}
