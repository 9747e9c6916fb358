//! Scripted transport for tests.

use crate::{FetchError, Request, Response, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Replays queued responses in order and records every request it sees.
///
/// When the queue runs dry every further request gets an empty `200`.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Response, FetchError>>>,
    requests: Mutex<Vec<Request>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply.
    pub fn push_json(&self, status: u16, value: serde_json::Value) -> &Self {
        self.push(Ok(Response::json_value(status, &value)))
    }

    /// Queue a reply with a raw body.
    pub fn push_body(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        self.push(Ok(Response::new(status, Default::default(), body.into())))
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: FetchError) -> &Self {
        self.push(Err(error))
    }

    pub fn push(&self, reply: Result<Response, FetchError>) -> &Self {
        lock(&self.replies).push_back(reply);
        self
    }

    /// Requests sent so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        lock(&self.requests).last().cloned()
    }

    /// Replies not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.replies).len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        lock(&self.requests).push(request);
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(200, Default::default(), Vec::new())))
    }
}
