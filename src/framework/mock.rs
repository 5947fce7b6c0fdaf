//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! [`MockTransport`] stands in for the HTTP capability. Queue the requests you
//! expect with helpers like [`MockTransport::expect_get`], hand
//! [`MockTransport::transport`] to the client under test, then inspect
//! [`MockTransport::requests`] and call [`MockTransport::verify`].

use crate::framework::{FrameworkError, HttpMethod, HttpRequest, HttpTransport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned response to return for it.
struct Expectation {
    method: HttpMethod,
    url: String,
    response: Result<Value, FrameworkError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<HttpRequest>,
}

/// A mock transport with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (or arrives when none is queued) panics the calling task.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.expect_get("api/heroes").return_ok(json!([]));
///
/// let service = HeroService::new(mock.transport(), messages);
/// // Use service in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transport for use in tests.
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::new(self.clone())
    }

    pub fn expect_get(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Get, url)
    }

    pub fn expect_post(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Post, url)
    }

    pub fn expect_put(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Put, url)
    }

    pub fn expect_delete(&self, url: impl Into<String>) -> ExpectationBuilder {
        self.expect(HttpMethod::Delete, url)
    }

    fn expect(&self, method: HttpMethod, url: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            url: url.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, FrameworkError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        let expectation = state.expectations.pop_front();
        drop(state);

        match expectation {
            Some(exp) if exp.method == request.method && exp.url == request.url => exp.response,
            Some(exp) => panic!(
                "Expectation mismatch: expected {} {}, got {} {}",
                exp.method, exp.url, request.method, request.url
            ),
            None => panic!("Unexpected request: {} {}", request.method, request.url),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: HttpMethod,
    url: String,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, FrameworkError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            method: self.method,
            url: self.url,
            response,
        });
    }
}
