use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiRequest, ApiResponse, HttpTransport};
use crate::error::ServiceError;

/// Scripted transport for tests: hands out canned outcomes in order and
/// records every request it sees, so "no network call" properties are
/// assertable via the call count.
pub struct MockTransport {
    responses: Mutex<Vec<Result<ApiResponse, ServiceError>>>,
    requests: Mutex<Vec<ApiRequest>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<ApiResponse, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(status: u16, data: Value) -> ApiResponse {
        ApiResponse {
            status,
            ok: (200..300).contains(&status),
            data,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, req: ApiRequest) -> Result<ApiResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(ServiceError::Network(
                "Request error: mock transport exhausted".into(),
            ))
        } else {
            responses.remove(0)
        }
    }
}
