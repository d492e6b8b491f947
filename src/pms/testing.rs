use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::transport::{RequestMethod, Transport, TransportError};

/// Serves canned documents by path and records every request.
/// Unknown paths answer 404.
#[derive(Default)]
pub struct FakeTransport {
    documents: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
    methods: Mutex<Vec<RequestMethod>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.documents.insert(path.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<RequestMethod> {
        self.methods.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn request(&self, path: &str, method: RequestMethod) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(path.to_string());
        self.methods.lock().unwrap().push(method);
        self.documents
            .get(path)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| TransportError::Status(path.to_string(), 404))
    }
}
