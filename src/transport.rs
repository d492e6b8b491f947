use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::config::PmsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("unsupported request method {0}")]
pub struct UnknownMethod(String);

impl FromStr for RequestMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            "PUT" => Ok(RequestMethod::Put),
            "DELETE" => Ok(RequestMethod::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no media server host configured")]
    NotConfigured,
    #[error("request made without an endpoint")]
    NoEndpoint,
    #[error("failed to access uri endpoint {0}: {1}")]
    Connect(String, String),
    #[error("failed to access uri endpoint {0}: status code {1}")]
    Status(String, u16),
}

/// Fetches raw response bodies from the media server.
///
/// Implementations own host, port and token composition. A non-200 reply
/// is an error; nothing is retried.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, path: &str, method: RequestMethod) -> Result<Vec<u8>, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Option<String>,
    token: String,
}

impl HttpTransport {
    pub fn new(config: &PmsConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| TransportError::Connect(String::new(), e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            token: config.token.clone(),
        })
    }

    fn build_url(&self, path: &str) -> Result<String, TransportError> {
        let base = self.base_url.as_ref().ok_or(TransportError::NotConfigured)?;
        if path.is_empty() {
            return Err(TransportError::NoEndpoint);
        }
        Ok(format!("{}{}", base, with_token(path, &self.token)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, path: &str, method: RequestMethod) -> Result<Vec<u8>, TransportError> {
        let url = self.build_url(path)?;
        debug!("{} {}", method, path);

        let response = self
            .client
            .request(method.to_reqwest(), &url)
            .send()
            .await
            .map_err(|e| TransportError::Connect(path.to_string(), e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(TransportError::Status(path.to_string(), status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Connect(path.to_string(), e.to_string()))?;

        Ok(body.to_vec())
    }
}

/// Append the access token as a query parameter.
pub fn with_token(path: &str, token: &str) -> String {
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}X-Plex-Token={}", path, sep, urlencoding::encode(token))
}
