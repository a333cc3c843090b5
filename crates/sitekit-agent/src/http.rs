//! HTTP implementation of the agent service boundary.

use std::io::Read;

use crate::protocol::AgentRequest;
use crate::service::{AgentError, AgentService};

/// Agent service over HTTP: posts the conversation as JSON and reads the
/// newline-delimited event stream from the response body incrementally.
pub struct HttpAgentService {
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAgentService {
    /// Create a service posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl AgentService for HttpAgentService {
    fn send_turn(&self, request: &AgentRequest) -> Result<Box<dyn Read + Send>, AgentError> {
        let mut builder = ureq::post(&self.endpoint).header("accept", "application/x-ndjson");
        if let Some(api_key) = &self.api_key {
            builder = builder.header("authorization", format!("Bearer {api_key}"));
        }

        let response = builder.send_json(request).map_err(|e| match e {
            ureq::Error::StatusCode(code) => {
                AgentError::Request(format!("upstream returned status {code}"))
            }
            other => AgentError::Unavailable(other.to_string()),
        })?;

        tracing::debug!(endpoint = %self.endpoint, "Opened agent stream");
        Ok(Box::new(response.into_body().into_reader()))
    }
}
