use crate::error::{Error, Result};

/// Credential-bound HTTP client shared by all OpenAI collaborators.
///
/// Constructed once at startup and injected into each service, rather
/// than accessed as ambient state.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl OpenAiClient {
    /// Create a client for the given credential and API base URL
    pub fn new(api_key: String, api_base: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Config("OpenAI API key required".to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Start an authorized POST request against an API endpoint,
    /// e.g. `post("audio/speech")`
    pub(crate) fn post(&self, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{}", self.api_base, endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}
