//! HTTP implementation of the API client.
//!
//! Wraps a `reqwest` client configured from [`Configuration`] and maps each
//! [`ApiClient`] call to a single request against the NSoT REST endpoints.

use crate::api::{ApiClient, ApiError};
use crate::configuration::Configuration;
use crate::model::{singular, ListResult, ObjectId, ParamSet, RemoteObject};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Header carrying the principal identity.
pub const AUTH_HEADER: &str = "X-NSoT-Email";

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Base URL for the API
    pub base_url: Url,
    /// Principal identity sent with every request
    pub email: Option<String>,
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl HttpRequestConfig {
    pub fn from_configuration(configuration: &Configuration) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(
            "User-Agent".to_string(),
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        );

        Self {
            base_url: configuration.url().clone(),
            email: configuration.email().map(str::to_string),
            default_headers,
            timeout: configuration.timeout(),
        }
    }
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client, config })
    }

    /// URL of `segments` below the base URL, always with a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut request = self.client.request(method, url);

        if let Some(email) = &self.config.email {
            request = request.header(AUTH_HEADER, email);
        }

        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        request
    }

    /// Send a request and return its JSON body (null when empty).
    async fn execute(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        trace!("Response status {} from {}", status, response.url());

        let body = response.text().await?;

        if !status.is_success() {
            debug!("Request failed with {}: {}", status, body);
            return Err(ApiError::from_status(status));
        }

        trace!("Raw response text for deserialization: {}", body);
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn post(&self, resource: &str, body: &Map<String, Value>) -> Result<RemoteObject, ApiError> {
        let url = self.endpoint(&[resource])?;
        debug!("POST {}", url);
        let response = self.execute(self.request(Method::POST, url).json(body)).await?;
        Ok(RemoteObject::from_response(response, singular(resource))?)
    }

    async fn get(&self, resource: &str, filters: &ParamSet) -> Result<ListResult, ApiError> {
        let url = self.endpoint(&[resource])?;
        debug!("GET {}", url);
        let request = self.request(Method::GET, url).query(&filters.query_pairs());
        let response = self.execute(request).await?;
        Ok(ListResult::from_response(response, resource)?)
    }

    async fn get_object(&self, resource: &str, id: &ObjectId) -> Result<RemoteObject, ApiError> {
        let url = self.endpoint(&[resource, id.as_str()])?;
        debug!("GET {}", url);
        let response = self.execute(self.request(Method::GET, url)).await?;
        Ok(RemoteObject::from_response(response, singular(resource))?)
    }

    async fn put_object(
        &self,
        resource: &str,
        id: &ObjectId,
        body: &Map<String, Value>,
    ) -> Result<RemoteObject, ApiError> {
        let url = self.endpoint(&[resource, id.as_str()])?;
        debug!("PUT {}", url);
        let response = self.execute(self.request(Method::PUT, url).json(body)).await?;
        Ok(RemoteObject::from_response(response, singular(resource))?)
    }

    async fn delete_object(&self, resource: &str, id: &ObjectId) -> Result<(), ApiError> {
        let url = self.endpoint(&[resource, id.as_str()])?;
        debug!("DELETE {}", url);
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
