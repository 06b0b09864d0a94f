// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2025 Rulesdesk Developers. All rights reserved.
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! A thin asynchronous HTTP client with default headers and request interceptors.

use std::{collections::HashMap, sync::Arc, time::Duration};

pub use bytes::Bytes;
use reqwest::{Method, header::HeaderMap};
pub use reqwest::StatusCode;
use rulesdesk_core::consts::RULESDESK_USER_AGENT;
use thiserror::Error;

use crate::interceptor::RequestInterceptor;

/// Represents the HTTP methods supported by the [`HttpClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
}

impl From<HttpMethod> for Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::GET => Self::GET,
            HttpMethod::POST => Self::POST,
            HttpMethod::PUT => Self::PUT,
            HttpMethod::DELETE => Self::DELETE,
            HttpMethod::PATCH => Self::PATCH,
        }
    }
}

/// Represents errors raised by the [`HttpClient`] before a response is received.
#[derive(Debug, Clone, Error)]
pub enum HttpClientError {
    /// The request could not be sent, or the connection failed.
    #[error("HTTP error occurred: {0}")]
    Error(String),
    /// The request exceeded the configured timeout.
    #[error("HTTP request timed out: {0}")]
    TimeoutError(String),
    /// The request was rejected before sending, e.g. by an interceptor.
    #[error("Invalid HTTP request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for HttpClientError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::TimeoutError(source.to_string())
        } else {
            Self::Error(source.to_string())
        }
    }
}

/// An outgoing HTTP request as seen by the interceptor chain.
///
/// Query parameters in `params` are appended to any query string already present in `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub params: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new [`HttpRequest`] with no headers, parameters or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the header `key` to `value`, replacing any existing value.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key.into(), value.into());
    }

    /// Sets the query parameter `key` to `value`, replacing any parameter of the same name.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.params.retain(|(k, _)| *k != key);
        self.params.push((key, value.into()));
    }
}

/// Represents the HTTP response returned by the [`HttpClient`].
///
/// Only the headers named in the client's `header_keys` are retained.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns `true` if the status code is in the range [200, 300).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Provides an HTTP client which applies default headers and a chain of
/// [`RequestInterceptor`]s to every outgoing request.
///
/// The client is backed by a [`reqwest::Client`] which keeps connections alive and can
/// be cloned cheaply. No retry policy is applied, and requests only time out when a
/// timeout is configured.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    header_keys: Arc<Vec<String>>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Creates a new [`HttpClient`].
    ///
    /// - `default_headers`: sent with every request unless the request (or an interceptor)
    ///   sets the same header.
    /// - `header_keys`: response headers to retain in each [`HttpResponse`].
    /// - `timeout_secs`: optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn new(
        default_headers: HashMap<String, String>,
        header_keys: Vec<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, HttpClientError> {
        let client = reqwest::Client::builder()
            .user_agent(RULESDESK_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            default_headers,
            header_keys: Arc::new(header_keys),
            interceptors: Vec::new(),
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    /// Appends `interceptor` to the chain. Interceptors run in registration order.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Returns the number of registered interceptors.
    #[must_use]
    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Sends an HTTP request built from the given parts.
    ///
    /// # Errors
    ///
    /// Returns an error if an interceptor rejects the request, the request cannot be sent,
    /// or the response body cannot be read. Non-2xx responses are not errors at this layer.
    pub async fn request(
        &self,
        method: HttpMethod,
        url: String,
        params: Option<Vec<(String, String)>>,
        headers: Option<HashMap<String, String>>,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, HttpClientError> {
        let request = HttpRequest {
            method,
            url,
            headers: headers.unwrap_or_default(),
            params: params.unwrap_or_default(),
            body,
        };
        self.send(request).await
    }

    /// Applies default headers and interceptors to `request`, then sends it.
    ///
    /// # Errors
    ///
    /// Returns an error if an interceptor rejects the request, the request cannot be sent,
    /// or the response body cannot be read.
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, HttpClientError> {
        for (key, value) in &self.default_headers {
            request
                .headers
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }

        for interceptor in &self.interceptors {
            interceptor.intercept(&mut request)?;
        }

        tracing::trace!(method = ?request.method, url = %request.url, "Sending HTTP request");

        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        self.to_response(response).await
    }

    async fn to_response(
        &self,
        response: reqwest::Response,
    ) -> Result<HttpResponse, HttpClientError> {
        let status = response.status();
        let headers = self.retain_headers(response.headers());
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn retain_headers(&self, headers: &HeaderMap) -> HashMap<String, String> {
        self.header_keys
            .iter()
            .filter_map(|key| headers.get(key.as_str()).map(|value| (key, value)))
            .filter_map(|(key, value)| value.to_str().ok().map(|v| (key.clone(), v.to_string())))
            .collect()
    }
}
