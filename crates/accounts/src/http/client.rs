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

//! Provides the shared HTTP client for the accounts backend REST API.
//!
//! The [`AccountsHttpClient`] owns a single [`HttpClient`] with a fixed base URL. Every
//! request passes through two interceptors:
//!
//! - [`AuthorizationInterceptor`]: `Authorization: Bearer <token>` from the persisted token.
//! - [`RequestContextInterceptor`]: `X-Request-Timestamp`/`X-Client-Ip` headers and the
//!   matching `timestamp`/`clientIp` query parameters.
//!
//! Responses with a 2xx status are decoded into an [`ApiResponse`] (an empty body yields an
//! empty envelope). Any other status, or a transport failure, is logged and returned as an
//! [`AccountsHttpError`].

use std::{collections::HashMap, sync::Arc};

use rulesdesk_common::store::KeyValueStore;
use rulesdesk_network::http::{HttpClient, HttpMethod, HttpResponse};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{runtime::Handle, sync::OnceCell, task::JoinHandle};

use super::{
    error::{AccountsHttpError, ApiErrorResponse},
    interceptors::{AuthorizationInterceptor, RequestContextInterceptor},
    ip::{ClientIp, fetch_client_ip},
    models::ApiResponse,
};
use crate::{
    common::consts::{ACCESS_TOKEN_KEY, HEADER_ACCEPT_LANGUAGE},
    config::AccountsClientConfig,
};

/// Provides the HTTP client for the accounts backend.
///
/// Cloning is cheap; clones share the connection pool, the token store and the
/// resolved client IP.
#[derive(Debug, Clone)]
pub struct AccountsHttpClient {
    base_url: String,
    client: HttpClient,
    lookup_client: HttpClient,
    ip_lookup_url: Option<String>,
    client_ip: ClientIp,
    ip_resolution: Arc<OnceCell<String>>,
    store: Arc<dyn KeyValueStore>,
}

impl AccountsHttpClient {
    /// Creates a new [`AccountsHttpClient`] from `config`, persisting the session token in
    /// `store`.
    ///
    /// When client IP resolution is enabled and a Tokio runtime is running, the one-shot
    /// lookup is started in the background; requests sent before it completes carry
    /// `"unknown"`. Outside a runtime the lookup starts on the first call to
    /// [`Self::resolve_client_ip`] or [`Self::spawn_client_ip_resolution`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP clients cannot be built.
    pub fn new(
        config: &AccountsClientConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AccountsHttpError> {
        let client_ip = ClientIp::new();
        let default_headers = HashMap::from([(
            HEADER_ACCEPT_LANGUAGE.to_string(),
            config.accept_language.clone(),
        )]);

        let client = HttpClient::new(default_headers, vec![], config.http_timeout_secs)?
            .with_interceptor(Arc::new(AuthorizationInterceptor::new(store.clone())))
            .with_interceptor(Arc::new(RequestContextInterceptor::new(client_ip.clone())));

        let lookup_client = HttpClient::new(HashMap::new(), vec![], config.http_timeout_secs)?;

        let accounts_client = Self {
            base_url: config.http_url(),
            client,
            lookup_client,
            ip_lookup_url: config
                .resolve_client_ip
                .then(|| config.ip_lookup_url.clone()),
            client_ip,
            ip_resolution: Arc::new(OnceCell::new()),
            store,
        };

        if accounts_client.ip_lookup_url.is_some() {
            match Handle::try_current() {
                Ok(handle) => {
                    let client = accounts_client.clone();
                    handle.spawn(async move {
                        client.resolve_client_ip().await;
                    });
                }
                Err(_) => tracing::debug!("No Tokio runtime, client IP lookup deferred"),
            }
        }

        Ok(accounts_client)
    }

    /// Creates a new [`AccountsHttpClient`] configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the client cannot be built.
    pub fn from_env(store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let config = AccountsClientConfig::from_env()?;
        Ok(Self::new(&config, store)?)
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the client IP currently attached to requests.
    #[must_use]
    pub fn client_ip(&self) -> String {
        self.client_ip.get()
    }

    /// Returns the store holding the session token.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Returns the persisted session token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY)
    }

    /// Looks up the client IP and attaches it to all subsequent requests.
    ///
    /// The lookup runs at most once per client (clones included); later calls wait for
    /// it and return its result. Falls back to `"unknown"` on any failure. Does nothing
    /// (and returns the current value) when client IP resolution is disabled.
    pub async fn resolve_client_ip(&self) -> String {
        let Some(url) = self.ip_lookup_url.as_deref() else {
            return self.client_ip.get();
        };

        self.ip_resolution
            .get_or_init(|| async {
                let ip = fetch_client_ip(&self.lookup_client, url).await;
                self.client_ip.set(ip.clone());
                tracing::info!(client_ip = %ip, "Client IP initialized");
                ip
            })
            .await
            .clone()
    }

    /// Spawns [`Self::resolve_client_ip`] on the current Tokio runtime.
    ///
    /// The returned handle completes once the (possibly already running) lookup is done.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_client_ip_resolution(&self) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            client.resolve_client_ip().await;
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_request<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse<T>, AccountsHttpError> {
        let url = self.url(path);

        let response = match self.client.request(method, url.clone(), None, None, body).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "API error");
                return Err(e.into());
            }
        };

        if response.is_success() {
            match Self::decode_success::<T>(&response.body) {
                Ok(data) => {
                    tracing::debug!(url = %url, status = response.status.as_u16(), "API success");
                    Ok(data)
                }
                Err(e) => {
                    tracing::error!(
                        url = %url,
                        status = response.status.as_u16(),
                        error = %e,
                        "API error: undecodable response body",
                    );
                    Err(e.into())
                }
            }
        } else {
            let error = Self::error_from_response(&response);
            tracing::error!(
                url = %url,
                status = response.status.as_u16(),
                body = %String::from_utf8_lossy(&response.body),
                message = %error,
                "API error",
            );
            Err(error)
        }
    }

    // An empty 2xx body (e.g. 204) decodes as an empty envelope
    fn decode_success<T: DeserializeOwned>(
        body: &[u8],
    ) -> Result<ApiResponse<T>, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ApiResponse::default());
        }
        serde_json::from_slice(body)
    }

    fn error_from_response(response: &HttpResponse) -> AccountsHttpError {
        let status = response.status.as_u16();
        let message = serde_json::from_slice::<ApiErrorResponse>(&response.body)
            .ok()
            .and_then(|e| e.message_text());

        match message {
            Some(message) => AccountsHttpError::Api { status, message },
            None => AccountsHttpError::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            },
        }
    }

    /// Sends `GET <base>/<path>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the body cannot be
    /// decoded.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, AccountsHttpError> {
        self.handle_request(HttpMethod::GET, path, None).await
    }

    /// Sends `POST <base>/<path>` with `body` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the request fails, the status is
    /// not 2xx, or the response cannot be decoded.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, AccountsHttpError> {
        let body = serde_json::to_vec(body)?;
        self.handle_request(HttpMethod::POST, path, Some(body)).await
    }

    /// Sends `PUT <base>/<path>` with `body` encoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the request fails, the status is
    /// not 2xx, or the response cannot be decoded.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse<T>, AccountsHttpError> {
        let body = serde_json::to_vec(body)?;
        self.handle_request(HttpMethod::PUT, path, Some(body)).await
    }

    /// Sends `DELETE <base>/<path>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the body cannot be
    /// decoded.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiResponse<T>, AccountsHttpError> {
        self.handle_request(HttpMethod::DELETE, path, None).await
    }
}
