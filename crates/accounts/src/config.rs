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

//! Configuration structures for the accounts client.

use rulesdesk_core::env::get_optional_env_var;

use crate::common::consts::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, ENV_BACKEND_IP,
    ENV_BACKEND_PORT, ENV_BASE_URL, ENV_HTTP_TIMEOUT_SECS, ENV_IP_LOOKUP_URL, IP_LOOKUP_URL,
};

/// Configuration for the [`AccountsHttpClient`](crate::http::client::AccountsHttpClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountsClientConfig {
    /// Full base URL override; when set, host and port are ignored.
    pub base_url_http: Option<String>,
    /// Backend host name or IP address.
    pub backend_host: String,
    /// Backend port.
    pub backend_port: u16,
    /// URL of the public IP-lookup service.
    pub ip_lookup_url: String,
    /// When false the client IP is never looked up and stays `"unknown"`.
    pub resolve_client_ip: bool,
    /// Value of the `Accept-Language` header.
    pub accept_language: String,
    /// Optional HTTP timeout in seconds; no timeout when `None`.
    pub http_timeout_secs: Option<u64>,
}

impl Default for AccountsClientConfig {
    fn default() -> Self {
        Self {
            base_url_http: None,
            backend_host: DEFAULT_BACKEND_HOST.to_string(),
            backend_port: DEFAULT_BACKEND_PORT,
            ip_lookup_url: IP_LOOKUP_URL.to_string(),
            resolve_client_ip: true,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            http_timeout_secs: None,
        }
    }
}

impl AccountsClientConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration pointing at `base_url`, with client IP lookup disabled.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url_http: Some(base_url.into()),
            resolve_client_ip: false,
            ..Self::default()
        }
    }

    /// Loads the configuration from the environment (and a `.env` file when present).
    ///
    /// Either `RULESDESK_BASE_URL`, or both `RULESDESK_BACKEND_IP` and
    /// `RULESDESK_BACKEND_PORT`, must be set.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(get_optional_env_var)
    }

    /// Builds the configuration from the given variable `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| anyhow::anyhow!("environment variable '{key}' must be set"))
        };

        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url_http = Some(base_url);
        } else {
            config.backend_host = required(ENV_BACKEND_IP)?;
            let port = required(ENV_BACKEND_PORT)?;
            config.backend_port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {ENV_BACKEND_PORT} '{port}': {e}"))?;
        }

        if let Some(url) = lookup(ENV_IP_LOOKUP_URL) {
            config.ip_lookup_url = url;
        }

        if let Some(secs) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout_secs = Some(
                secs.parse()
                    .map_err(|e| anyhow::anyhow!("Invalid {ENV_HTTP_TIMEOUT_SECS} '{secs}': {e}"))?,
            );
        }

        Ok(config)
    }

    /// Returns the HTTP base URL, respecting the override.
    ///
    /// Any trailing `/` is removed.
    #[must_use]
    pub fn http_url(&self) -> String {
        let url = self
            .base_url_http
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.backend_host, self.backend_port));
        url.trim_end_matches('/').to_string()
    }
}
