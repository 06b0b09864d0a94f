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

//! Best-effort resolution of the caller's public IP address.
//!
//! The address is looked up once per client from a public service. Any failure falls
//! back to the literal `"unknown"`; there is no retry.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rulesdesk_core::consts::UNKNOWN_CLIENT_IP;
use rulesdesk_network::http::{HttpClient, HttpMethod};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    #[serde(default)]
    ip: Option<String>,
}

/// A shared, atomically swappable client IP address.
///
/// Clones observe the same value. Holds `"unknown"` until [`ClientIp::set`] is called.
#[derive(Clone, Debug)]
pub struct ClientIp {
    inner: Arc<ArcSwap<String>>,
}

impl Default for ClientIp {
    fn default() -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(UNKNOWN_CLIENT_IP.to_string())),
        }
    }
}

impl ClientIp {
    /// Creates a new [`ClientIp`] holding `"unknown"`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current address.
    #[must_use]
    pub fn get(&self) -> String {
        self.inner.load().as_ref().clone()
    }

    /// Replaces the current address.
    pub fn set(&self, ip: impl Into<String>) {
        self.inner.store(Arc::new(ip.into()));
    }

    /// Returns `true` if an address other than `"unknown"` is held.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.inner.load().as_str() != UNKNOWN_CLIENT_IP
    }
}

/// Looks up the caller's public IP address at `url`, returning `"unknown"` on any failure.
///
/// The service must answer with a JSON object holding the address under `ip`.
pub async fn fetch_client_ip(client: &HttpClient, url: &str) -> String {
    match try_fetch_client_ip(client, url).await {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to fetch client IP");
            UNKNOWN_CLIENT_IP.to_string()
        }
    }
}

async fn try_fetch_client_ip(client: &HttpClient, url: &str) -> anyhow::Result<String> {
    let response = client
        .request(HttpMethod::GET, url.to_string(), None, None, None)
        .await?;

    if !response.is_success() {
        anyhow::bail!("IP lookup failed with status {}", response.status);
    }

    let lookup: IpLookupResponse = serde_json::from_slice(&response.body)?;
    lookup
        .ip
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .ok_or_else(|| anyhow::anyhow!("IP lookup returned no address"))
}
