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

//! Request interceptors which decorate every request sent to the accounts backend.

use std::sync::Arc;

use rulesdesk_common::store::KeyValueStore;
use rulesdesk_core::datetime::iso8601_millis_now;
use rulesdesk_network::{
    http::{HttpClientError, HttpRequest},
    interceptor::RequestInterceptor,
};

use super::ip::ClientIp;
use crate::common::consts::{
    ACCESS_TOKEN_KEY, HEADER_AUTHORIZATION, HEADER_CLIENT_IP, HEADER_REQUEST_TIMESTAMP,
    PARAM_CLIENT_IP, PARAM_TIMESTAMP,
};

/// Sets `Authorization: Bearer <token>` from the persisted session token.
///
/// The store is read on every request, so a token persisted by a login is used from the
/// next request onwards. No header is set while no token is stored.
#[derive(Debug)]
pub struct AuthorizationInterceptor {
    store: Arc<dyn KeyValueStore>,
}

impl AuthorizationInterceptor {
    /// Creates a new [`AuthorizationInterceptor`] reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl RequestInterceptor for AuthorizationInterceptor {
    fn intercept(&self, request: &mut HttpRequest) -> Result<(), HttpClientError> {
        if let Some(token) = self.store.get(ACCESS_TOKEN_KEY) {
            request.set_header(HEADER_AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(())
    }
}

/// Stamps each request with a fresh timestamp and the resolved client IP, both as
/// headers and as query parameters.
#[derive(Debug)]
pub struct RequestContextInterceptor {
    client_ip: ClientIp,
}

impl RequestContextInterceptor {
    /// Creates a new [`RequestContextInterceptor`] reading from `client_ip`.
    #[must_use]
    pub fn new(client_ip: ClientIp) -> Self {
        Self { client_ip }
    }
}

impl RequestInterceptor for RequestContextInterceptor {
    fn intercept(&self, request: &mut HttpRequest) -> Result<(), HttpClientError> {
        let timestamp = iso8601_millis_now();
        let client_ip = self.client_ip.get();

        request.set_header(HEADER_REQUEST_TIMESTAMP, timestamp.clone());
        request.set_header(HEADER_CLIENT_IP, client_ip.clone());
        request.set_param(PARAM_TIMESTAMP, timestamp);
        request.set_param(PARAM_CLIENT_IP, client_ip);
        Ok(())
    }
}
