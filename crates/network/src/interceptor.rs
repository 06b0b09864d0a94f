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

//! Request interception for the [`HttpClient`](crate::http::HttpClient).

use std::fmt::Debug;

use crate::http::{HttpClientError, HttpRequest};

/// Decorates an outgoing [`HttpRequest`] before it is sent.
///
/// Interceptors are invoked synchronously, in registration order, for every request
/// sent through the owning client. An error aborts the request before any network I/O.
pub trait RequestInterceptor: Debug + Send + Sync {
    /// Mutates `request` in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request must not be sent.
    fn intercept(&self, request: &mut HttpRequest) -> Result<(), HttpClientError>;
}
