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

//! Client for the Rulesdesk broker account backend.
//!
//! The `rulesdesk-accounts` crate provides:
//!
//! - [`http::client::AccountsHttpClient`]: the shared REST client which decorates every request
//!   with the session token, a request timestamp and the resolved client IP address, and
//!   normalizes responses into an [`http::models::ApiResponse`] envelope.
//! - [`http::auth::LoginService`] and [`http::brokers::BrokerService`]: one method per
//!   backend endpoint.
//! - [`selection::AccountSelector`]: the cascading market type → region → broker →
//!   sub-broker selection which reports the chosen account's parsed trading rules.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod common;
pub mod config;
pub mod http;
pub mod selection;
