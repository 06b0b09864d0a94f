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

//! Constants shared across the Rulesdesk crates.

/// The `User-Agent` header value sent with every outgoing HTTP request.
pub const RULESDESK_USER_AGENT: &str = concat!("Rulesdesk/", env!("CARGO_PKG_VERSION"));

/// The literal used wherever the client IP address could not be resolved.
pub const UNKNOWN_CLIENT_IP: &str = "unknown";
