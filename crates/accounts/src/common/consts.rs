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

//! Core constants shared across the accounts client components.

/// Key under which the session token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Public IP-lookup service queried once per client.
pub const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

pub const DEFAULT_BACKEND_HOST: &str = "127.0.0.1";
pub const DEFAULT_BACKEND_PORT: u16 = 3000;
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en";

// Environment variables
pub const ENV_BACKEND_IP: &str = "RULESDESK_BACKEND_IP";
pub const ENV_BACKEND_PORT: &str = "RULESDESK_BACKEND_PORT";
pub const ENV_BASE_URL: &str = "RULESDESK_BASE_URL";
pub const ENV_IP_LOOKUP_URL: &str = "RULESDESK_IP_LOOKUP_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "RULESDESK_HTTP_TIMEOUT_SECS";

// Request decoration
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const HEADER_REQUEST_TIMESTAMP: &str = "X-Request-Timestamp";
pub const HEADER_CLIENT_IP: &str = "X-Client-Ip";
pub const PARAM_TIMESTAMP: &str = "timestamp";
pub const PARAM_CLIENT_IP: &str = "clientIp";

// Endpoints (relative to the base URL)
pub const ENDPOINT_SEND_OTP_EMAIL: &str = "auth/login/verify-email";
pub const ENDPOINT_SEND_OTP_MOBILE: &str = "auth/login/verify-mobile";
pub const ENDPOINT_VERIFY_OTP_EMAIL: &str = "auth/login/verify-otp-email";
pub const ENDPOINT_VERIFY_OTP_MOBILE: &str = "auth/login/verify-otp-mobile";
pub const ENDPOINT_LOGIN: &str = "auth/login";
pub const ENDPOINT_BROKER_DETAILS: &str = "brokerAccount/broker-details";
pub const ENDPOINT_TRADING_RULES: &str = "brokerAccount/trading-rules";
