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

//! Data models for the accounts backend REST API.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::common::parse::{
    deserialize_lenient_bool, deserialize_lenient_string, deserialize_lenient_u16,
};

/// Represents the response envelope returned by every backend endpoint.
///
/// All fields are optional on the wire and the metadata fields accept any JSON type:
/// a missing or `null` `success` is `false`, a numeric `status` is kept as its string
/// form, and a `statusCode` which is not a `u16` is `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub success: bool,
    #[serde(
        rename = "access_token",
        default,
        deserialize_with = "deserialize_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_u16")]
    pub status_code: Option<u16>,
}

// Manual impl so `T` needs no `Default`; used for empty 2xx bodies
impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self {
            success: false,
            access_token: None,
            message: None,
            data: None,
            status: None,
            status_code: None,
        }
    }
}

impl ApiResponse<AccessTokenData> {
    /// Returns the non-empty session token carried in `data.access_token`, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.access_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// Payload of endpoints which only acknowledge with a message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of the login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenData {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Body of `POST auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
#[builder(setter(into, strip_option))]
pub struct LoginUserDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of `POST auth/login/verify-email`.
#[derive(Clone, Debug, Serialize)]
pub struct SendOtpEmailRequest<'a> {
    pub email: &'a str,
}

/// Body of `POST auth/login/verify-mobile`.
#[derive(Clone, Debug, Serialize)]
pub struct SendOtpMobileRequest<'a> {
    pub mobile: &'a str,
}

/// Body of `POST auth/login/verify-otp-email`.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyOtpEmailRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

/// Body of `POST auth/login/verify-otp-mobile`.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyOtpMobileRequest<'a> {
    pub mobile: &'a str,
    pub otp: &'a str,
}

/// Represents a broker account as listed by `GET brokerAccount/broker-details`.
///
/// Several accounts may share the same `id` when they belong to the same broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub broker_account_name: String,
    pub broker_name: String,
}

/// Represents the raw trading rules of a broker account, one `"key: value"` string per rule.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRules {
    #[serde(default)]
    pub cash: Vec<String>,
    #[serde(default)]
    pub option: Vec<String>,
    #[serde(default)]
    pub future: Vec<String>,
}

/// A trading rule parsed from its `"key: value"` form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingRule {
    pub key: String,
    pub value: Option<String>,
}

/// The three trading rule lists of an account, parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTradingRules {
    pub cash: Vec<TradingRule>,
    pub option: Vec<TradingRule>,
    pub future: Vec<TradingRule>,
}

/// The trading rules reported for the account chosen in the selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingRulesData {
    pub broker_account_name: String,
    pub market_type_id: String,
    pub broker_id: String,
    pub cash: Vec<TradingRule>,
    pub option: Vec<TradingRule>,
    pub future: Vec<TradingRule>,
}
