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

//! Error structures and enumerations for the accounts HTTP client.

use rulesdesk_network::http::HttpClientError;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Represents the JSON body of a non-2xx response from the backend.
///
/// `message` is usually a string, but validation failures carry an array of strings.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "statusCode")]
    pub status_code: Option<u16>,
}

impl ApiErrorResponse {
    /// Returns the backend message as a single string, if one is present and non-empty.
    ///
    /// Array messages are joined with `", "`.
    #[must_use]
    pub fn message_text(&self) -> Option<String> {
        let text = match self.message.as_ref()? {
            Value::String(message) => message.clone(),
            Value::Array(messages) => messages
                .iter()
                .map(|m| match m {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Value::Null => return None,
            other => other.to_string(),
        };

        if text.is_empty() { None } else { Some(text) }
    }
}

/// A typed error enumeration for the accounts HTTP client.
#[derive(Debug, Clone, Error)]
pub enum AccountsHttpError {
    /// The backend answered with a non-2xx status and a message.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// The backend answered with a non-2xx status and no usable message.
    #[error("Request failed with status {status}")]
    UnexpectedStatus { status: u16, body: String },
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Failure during JSON serialization/deserialization.
    #[error("JSON error: {0}")]
    JsonError(String),
    /// Failure building request parameters.
    #[error("Build error: {0}")]
    BuildError(String),
    /// Failure persisting or reading client-side state.
    #[error("Store error: {0}")]
    StoreError(String),
}

impl AccountsHttpError {
    /// Returns the HTTP status code if the error originated from a backend response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpClientError> for AccountsHttpError {
    fn from(error: HttpClientError) -> Self {
        Self::NetworkError(error.to_string())
    }
}

impl From<serde_json::Error> for AccountsHttpError {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonError(error.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for AccountsHttpError {
    fn from(error: serde_urlencoded::ser::Error) -> Self {
        Self::BuildError(error.to_string())
    }
}
