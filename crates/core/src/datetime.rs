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

//! Timestamp formatting functions.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats the given UTC datetime as an ISO 8601 (RFC 3339) string with millisecond
/// precision and a `Z` suffix, e.g. `2024-02-10T14:58:43.456Z`.
#[inline]
#[must_use]
pub fn datetime_to_iso8601_millis(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the current UTC time as an ISO 8601 string with millisecond precision.
#[inline]
#[must_use]
pub fn iso8601_millis_now() -> String {
    datetime_to_iso8601_millis(Utc::now())
}
