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

//! Builder types for accounts backend query parameters.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Query parameters for `GET brokerAccount/broker-details`.
///
/// `market_type` is either a market type identifier (`crypto`, `forex`) or, for stocks,
/// a region identifier (`india`, `us`, `singapore`).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GetBrokerDetailsParams {
    pub market_type: String,
}
