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

//! Cascading selection of a broker account and reporting of its trading rules.
//!
//! The selection runs market type → region (stock only) → broker → sub-broker. Changing
//! any upstream selection clears everything downstream of it.

pub mod provider;
pub mod selector;

pub use provider::BrokerDataProvider;
pub use selector::{AccountSelector, SelectionError, SelectionState, TradingRulesCallback};
