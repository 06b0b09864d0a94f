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

//! Enumerations for the market types and stock regions offered by the selector.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Represents a market type tab of the account selector.
///
/// The string form (`stock`, `crypto`, `forex`) is the identifier sent to the backend.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarketType {
    /// Equities; brokers are listed per [`StockRegion`].
    #[default]
    Stock,
    /// Cryptocurrency.
    Crypto,
    /// Foreign exchange.
    Forex,
}

impl MarketType {
    /// Returns the human-readable name of the market type.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Stock => "Stock Market",
            Self::Crypto => "Cryptocurrency",
            Self::Forex => "Forex",
        }
    }

    /// Returns `true` if a [`StockRegion`] must be chosen before brokers are listed.
    #[must_use]
    pub const fn requires_region(self) -> bool {
        matches!(self, Self::Stock)
    }
}

/// Represents a stock market region.
///
/// The string form (`india`, `us`, `singapore`) is sent to the backend as the market type.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StockRegion {
    India,
    Us,
    Singapore,
}

impl StockRegion {
    /// Returns the human-readable name of the region.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::India => "Indian Stock Market",
            Self::Us => "US Stock Market",
            Self::Singapore => "Singapore Stock Market",
        }
    }
}
