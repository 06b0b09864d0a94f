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

//! Broker account listing and trading-rule lookups.

use super::{
    client::AccountsHttpClient,
    error::AccountsHttpError,
    models::{ApiResponse, BrokerAccount, TradingRules},
    query::GetBrokerDetailsParamsBuilder,
};
use crate::common::consts::{ENDPOINT_BROKER_DETAILS, ENDPOINT_TRADING_RULES};

/// Provides the read-only broker endpoints of the accounts backend.
///
/// Nothing is cached; every call is a fresh request.
#[derive(Debug, Clone)]
pub struct BrokerService {
    client: AccountsHttpClient,
}

impl BrokerService {
    /// Creates a new [`BrokerService`] sending through `client`.
    #[must_use]
    pub fn new(client: AccountsHttpClient) -> Self {
        Self { client }
    }

    /// Lists the broker accounts for `market_type`.
    ///
    /// `market_type` is a market type identifier (`crypto`, `forex`) or, for stocks, a
    /// region identifier (`india`, `us`, `singapore`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn get_broker_details(
        &self,
        market_type: &str,
    ) -> Result<ApiResponse<Vec<BrokerAccount>>, AccountsHttpError> {
        let params = GetBrokerDetailsParamsBuilder::default()
            .market_type(market_type)
            .build()
            .map_err(|e| AccountsHttpError::BuildError(e.to_string()))?;
        let query = serde_urlencoded::to_string(&params)?;
        let path = format!("{ENDPOINT_BROKER_DETAILS}?{query}");
        self.client.get(&path).await
    }

    /// Returns the raw trading rules of the broker account `broker_account_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn get_trading_rules(
        &self,
        broker_account_id: &str,
    ) -> Result<ApiResponse<TradingRules>, AccountsHttpError> {
        let path = format!(
            "{ENDPOINT_TRADING_RULES}/{}",
            urlencoding::encode(broker_account_id)
        );
        self.client.get(&path).await
    }
}
