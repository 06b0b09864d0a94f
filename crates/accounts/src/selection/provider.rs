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

//! The data source seam between the selector and the backend.

use async_trait::async_trait;

use crate::http::{
    brokers::BrokerService,
    error::AccountsHttpError,
    models::{BrokerAccount, TradingRules},
};

/// Supplies broker accounts and trading rules to an
/// [`AccountSelector`](super::AccountSelector).
#[async_trait]
pub trait BrokerDataProvider: Send + Sync {
    /// Lists the broker accounts for the market type or region identifier `market_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the accounts cannot be fetched.
    async fn broker_details(
        &self,
        market_type: &str,
    ) -> Result<Vec<BrokerAccount>, AccountsHttpError>;

    /// Returns the raw trading rules of the broker account `broker_account_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be fetched.
    async fn trading_rules(
        &self,
        broker_account_id: &str,
    ) -> Result<TradingRules, AccountsHttpError>;
}

#[async_trait]
impl BrokerDataProvider for BrokerService {
    async fn broker_details(
        &self,
        market_type: &str,
    ) -> Result<Vec<BrokerAccount>, AccountsHttpError> {
        let response = self.get_broker_details(market_type).await?;
        Ok(response.data.unwrap_or_default())
    }

    async fn trading_rules(
        &self,
        broker_account_id: &str,
    ) -> Result<TradingRules, AccountsHttpError> {
        let response = self.get_trading_rules(broker_account_id).await?;
        response.data.ok_or_else(|| {
            AccountsHttpError::JsonError("trading rules response carried no data".to_string())
        })
    }
}
