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

//! The account selector state machine.

use std::fmt::Debug;

use ahash::AHashSet;
use thiserror::Error;

use super::provider::BrokerDataProvider;
use crate::{
    common::{
        enums::{MarketType, StockRegion},
        parse::parse_trading_rules,
    },
    http::models::{BrokerAccount, TradingRulesData},
};

/// Callback invoked with the parsed trading rules of the selected account.
pub type TradingRulesCallback = Box<dyn FnMut(&TradingRulesData) + Send>;

/// Represents an invalid input to the [`AccountSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No market type selected")]
    MarketTypeNotSelected,
    #[error("Market type '{0}' has no regions")]
    RegionNotApplicable(MarketType),
    #[error("Unknown broker '{0}'")]
    UnknownBroker(String),
    #[error("No broker selected")]
    BrokerNotSelected,
    #[error("Unknown sub-broker '{0}'")]
    UnknownSubBroker(String),
}

/// The current selections of an [`AccountSelector`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub market_type: Option<MarketType>,
    pub region: Option<StockRegion>,
    pub broker_id: Option<String>,
    pub sub_broker: Option<String>,
    pub selected_account: Option<BrokerAccount>,
}

impl SelectionState {
    fn clear_below_region(&mut self) {
        self.broker_id = None;
        self.clear_below_broker();
    }

    fn clear_below_broker(&mut self) {
        self.sub_broker = None;
        self.selected_account = None;
    }
}

/// Drives the cascading selection of a broker account.
///
/// All mutations take `&mut self`, so fetches triggered by successive selections on one
/// selector never overlap.
pub struct AccountSelector<P> {
    provider: P,
    state: SelectionState,
    brokers: Vec<BrokerAccount>,
    loading: bool,
    on_trading_rules_change: Option<TradingRulesCallback>,
}

impl<P: Debug> Debug for AccountSelector<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(AccountSelector))
            .field("provider", &self.provider)
            .field("state", &self.state)
            .field("brokers", &self.brokers)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<P: BrokerDataProvider> AccountSelector<P> {
    /// Creates a new [`AccountSelector`] with nothing selected.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: SelectionState::default(),
            brokers: Vec::new(),
            loading: false,
            on_trading_rules_change: None,
        }
    }

    /// Sets the callback invoked whenever a sub-broker's trading rules are fetched.
    #[must_use]
    pub fn with_callback(mut self, callback: TradingRulesCallback) -> Self {
        self.on_trading_rules_change = Some(callback);
        self
    }

    /// Returns the current selections.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Returns every broker account fetched for the current market type or region.
    #[must_use]
    pub fn brokers(&self) -> &[BrokerAccount] {
        &self.brokers
    }

    /// Returns `true` while a broker fetch is in flight.
    ///
    /// A selection future dropped mid-fetch leaves this set until the next market type
    /// or region selection.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Selects the default market type ([`MarketType::Stock`]) when none is selected.
    ///
    /// Brokers are not fetched; stock brokers are listed once a region is chosen.
    pub fn initialize(&mut self) {
        if self.state.market_type.is_none() {
            self.state.market_type = Some(MarketType::default());
        }
    }

    /// Selects `market_type`, clearing the region, brokers and all downstream selections.
    ///
    /// Brokers are fetched immediately for market types which have no regions.
    pub async fn select_market_type(&mut self, market_type: MarketType) {
        self.state.market_type = Some(market_type);
        self.state.region = None;
        self.state.clear_below_region();
        self.reset_brokers();

        if !market_type.requires_region() {
            self.fetch_brokers(market_type.as_ref()).await;
        }
    }

    /// Selects `region` for the stock market, clearing brokers and downstream selections.
    ///
    /// Brokers are fetched for `Some(region)`; `None` only clears.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected market type has no regions.
    pub async fn select_region(
        &mut self,
        region: Option<StockRegion>,
    ) -> Result<(), SelectionError> {
        match self.state.market_type {
            None => return Err(SelectionError::MarketTypeNotSelected),
            Some(market_type) if !market_type.requires_region() => {
                return Err(SelectionError::RegionNotApplicable(market_type));
            }
            Some(_) => {}
        }

        self.state.region = region;
        self.state.clear_below_region();
        self.reset_brokers();

        if let Some(region) = region {
            self.fetch_brokers(region.as_ref()).await;
        }
        Ok(())
    }

    /// Selects the broker `broker_id`, clearing the sub-broker selection.
    ///
    /// # Errors
    ///
    /// Returns an error if no fetched broker account has the given id.
    pub fn select_broker(&mut self, broker_id: &str) -> Result<(), SelectionError> {
        if !self.brokers.iter().any(|b| b.id == broker_id) {
            return Err(SelectionError::UnknownBroker(broker_id.to_string()));
        }

        self.state.broker_id = Some(broker_id.to_string());
        self.state.clear_below_broker();
        Ok(())
    }

    /// Selects the sub-broker account named `broker_account_name`, fetches its trading
    /// rules and reports them to the callback.
    ///
    /// Returns `Ok(None)` (without invoking the callback) if the rules cannot be fetched.
    ///
    /// # Errors
    ///
    /// Returns an error if no broker is selected or the name is not among
    /// [`Self::sub_brokers`].
    pub async fn select_sub_broker(
        &mut self,
        broker_account_name: &str,
    ) -> Result<Option<TradingRulesData>, SelectionError> {
        let broker_id = self
            .state
            .broker_id
            .clone()
            .ok_or(SelectionError::BrokerNotSelected)?;

        let account = self
            .sub_brokers()
            .into_iter()
            .find(|a| a.broker_account_name == broker_account_name)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownSubBroker(broker_account_name.to_string()))?;

        self.state.sub_broker = Some(account.broker_account_name.clone());
        self.state.selected_account = Some(account.clone());

        let rules = match self.provider.trading_rules(&account.id).await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::error!(
                    broker_account_id = %account.id,
                    error = %e,
                    "Error fetching trading rules",
                );
                return Ok(None);
            }
        };

        let parsed = parse_trading_rules(&rules);
        let data = TradingRulesData {
            broker_account_name: account.broker_account_name,
            market_type_id: self
                .state
                .market_type
                .map(|m| m.to_string())
                .unwrap_or_default(),
            broker_id,
            cash: parsed.cash,
            option: parsed.option,
            future: parsed.future,
        };

        if let Some(callback) = self.on_trading_rules_change.as_mut() {
            callback(&data);
        }

        Ok(Some(data))
    }

    /// Returns one broker account per distinct broker name, keeping the first occurrence
    /// and first-seen order.
    #[must_use]
    pub fn unique_brokers(&self) -> Vec<&BrokerAccount> {
        let mut seen = AHashSet::new();
        self.brokers
            .iter()
            .filter(|b| seen.insert(b.broker_name.as_str()))
            .collect()
    }

    /// Returns the accounts under the selected broker id, or every account when no broker
    /// is selected.
    #[must_use]
    pub fn sub_brokers(&self) -> Vec<&BrokerAccount> {
        self.brokers
            .iter()
            .filter(|b| {
                self.state
                    .broker_id
                    .as_ref()
                    .is_none_or(|broker_id| b.id == *broker_id)
            })
            .collect()
    }

    /// Returns `true` if a region must be chosen for the selected market type.
    #[must_use]
    pub fn region_selector_visible(&self) -> bool {
        self.state
            .market_type
            .is_some_and(MarketType::requires_region)
    }

    /// Returns `true` if a broker can be chosen.
    ///
    /// The broker list is emptied before every fetch, so this is `false` while loading.
    #[must_use]
    pub fn broker_selector_enabled(&self) -> bool {
        !self.brokers.is_empty()
    }

    /// Returns `true` if a sub-broker can be chosen.
    #[must_use]
    pub fn sub_broker_selector_enabled(&self) -> bool {
        self.broker_selector_enabled() && self.state.broker_id.is_some()
    }

    fn reset_brokers(&mut self) {
        self.brokers.clear();
        self.loading = false;
    }

    async fn fetch_brokers(&mut self, market_type: &str) {
        debug_assert!(self.brokers.is_empty());
        self.loading = true;

        match self.provider.broker_details(market_type).await {
            Ok(brokers) => {
                tracing::debug!(market_type = %market_type, count = brokers.len(), "Fetched brokers");
                self.brokers = brokers;
            }
            Err(e) => {
                tracing::error!(market_type = %market_type, error = %e, "Error fetching brokers");
                self.brokers.clear();
            }
        }

        self.loading = false;
    }
}
