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

//! Table rendering of broker accounts and trading rules.

use rulesdesk_accounts::http::models::{BrokerAccount, ParsedTradingRules, TradingRule};
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct BrokerAccountDisplay {
    broker: String,
    account: String,
    id: String,
}

#[derive(Tabled)]
struct TradingRuleDisplay {
    segment: &'static str,
    rule: String,
    value: String,
}

/// Return a [`String`] representation of the broker accounts as a table.
#[must_use]
pub fn pprint_broker_accounts<'a, I>(accounts: I) -> String
where
    I: IntoIterator<Item = &'a BrokerAccount>,
{
    let data: Vec<BrokerAccountDisplay> = accounts
        .into_iter()
        .map(|account| BrokerAccountDisplay {
            broker: account.broker_name.clone(),
            account: account.broker_account_name.clone(),
            id: account.id.clone(),
        })
        .collect();

    Table::new(data).with(Style::rounded()).to_string()
}

/// Return a [`String`] representation of the parsed trading rules as a table.
///
/// Rules without a value show `-`.
#[must_use]
pub fn pprint_trading_rules(rules: &ParsedTradingRules) -> String {
    let segment = |name: &'static str, rules: &[TradingRule]| {
        rules
            .iter()
            .map(move |rule| TradingRuleDisplay {
                segment: name,
                rule: rule.key.clone(),
                value: rule.value.clone().unwrap_or_else(|| "-".to_string()),
            })
            .collect::<Vec<_>>()
    };

    let data: Vec<TradingRuleDisplay> = segment("cash", &rules.cash)
        .into_iter()
        .chain(segment("option", &rules.option))
        .chain(segment("future", &rules.future))
        .collect();

    Table::new(data).with(Style::rounded()).to_string()
}
