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

//! Parsing of colon-delimited trading rule strings and lenient envelope fields.
//!
//! The backend stores each rule as a `"key: value"` string. Parsing never fails: a rule
//! without a `:` yields a key with no value, and anything after a second `:` is ignored.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::http::models::{ParsedTradingRules, TradingRule, TradingRules};

/// Deserializes any JSON value into a `bool`.
///
/// `true`, the string `"true"` (any case) and non-zero numbers are `true`; everything else,
/// including `null`, is `false`.
///
/// # Errors
///
/// Returns an error only if the input is not valid JSON.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    })
}

/// Deserializes any JSON value into an optional string.
///
/// `null` becomes `None`, strings are kept as is, and other values are rendered as JSON.
///
/// # Errors
///
/// Returns an error only if the input is not valid JSON.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Deserializes a number or numeric string into an optional `u16`.
///
/// Values which are not representable as a `u16` become `None`.
///
/// # Errors
///
/// Returns an error only if the input is not valid JSON.
pub fn deserialize_lenient_u16<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Parses a single `"key: value"` rule string.
///
/// Both parts are trimmed of surrounding whitespace.
#[must_use]
pub fn parse_trading_rule(rule: &str) -> TradingRule {
    let mut parts = rule.split(':').map(str::trim);
    let key = parts.next().unwrap_or_default().to_string();
    let value = parts.next().map(ToString::to_string);
    TradingRule { key, value }
}

/// Parses every rule string in `rules`, preserving order.
#[must_use]
pub fn parse_trading_rule_list(rules: &[String]) -> Vec<TradingRule> {
    rules.iter().map(|rule| parse_trading_rule(rule)).collect()
}

/// Parses the cash, option and future rule lists of `rules`.
#[must_use]
pub fn parse_trading_rules(rules: &TradingRules) -> ParsedTradingRules {
    ParsedTradingRules {
        cash: parse_trading_rule_list(&rules.cash),
        option: parse_trading_rule_list(&rules.option),
        future: parse_trading_rule_list(&rules.future),
    }
}
