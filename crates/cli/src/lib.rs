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

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]

pub mod opt;
mod output;

use std::sync::Arc;

use rulesdesk_accounts::{
    common::{enums::MarketType, parse::parse_trading_rules},
    http::{
        auth::LoginService, brokers::BrokerService, client::AccountsHttpClient,
        models::{AccessTokenData, ApiResponse, LoginUserDto, ParsedTradingRules},
    },
    selection::AccountSelector,
};
use rulesdesk_common::store::{FileKeyValueStore, KeyValueStore};

use crate::{
    opt::{Commands, ContactOpt, RulesdeskCli, SelectOpt},
    output::{pprint_broker_accounts, pprint_trading_rules},
};

pub async fn run(opt: RulesdeskCli) -> anyhow::Result<()> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::open(&opt.store)?);
    let client = AccountsHttpClient::from_env(store)?;
    client.resolve_client_ip().await;

    match opt.command {
        Commands::SendOtp(contact) => {
            let login = LoginService::new(client);
            let response = match contact {
                ContactOpt {
                    email: Some(email), ..
                } => login.send_otp_email(&email).await?,
                ContactOpt {
                    mobile: Some(mobile),
                    ..
                } => login.send_otp_mobile(&mobile).await?,
                _ => anyhow::bail!("Either --email or --mobile is required"),
            };
            tracing::info!(message = ?response.message, "OTP requested");
        }
        Commands::VerifyOtp(verify) => {
            let login = LoginService::new(client);
            let response = match verify.contact {
                ContactOpt {
                    email: Some(email), ..
                } => login.verify_otp_email(&email, &verify.otp).await?,
                ContactOpt {
                    mobile: Some(mobile),
                    ..
                } => login.verify_otp_mobile(&mobile, &verify.otp).await?,
                _ => anyhow::bail!("Either --email or --mobile is required"),
            };
            tracing::info!(message = ?response.message, "OTP verified");
        }
        Commands::Login(credentials) => {
            let login = LoginService::new(client);
            let dto = LoginUserDto {
                email: credentials.email,
                mobile: credentials.mobile,
                otp: credentials.otp,
                password: credentials.password,
            };
            let response = login.login(&dto).await?;
            ensure_logged_in(&response)?;
            tracing::info!(store = %opt.store.display(), "Logged in");
        }
        Commands::Logout => {
            LoginService::new(client).clear_access_token()?;
            tracing::info!(store = %opt.store.display(), "Logged out");
        }
        Commands::Brokers(brokers) => {
            let response = BrokerService::new(client)
                .get_broker_details(&brokers.market_type)
                .await?;
            println!("{}", pprint_broker_accounts(&response.data.unwrap_or_default()));
        }
        Commands::Rules(rules) => {
            let response = BrokerService::new(client)
                .get_trading_rules(&rules.broker_account_id)
                .await?;
            let Some(raw) = response.data else {
                anyhow::bail!("No trading rules returned for '{}'", rules.broker_account_id);
            };
            println!("{}", pprint_trading_rules(&parse_trading_rules(&raw)));
        }
        Commands::Select(select) => run_select(BrokerService::new(client), select).await?,
    }
    Ok(())
}

// Judged from the response only; the store may still hold a token from an earlier run
fn ensure_logged_in(response: &ApiResponse<AccessTokenData>) -> anyhow::Result<()> {
    if response.session_token().is_none() {
        anyhow::bail!(
            "Login failed: {}",
            response
                .message
                .as_deref()
                .unwrap_or("no access token returned")
        );
    }
    Ok(())
}

async fn run_select(service: BrokerService, opt: SelectOpt) -> anyhow::Result<()> {
    let mut selector = AccountSelector::new(service);
    selector.initialize();

    if opt.market_type == MarketType::Stock {
        let Some(region) = opt.region else {
            anyhow::bail!("--region is required for the stock market");
        };
        selector.select_region(Some(region)).await?;
    } else {
        selector.select_market_type(opt.market_type).await;
    }

    let Some(broker_name) = opt.broker else {
        println!("{}", pprint_broker_accounts(selector.unique_brokers()));
        return Ok(());
    };

    let broker_id = selector
        .unique_brokers()
        .into_iter()
        .find(|b| b.broker_name.eq_ignore_ascii_case(&broker_name))
        .map(|b| b.id.clone())
        .ok_or_else(|| anyhow::anyhow!("No broker named '{broker_name}'"))?;
    selector.select_broker(&broker_id)?;

    let Some(account) = opt.account else {
        println!("{}", pprint_broker_accounts(selector.sub_brokers()));
        return Ok(());
    };

    let Some(data) = selector.select_sub_broker(&account).await? else {
        anyhow::bail!("Trading rules unavailable for '{account}'");
    };

    tracing::info!(
        account = %data.broker_account_name,
        market_type = %data.market_type_id,
        broker_id = %data.broker_id,
        "Selected broker account",
    );
    println!(
        "{}",
        pprint_trading_rules(&ParsedTradingRules {
            cash: data.cash,
            option: data.option,
            future: data.future,
        })
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn login_response(
        access_token: Option<&str>,
        message: Option<&str>,
    ) -> ApiResponse<AccessTokenData> {
        ApiResponse {
            success: access_token.is_some(),
            message: message.map(ToString::to_string),
            data: Some(AccessTokenData {
                access_token: access_token.map(ToString::to_string),
            }),
            ..ApiResponse::default()
        }
    }

    #[rstest]
    fn test_ensure_logged_in_with_token() {
        assert!(ensure_logged_in(&login_response(Some("abc"), None)).is_ok());
    }

    #[rstest]
    fn test_ensure_logged_in_reports_backend_message() {
        let error = ensure_logged_in(&login_response(None, Some("Invalid credentials")))
            .unwrap_err();

        assert_eq!(error.to_string(), "Login failed: Invalid credentials");
    }

    #[rstest]
    #[case(login_response(Some(""), None))]
    #[case(ApiResponse::default())]
    fn test_ensure_logged_in_without_token(#[case] response: ApiResponse<AccessTokenData>) {
        let error = ensure_logged_in(&response).unwrap_err();
        assert_eq!(error.to_string(), "Login failed: no access token returned");
    }
}
