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

use std::path::PathBuf;

use clap::Parser;
use rulesdesk_accounts::common::enums::{MarketType, StockRegion};

/// Main CLI structure for parsing command-line arguments and options.
///
/// This is the entry point for the Rulesdesk command-line interface, providing access to
/// the authentication flows, broker listings and trading rules of the accounts backend.
#[derive(Debug, Parser)]
#[clap(version, about, author)]
pub struct RulesdeskCli {
    /// File persisting the session token between runs.
    #[arg(
        long,
        global = true,
        env = "RULESDESK_STORE_PATH",
        default_value = ".rulesdesk/store.json"
    )]
    pub store: PathBuf,
    #[clap(subcommand)]
    pub command: Commands,
}

/// Available top-level commands for the Rulesdesk CLI.
#[derive(Parser, Debug)]
pub enum Commands {
    /// Requests a one-time password by email or SMS.
    SendOtp(ContactOpt),
    /// Verifies a one-time password.
    VerifyOtp(VerifyOtpOpt),
    /// Logs in and persists the session token.
    Login(LoginOpt),
    /// Removes the persisted session token.
    Logout,
    /// Lists the broker accounts of a market type or stock region.
    Brokers(BrokersOpt),
    /// Shows the parsed trading rules of a broker account.
    Rules(RulesOpt),
    /// Walks the market type, region, broker and account selection.
    Select(SelectOpt),
}

/// The email address or mobile number an OTP is sent to.
#[derive(Parser, Debug, Clone)]
pub struct ContactOpt {
    #[arg(long, conflicts_with = "mobile", required_unless_present = "mobile")]
    pub email: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct VerifyOtpOpt {
    #[clap(flatten)]
    pub contact: ContactOpt,
    /// The one-time password received.
    #[arg(long)]
    pub otp: String,
}

/// Login credentials; any combination accepted by the backend.
#[derive(Parser, Debug, Clone)]
pub struct LoginOpt {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    #[arg(long)]
    pub otp: Option<String>,
    #[arg(long, env = "RULESDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct BrokersOpt {
    /// Market type (`crypto`, `forex`) or stock region (`india`, `us`, `singapore`).
    #[arg(long)]
    pub market_type: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RulesOpt {
    /// The broker account `_id`.
    #[arg(long)]
    pub broker_account_id: String,
}

/// Selection inputs; omitting a trailing level lists the options for it.
#[derive(Parser, Debug, Clone)]
pub struct SelectOpt {
    #[arg(long, default_value = "stock")]
    pub market_type: MarketType,
    /// Required when the market type is `stock`.
    #[arg(long)]
    pub region: Option<StockRegion>,
    /// Broker name, case-insensitive.
    #[arg(long)]
    pub broker: Option<String>,
    /// Sub-broker account name.
    #[arg(long, requires = "broker")]
    pub account: Option<String>,
}
