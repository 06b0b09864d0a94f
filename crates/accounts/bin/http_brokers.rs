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

use std::sync::Arc;

use rulesdesk_accounts::{
    common::enums::MarketType,
    http::{brokers::BrokerService, client::AccountsHttpClient},
};
use rulesdesk_common::{logging::init_tracing, store::InMemoryKeyValueStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("debug")?;

    let client = AccountsHttpClient::from_env(Arc::new(InMemoryKeyValueStore::new()))?;
    client.resolve_client_ip().await;

    let service = BrokerService::new(client);
    let response = service
        .get_broker_details(MarketType::Crypto.as_ref())
        .await?;

    for account in response.data.unwrap_or_default() {
        tracing::info!(
            id = %account.id,
            broker = %account.broker_name,
            account = %account.broker_account_name,
            "Broker account",
        );
    }

    Ok(())
}
