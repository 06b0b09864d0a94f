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

use clap::Parser;
use rulesdesk_cli::opt::RulesdeskCli;
use rulesdesk_common::logging::init_tracing;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(e) = init_tracing("info") {
        eprintln!("{e}");
    }
    if let Err(e) = rulesdesk_cli::run(RulesdeskCli::parse()).await {
        tracing::error!("Error executing Rulesdesk CLI: {e}");
        std::process::exit(1);
    }
}
