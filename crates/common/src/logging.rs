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

//! Tracing initialization for Rulesdesk binaries.

use std::env;

use tracing_subscriber::EnvFilter;

/// Initialize tracing.
///
/// Tracing can be configured to filter modules and write up to a specific level by
/// passing a configuration using the `RUST_LOG` environment variable. When `RUST_LOG`
/// is not set, `default_directive` is used instead.
///
/// Should only be called once during an applications run, ideally at the beginning
/// of the run.
///
/// # Errors
///
/// Returns an error if the tracing subscriber fails to initialize.
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let directive = env::var("RUST_LOG").unwrap_or_else(|_| default_directive.to_string());
    let env_filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("Invalid tracing directive '{directive}': {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))?;

    tracing::debug!(directive = %directive, "Initialized tracing");
    Ok(())
}
