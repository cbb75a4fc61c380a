// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::log::Log;

/// Default log_level.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log_type.
const DEFAULT_LOG_TYPE: &str = "coloured";

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Object name the proxy for this service is resolved from.
    pub endpoint: String,
}

impl ServiceConfig {
    fn named(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    pub log_level: Option<String>,
    pub log_type: Option<String>,
    pub log_filter: Option<String>,

    pub gateway: ServiceConfig,
    pub rpc: ServiceConfig,
    pub group_manager: ServiceConfig,

    /// Upper bound of every awaited remote call.
    #[serde(with = "humantime_serde")]
    pub call_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_type: None,
            log_filter: None,
            gateway: ServiceConfig::named("GatewayServiceObj"),
            rpc: ServiceConfig::named("RpcServiceObj"),
            group_manager: ServiceConfig::named("GroupManagerServiceObj"),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        toml::from_str(toml).context("invalid client config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let toml = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml_str(&toml)
    }

    pub(crate) fn log_level(&self) -> anyhow::Result<tracing::Level> {
        let level = self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level {level:?}"))
    }

    pub(crate) fn log_type(&self) -> String {
        self.log_type
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_TYPE.into())
    }

    pub(crate) fn log_filter(&self) -> String {
        self.log_filter.clone().unwrap_or_default()
    }

    /// Logger described by this configuration.
    pub fn log(&self) -> anyhow::Result<Log> {
        Ok(Log::new(self.log_level()?, self.log_filter())
            .with_format(self.log_type()))
    }
}
