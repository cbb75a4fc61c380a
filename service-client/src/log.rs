// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use anyhow::bail;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::fmt::format::{DefaultFields, Format};

/// Global `tracing` subscriber for processes hosting the clients.
#[derive(Debug)]
pub struct Log {
    level: tracing::Level,
    filter: String,
    format: Option<String>,
}

impl Log {
    pub fn new(level: tracing::Level, filter: String) -> Self {
        Self {
            level,
            filter,
            format: None,
        }
    }

    pub fn with_format(mut self, format: String) -> Self {
        self.format = Some(format);
        self
    }

    fn subscriber(
        &self,
    ) -> SubscriberBuilder<DefaultFields, Format, EnvFilter> {
        tracing_subscriber::fmt::Subscriber::builder().with_env_filter(
            EnvFilter::new(self.filter.as_str())
                .add_directive(self.level.into()),
        )
    }

    /// Installs the subscriber as the global default.
    ///
    /// Supported formats are `json`, `plain` and `coloured` (the default).
    pub fn register(self) -> anyhow::Result<()> {
        let format = self.format.as_deref().unwrap_or("coloured");
        let subscriber = self.subscriber();

        match format {
            "json" => {
                let subscriber = subscriber
                    .json()
                    .with_current_span(false)
                    .flatten_event(true)
                    .finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            "plain" => {
                let subscriber = subscriber.with_ansi(false).finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            "coloured" => {
                let subscriber = subscriber.finish();
                tracing::subscriber::set_global_default(subscriber)?;
            }
            other => bail!("unknown log format {other:?}"),
        }
        Ok(())
    }
}
