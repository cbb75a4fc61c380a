// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Async clients for the node services.
//!
//! Each client wraps a proxy to a remote service. Requests are converted to
//! wire records, responses are translated back through
//! [`protocol_data::convert`], and every failure reaches the caller as an
//! [`Error`]: remote error records, transport codes and timeouts alike.

pub mod config;
pub mod error;
pub mod gateway;
pub mod group_manager;
pub mod log;
pub mod rpc;

pub use config::{ClientConfig, ServiceConfig};
pub use error::{Error, ErrorCode, Result, from_transport, to_error};
pub use gateway::{GatewayServiceClient, GatewayServiceProxy};
pub use group_manager::{GroupManagerServiceClient, GroupManagerServiceProxy};
pub use rpc::{RpcServiceClient, RpcServiceProxy};

use std::future::Future;
use std::time::{Duration, Instant};

use protocol_data::wire;
use tracing::{debug, warn};

/// Outcome of a proxied call: the response error record with the returned
/// values, or the transport failure code.
pub type ProxyResult<T> = std::result::Result<(wire::Error, T), i32>;

/// Awaits a proxied call, bounded by `timeout`, and translates its outcome.
pub(crate) async fn call<T, F>(
    method: &'static str,
    timeout: Duration,
    request: F,
) -> Result<T>
where
    F: Future<Output = ProxyResult<T>>,
{
    let start = Instant::now();
    debug!(event = "request", method);

    let result = match tokio::time::timeout(timeout, request).await {
        Err(_) => Err(Error::timeout(method)),
        Ok(Err(code)) => Err(from_transport(code)),
        Ok(Ok((status, value))) => match to_error(&status) {
            Some(err) => Err(err),
            None => Ok(value),
        },
    };

    match &result {
        Ok(_) => debug!(event = "response", method, cost = ?start.elapsed()),
        Err(err) => debug!(
            event = "response",
            method,
            code = err.code,
            cost = ?start.elapsed(),
        ),
    }
    result
}

/// Runs a call nobody waits for on the current runtime. Failures are only
/// logged.
pub(crate) fn notify<F>(method: &'static str, timeout: Duration, request: F)
where
    F: Future<Output = ProxyResult<()>> + Send + 'static,
{
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        warn!(event = "notify dropped", method, reason = "no runtime");
        return;
    };

    handle.spawn(async move {
        if let Err(err) = call(method, timeout, request).await {
            warn!(event = "notify failed", method, code = err.code, %err);
        }
    });
}
