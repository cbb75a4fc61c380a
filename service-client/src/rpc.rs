// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use protocol_data::convert::to_wire_group_info;
use protocol_data::group::GroupInfo;
use protocol_data::ledger::{BlockNumber, Hash, TransactionSubmitResult};
use protocol_data::wire;
use tracing::debug;

use crate::{ClientConfig, Error, ProxyResult, Result, call, notify};

const MODULE: &str = "RpcServiceClient";

/// Remote surface of the RPC front-end.
#[async_trait]
pub trait RpcServiceProxy: Send + Sync + 'static {
    /// Whether the proxy currently holds a live connection.
    fn is_connected(&self) -> bool;

    async fn notify_block_number(
        &self,
        group_id: String,
        node_name: String,
        block_number: BlockNumber,
    ) -> ProxyResult<()>;

    /// Delivers a submit result to the RPC instance named `rpc_id`.
    async fn notify_transaction_result(
        &self,
        rpc_id: String,
        group_id: String,
        tx_hash: Vec<u8>,
        result: wire::TransactionSubmitResult,
    ) -> ProxyResult<()>;

    async fn notify_group_info(
        &self,
        group_info: wire::GroupInfo,
    ) -> ProxyResult<()>;

    async fn notify_amop_message(
        &self,
        message_type: i32,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<Vec<u8>>;
}

pub struct RpcServiceClient<P> {
    proxy: Arc<P>,
    timeout: Duration,
}

impl<P: RpcServiceProxy> RpcServiceClient<P> {
    pub fn new(proxy: Arc<P>, config: &ClientConfig) -> Self {
        Self {
            proxy,
            timeout: config.call_timeout,
        }
    }

    pub fn proxy(&self) -> &Arc<P> {
        &self.proxy
    }

    pub fn start(&self) {}

    pub fn stop(&self) {}

    fn check_connection(&self, method: &'static str) -> Result<()> {
        if self.proxy.is_connected() {
            return Ok(());
        }
        debug!(event = "no connection", module = MODULE, method);
        Err(Error::service_unavailable(MODULE, method))
    }

    pub async fn notify_block_number(
        &self,
        group_id: &str,
        node_name: &str,
        block_number: BlockNumber,
    ) -> Result<()> {
        self.check_connection("notify_block_number")?;

        let request = self.proxy.notify_block_number(
            group_id.to_owned(),
            node_name.to_owned(),
            block_number,
        );
        call("notify_block_number", self.timeout, request).await
    }

    /// Forwards `result` to the RPC instance `rpc_id` without waiting for the
    /// outcome.
    pub fn notify_transaction_result(
        &self,
        rpc_id: &str,
        group_id: &str,
        tx_hash: &Hash,
        result: &TransactionSubmitResult,
    ) {
        let proxy = self.proxy.clone();
        let rpc_id = rpc_id.to_owned();
        let group_id = group_id.to_owned();
        let tx_hash = tx_hash.to_vec();
        let result = result.inner().clone();

        notify("notify_transaction_result", self.timeout, async move {
            proxy
                .notify_transaction_result(rpc_id, group_id, tx_hash, result)
                .await
        });
    }

    pub async fn notify_group_info(
        &self,
        group_info: &GroupInfo,
    ) -> Result<()> {
        self.check_connection("notify_group_info")?;

        let request = self
            .proxy
            .notify_group_info(to_wire_group_info(Some(group_info)));
        call("notify_group_info", self.timeout, request).await
    }

    /// Pushes an AMOP message to the RPC front-end and returns its response
    /// payload.
    pub async fn notify_amop_message(
        &self,
        message_type: i16,
        topic: &str,
        data: &[u8],
    ) -> Result<Vec<u8>> {
        self.check_connection("notify_amop_message")?;

        let request = self.proxy.notify_amop_message(
            message_type.into(),
            topic.to_owned(),
            data.to_vec(),
        );
        call("notify_amop_message", self.timeout, request).await
    }
}
