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
use protocol_data::ledger::{KeyFactory, NodeKey};
use protocol_data::wire;

use crate::{ClientConfig, ProxyResult, Result, call, notify};

/// Remote surface of the gateway service.
#[async_trait]
pub trait GatewayServiceProxy: Send + Sync + 'static {
    async fn send_message_by_node_id(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        dst_node_id: Vec<u8>,
        payload: Vec<u8>,
    ) -> ProxyResult<()>;

    /// Peers as reported by the gateway, JSON encoded.
    async fn get_peers(&self) -> ProxyResult<String>;

    async fn send_message_by_node_ids(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        dst_node_ids: Vec<Vec<u8>>,
        payload: Vec<u8>,
    ) -> ProxyResult<()>;

    async fn send_broadcast_message(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        payload: Vec<u8>,
    ) -> ProxyResult<()>;

    async fn get_node_ids(&self, group_id: String) -> ProxyResult<Vec<Vec<u8>>>;

    async fn notify_group_info(
        &self,
        group_info: wire::GroupInfo,
    ) -> ProxyResult<()>;

    /// Returns the response type and payload.
    async fn send_message_by_topic(
        &self,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<(i32, Vec<u8>)>;

    async fn send_broadcast_message_by_topic(
        &self,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<()>;

    async fn subscribe_topic(
        &self,
        client_id: String,
        topic_info: String,
    ) -> ProxyResult<()>;

    async fn remove_topic(
        &self,
        client_id: String,
        topics: Vec<String>,
    ) -> ProxyResult<()>;
}

/// Gateway client. Node ids returned by the gateway are built into keys with
/// the configured [`KeyFactory`].
pub struct GatewayServiceClient<P, F> {
    proxy: Arc<P>,
    key_factory: F,
    timeout: Duration,
}

impl<P: GatewayServiceProxy, F: KeyFactory> GatewayServiceClient<P, F> {
    pub fn new(proxy: Arc<P>, key_factory: F, config: &ClientConfig) -> Self {
        Self {
            proxy,
            key_factory,
            timeout: config.call_timeout,
        }
    }

    pub fn proxy(&self) -> &Arc<P> {
        &self.proxy
    }

    pub fn start(&self) {}

    pub fn stop(&self) {}

    pub async fn send_message_by_node_id(
        &self,
        group_id: &str,
        src_node_id: &F::Key,
        dst_node_id: &F::Key,
        payload: &[u8],
    ) -> Result<()> {
        let request = self.proxy.send_message_by_node_id(
            group_id.to_owned(),
            src_node_id.encode(),
            dst_node_id.encode(),
            payload.to_vec(),
        );
        call("send_message_by_node_id", self.timeout, request).await
    }

    pub async fn get_peers(&self) -> Result<String> {
        call("get_peers", self.timeout, self.proxy.get_peers()).await
    }

    /// Sends `payload` to every node in `dst_node_ids` without waiting for
    /// the outcome.
    pub fn send_message_by_node_ids(
        &self,
        group_id: &str,
        src_node_id: &F::Key,
        dst_node_ids: &[F::Key],
        payload: &[u8],
    ) {
        let proxy = self.proxy.clone();
        let group_id = group_id.to_owned();
        let src_node_id = src_node_id.encode();
        let dst_node_ids = dst_node_ids.iter().map(NodeKey::encode).collect();
        let payload = payload.to_vec();

        notify("send_message_by_node_ids", self.timeout, async move {
            proxy
                .send_message_by_node_ids(
                    group_id,
                    src_node_id,
                    dst_node_ids,
                    payload,
                )
                .await
        });
    }

    /// Broadcasts `payload` to the group without waiting for the outcome.
    pub fn send_broadcast_message(
        &self,
        group_id: &str,
        src_node_id: &F::Key,
        payload: &[u8],
    ) {
        let proxy = self.proxy.clone();
        let group_id = group_id.to_owned();
        let src_node_id = src_node_id.encode();
        let payload = payload.to_vec();

        notify("send_broadcast_message", self.timeout, async move {
            proxy
                .send_broadcast_message(group_id, src_node_id, payload)
                .await
        });
    }

    pub async fn get_node_ids(&self, group_id: &str) -> Result<Vec<F::Key>> {
        let request = self.proxy.get_node_ids(group_id.to_owned());
        let node_ids = call("get_node_ids", self.timeout, request).await?;

        Ok(node_ids
            .iter()
            .map(|id| self.key_factory.create_key(id))
            .collect())
    }

    pub async fn notify_group_info(
        &self,
        group_info: &GroupInfo,
    ) -> Result<()> {
        let request = self
            .proxy
            .notify_group_info(to_wire_group_info(Some(group_info)));
        call("notify_group_info", self.timeout, request).await
    }

    pub async fn send_message_by_topic(
        &self,
        topic: &str,
        data: &[u8],
    ) -> Result<(i32, Vec<u8>)> {
        let request = self
            .proxy
            .send_message_by_topic(topic.to_owned(), data.to_vec());
        call("send_message_by_topic", self.timeout, request).await
    }

    /// Broadcasts `data` to the subscribers of `topic` without waiting for
    /// the outcome.
    pub fn send_broadcast_message_by_topic(&self, topic: &str, data: &[u8]) {
        let proxy = self.proxy.clone();
        let topic = topic.to_owned();
        let data = data.to_vec();

        notify("send_broadcast_message_by_topic", self.timeout, async move {
            proxy.send_broadcast_message_by_topic(topic, data).await
        });
    }

    pub async fn subscribe_topic(
        &self,
        client_id: &str,
        topic_info: &str,
    ) -> Result<()> {
        let request = self
            .proxy
            .subscribe_topic(client_id.to_owned(), topic_info.to_owned());
        call("subscribe_topic", self.timeout, request).await
    }

    pub async fn remove_topic(
        &self,
        client_id: &str,
        topics: &[String],
    ) -> Result<()> {
        let request = self
            .proxy
            .remove_topic(client_id.to_owned(), topics.to_vec());
        call("remove_topic", self.timeout, request).await
    }
}
