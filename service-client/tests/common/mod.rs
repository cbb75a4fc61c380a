// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use hex::encode as to_hex;
use protocol_data::wire;
use service_client::{
    GatewayServiceProxy, GroupManagerServiceProxy, ProxyResult,
    RpcServiceProxy,
};
use tokio::sync::{Mutex, mpsc};

/// Record of a call received by a mock proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Received {
    pub method: &'static str,
    pub args: Vec<String>,
}

impl Received {
    fn new(method: &'static str, args: &[&dyn ToString]) -> Self {
        Self {
            method,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// How a mock proxy answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Ok,
    Remote(i32, String),
    Transport(i32),
    Hang,
}

impl Reply {
    async fn answer<T>(&self, value: T) -> ProxyResult<T> {
        match self {
            Reply::Ok => Ok((wire::Error::success(), value)),
            Reply::Remote(code, message) => {
                Ok((wire::Error::new(*code, message.clone()), value))
            }
            Reply::Transport(code) => Err(*code),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub struct Recorder {
    reply: Mutex<Reply>,
    calls: Mutex<Vec<Received>>,
    notify: mpsc::UnboundedSender<Received>,
}

impl Recorder {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Received>) {
        let (notify, rx) = mpsc::unbounded_channel();
        let recorder = Self {
            reply: Mutex::new(Reply::Ok),
            calls: Mutex::new(vec![]),
            notify,
        };
        (recorder, rx)
    }

    pub async fn set_reply(&self, reply: Reply) {
        *self.reply.lock().await = reply;
    }

    pub async fn calls(&self) -> Vec<Received> {
        self.calls.lock().await.clone()
    }

    async fn record<T>(&self, received: Received, value: T) -> ProxyResult<T> {
        self.calls.lock().await.push(received.clone());
        let _ = self.notify.send(received);
        let reply = self.reply.lock().await.clone();
        reply.answer(value).await
    }
}

pub struct MockGateway {
    pub recorder: Recorder,
    pub node_ids: Vec<Vec<u8>>,
}

#[async_trait]
impl GatewayServiceProxy for MockGateway {
    async fn send_message_by_node_id(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        dst_node_id: Vec<u8>,
        payload: Vec<u8>,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "send_message_by_node_id",
            &[
                &group_id,
                &to_hex(&src_node_id),
                &to_hex(&dst_node_id),
                &to_hex(&payload),
            ],
        );
        self.recorder.record(received, ()).await
    }

    async fn get_peers(&self) -> ProxyResult<String> {
        let peers = r#"{"peers":[]}"#.to_owned();
        let received = Received::new("get_peers", &[]);
        self.recorder.record(received, peers).await
    }

    async fn send_message_by_node_ids(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        dst_node_ids: Vec<Vec<u8>>,
        payload: Vec<u8>,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "send_message_by_node_ids",
            &[
                &group_id,
                &to_hex(&src_node_id),
                &dst_node_ids.len(),
                &to_hex(&payload),
            ],
        );
        self.recorder.record(received, ()).await
    }

    async fn send_broadcast_message(
        &self,
        group_id: String,
        src_node_id: Vec<u8>,
        payload: Vec<u8>,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "send_broadcast_message",
            &[&group_id, &to_hex(&src_node_id), &to_hex(&payload)],
        );
        self.recorder.record(received, ()).await
    }

    async fn get_node_ids(
        &self,
        group_id: String,
    ) -> ProxyResult<Vec<Vec<u8>>> {
        let received = Received::new("get_node_ids", &[&group_id]);
        self.recorder.record(received, self.node_ids.clone()).await
    }

    async fn notify_group_info(
        &self,
        group_info: wire::GroupInfo,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "notify_group_info",
            &[&group_info.group_id, &group_info.node_list.len()],
        );
        self.recorder.record(received, ()).await
    }

    async fn send_message_by_topic(
        &self,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<(i32, Vec<u8>)> {
        let received =
            Received::new("send_message_by_topic", &[&topic, &to_hex(&data)]);
        let mut response = data;
        response.reverse();
        self.recorder.record(received, (1, response)).await
    }

    async fn send_broadcast_message_by_topic(
        &self,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "send_broadcast_message_by_topic",
            &[&topic, &to_hex(&data)],
        );
        self.recorder.record(received, ()).await
    }

    async fn subscribe_topic(
        &self,
        client_id: String,
        topic_info: String,
    ) -> ProxyResult<()> {
        let received =
            Received::new("subscribe_topic", &[&client_id, &topic_info]);
        self.recorder.record(received, ()).await
    }

    async fn remove_topic(
        &self,
        client_id: String,
        topics: Vec<String>,
    ) -> ProxyResult<()> {
        let received =
            Received::new("remove_topic", &[&client_id, &topics.join(",")]);
        self.recorder.record(received, ()).await
    }
}

pub struct MockRpc {
    pub recorder: Recorder,
    pub connected: AtomicBool,
}

impl MockRpc {
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

#[async_trait]
impl RpcServiceProxy for MockRpc {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn notify_block_number(
        &self,
        group_id: String,
        node_name: String,
        block_number: i64,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "notify_block_number",
            &[&group_id, &node_name, &block_number],
        );
        self.recorder.record(received, ()).await
    }

    async fn notify_transaction_result(
        &self,
        rpc_id: String,
        group_id: String,
        tx_hash: Vec<u8>,
        result: wire::TransactionSubmitResult,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "notify_transaction_result",
            &[&rpc_id, &group_id, &to_hex(&tx_hash), &result.status],
        );
        self.recorder.record(received, ()).await
    }

    async fn notify_group_info(
        &self,
        group_info: wire::GroupInfo,
    ) -> ProxyResult<()> {
        let received =
            Received::new("notify_group_info", &[&group_info.group_id]);
        self.recorder.record(received, ()).await
    }

    async fn notify_amop_message(
        &self,
        message_type: i32,
        topic: String,
        data: Vec<u8>,
    ) -> ProxyResult<Vec<u8>> {
        let received = Received::new(
            "notify_amop_message",
            &[&message_type, &topic, &to_hex(&data)],
        );
        self.recorder.record(received, data).await
    }
}

pub struct MockGroupManager {
    pub recorder: Recorder,
    pub groups: Vec<wire::GroupInfo>,
    /// Answers batch group queries in reverse order.
    pub reversed: AtomicBool,
}

impl MockGroupManager {
    fn find(&self, chain_id: &str, group_id: &str) -> Option<wire::GroupInfo> {
        self.groups
            .iter()
            .find(|g| g.chain_id == chain_id && g.group_id == group_id)
            .cloned()
    }

    fn group(&self, chain_id: &str, group_id: &str) -> wire::GroupInfo {
        self.find(chain_id, group_id).unwrap_or_default()
    }
}

#[async_trait]
impl GroupManagerServiceProxy for MockGroupManager {
    async fn create_group(
        &self,
        group_info: wire::GroupInfo,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "create_group",
            &[&group_info.chain_id, &group_info.group_id],
        );
        self.recorder.record(received, ()).await
    }

    async fn expand_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_info: wire::ChainNodeInfo,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "expand_group_node",
            &[&chain_id, &group_id, &node_info.node_name, &node_info.node_type],
        );
        self.recorder.record(received, ()).await
    }

    async fn remove_group(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<()> {
        let received = Received::new("remove_group", &[&chain_id, &group_id]);
        self.recorder.record(received, ()).await
    }

    async fn remove_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "remove_group_node",
            &[&chain_id, &group_id, &node_name],
        );
        self.recorder.record(received, ()).await
    }

    async fn recover_group(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<()> {
        let received = Received::new("recover_group", &[&chain_id, &group_id]);
        self.recorder.record(received, ()).await
    }

    async fn recover_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()> {
        let received = Received::new(
            "recover_group_node",
            &[&chain_id, &group_id, &node_name],
        );
        self.recorder.record(received, ()).await
    }

    async fn start_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()> {
        let received =
            Received::new("start_node", &[&chain_id, &group_id, &node_name]);
        self.recorder.record(received, ()).await
    }

    async fn stop_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()> {
        let received =
            Received::new("stop_node", &[&chain_id, &group_id, &node_name]);
        self.recorder.record(received, ()).await
    }

    async fn get_chain_list(&self) -> ProxyResult<Vec<String>> {
        let chains = self.groups.iter().map(|g| g.chain_id.clone()).collect();
        let received = Received::new("get_chain_list", &[]);
        self.recorder.record(received, chains).await
    }

    async fn get_group_list(
        &self,
        chain_id: String,
    ) -> ProxyResult<Vec<String>> {
        let groups = self
            .groups
            .iter()
            .filter(|g| g.chain_id == chain_id)
            .map(|g| g.group_id.clone())
            .collect();
        let received = Received::new("get_group_list", &[&chain_id]);
        self.recorder.record(received, groups).await
    }

    async fn get_group_info(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<wire::GroupInfo> {
        let group = self.group(&chain_id, &group_id);
        let received =
            Received::new("get_group_info", &[&chain_id, &group_id]);
        self.recorder.record(received, group).await
    }

    async fn get_node_info(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<wire::ChainNodeInfo> {
        let node = self
            .group(&chain_id, &group_id)
            .node_list
            .into_iter()
            .find(|n| n.node_name == node_name)
            .unwrap_or_default();
        let received = Received::new(
            "get_node_info",
            &[&chain_id, &group_id, &node_name],
        );
        self.recorder.record(received, node).await
    }

    async fn get_group_infos(
        &self,
        chain_id: String,
        group_ids: Vec<String>,
    ) -> ProxyResult<Vec<wire::GroupInfo>> {
        let mut groups: Vec<_> = group_ids
            .iter()
            .filter_map(|group_id| self.find(&chain_id, group_id))
            .collect();
        if self.reversed.load(Ordering::SeqCst) {
            groups.reverse();
        }
        let received = Received::new(
            "get_group_infos",
            &[&chain_id, &group_ids.join(",")],
        );
        self.recorder.record(received, groups).await
    }
}
