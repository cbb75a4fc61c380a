// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Chain, group and node descriptions managed by the group manager.

use std::collections::BTreeMap;

/// Role of a node within its group.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    #[default]
    Unset,
    Consensus,
    Observer,
    OutsideGroup,
    /// A role this build does not know about, kept as-is.
    Other(i32),
}

impl From<i32> for NodeType {
    fn from(value: i32) -> Self {
        match value {
            0 => NodeType::Unset,
            1 => NodeType::Consensus,
            2 => NodeType::Observer,
            3 => NodeType::OutsideGroup,
            other => NodeType::Other(other),
        }
    }
}

impl From<NodeType> for i32 {
    fn from(value: NodeType) -> Self {
        match value {
            NodeType::Unset => 0,
            NodeType::Consensus => 1,
            NodeType::Observer => 2,
            NodeType::OutsideGroup => 3,
            NodeType::Other(other) => other,
        }
    }
}

/// Kind of service a node exposes, used as key of the endpoint map.
///
/// Equality and ordering follow the wire value, so `Other(8)` and `Rpc` are
/// the same key.
#[derive(Debug, Clone, Copy)]
pub enum ServiceType {
    Default,
    Ledger,
    Scheduler,
    Executor,
    TxPool,
    Consensus,
    Front,
    Gateway,
    Rpc,
    Other(i32),
}

impl From<i32> for ServiceType {
    fn from(value: i32) -> Self {
        match value {
            0 => ServiceType::Default,
            1 => ServiceType::Ledger,
            2 => ServiceType::Scheduler,
            3 => ServiceType::Executor,
            4 => ServiceType::TxPool,
            5 => ServiceType::Consensus,
            6 => ServiceType::Front,
            7 => ServiceType::Gateway,
            8 => ServiceType::Rpc,
            other => ServiceType::Other(other),
        }
    }
}

impl From<ServiceType> for i32 {
    fn from(value: ServiceType) -> Self {
        match value {
            ServiceType::Default => 0,
            ServiceType::Ledger => 1,
            ServiceType::Scheduler => 2,
            ServiceType::Executor => 3,
            ServiceType::TxPool => 4,
            ServiceType::Consensus => 5,
            ServiceType::Front => 6,
            ServiceType::Gateway => 7,
            ServiceType::Rpc => 8,
            ServiceType::Other(other) => other,
        }
    }
}

impl PartialEq for ServiceType {
    fn eq(&self, other: &Self) -> bool {
        i32::from(*self) == i32::from(*other)
    }
}

impl Eq for ServiceType {}

impl std::hash::Hash for ServiceType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        i32::from(*self).hash(state)
    }
}

impl PartialOrd for ServiceType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ServiceType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        i32::from(*self).cmp(&i32::from(*other))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChainNodeInfo {
    pub node_name: String,
    pub node_type: NodeType,
    pub node_id: String,
    pub ini_config: String,
    pub micro_service: bool,
    /// Endpoint of each service run by the node.
    pub service_info: BTreeMap<ServiceType, String>,
}

impl ChainNodeInfo {
    pub fn new(node_name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            node_name: node_name.into(),
            node_type,
            ..Default::default()
        }
    }

    pub fn append_service_info(
        &mut self,
        service_type: ServiceType,
        endpoint: impl Into<String>,
    ) {
        self.service_info.insert(service_type, endpoint.into());
    }

    pub fn service_endpoint(&self, service_type: ServiceType) -> Option<&str> {
        self.service_info.get(&service_type).map(String::as_str)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub chain_id: String,
    pub group_id: String,
    pub genesis_config: String,
    pub ini_config: String,
    /// Nodes of the group, keyed by node name.
    pub node_infos: BTreeMap<String, ChainNodeInfo>,
}

impl GroupInfo {
    pub fn new(
        chain_id: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    /// Adds `node`, replacing any node registered under the same name.
    pub fn append_node_info(&mut self, node: ChainNodeInfo) {
        self.node_infos.insert(node.node_name.clone(), node);
    }

    pub fn node_info(&self, node_name: &str) -> Option<&ChainNodeInfo> {
        self.node_infos.get(node_name)
    }

    pub fn remove_node_info(
        &mut self,
        node_name: &str,
    ) -> Option<ChainNodeInfo> {
        self.node_infos.remove(node_name)
    }
}
