// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Mapping between wire records and the group and ledger aggregates.

use crate::group::{ChainNodeInfo, GroupInfo};
use crate::ledger::{to_hash, ConsensusNode, KeyFactory, LedgerConfig, NodeKey};
use crate::wire;

pub fn to_chain_node_info(node: &wire::ChainNodeInfo) -> ChainNodeInfo {
    ChainNodeInfo {
        node_name: node.node_name.clone(),
        node_type: node.node_type.into(),
        node_id: node.node_id.clone(),
        ini_config: node.ini_config.clone(),
        micro_service: node.micro_service,
        service_info: node
            .service_info
            .iter()
            .map(|(service, endpoint)| ((*service).into(), endpoint.clone()))
            .collect(),
    }
}

/// Wire form of `node`; a missing node maps to the default record.
pub fn to_wire_chain_node_info(
    node: Option<&ChainNodeInfo>,
) -> wire::ChainNodeInfo {
    let Some(node) = node else {
        return wire::ChainNodeInfo::default();
    };

    wire::ChainNodeInfo {
        node_name: node.node_name.clone(),
        node_type: node.node_type.into(),
        service_info: node
            .service_info
            .iter()
            .map(|(service, endpoint)| ((*service).into(), endpoint.clone()))
            .collect(),
        node_id: node.node_id.clone(),
        ini_config: node.ini_config.clone(),
        micro_service: node.micro_service,
    }
}

pub fn to_group_info(group: &wire::GroupInfo) -> GroupInfo {
    let mut info = GroupInfo {
        chain_id: group.chain_id.clone(),
        group_id: group.group_id.clone(),
        genesis_config: group.genesis_config.clone(),
        ini_config: group.ini_config.clone(),
        ..Default::default()
    };
    for node in &group.node_list {
        info.append_node_info(to_chain_node_info(node));
    }
    info
}

/// Wire form of `group`, listing nodes by name; a missing group maps to the
/// default record.
pub fn to_wire_group_info(group: Option<&GroupInfo>) -> wire::GroupInfo {
    let Some(group) = group else {
        return wire::GroupInfo::default();
    };

    wire::GroupInfo {
        chain_id: group.chain_id.clone(),
        group_id: group.group_id.clone(),
        genesis_config: group.genesis_config.clone(),
        ini_config: group.ini_config.clone(),
        node_list: group
            .node_infos
            .values()
            .map(|node| to_wire_chain_node_info(Some(node)))
            .collect(),
    }
}

pub fn to_consensus_node_list<F: KeyFactory>(
    key_factory: &F,
    nodes: &[wire::ConsensusNode],
) -> Vec<ConsensusNode<F::Key>> {
    nodes
        .iter()
        .map(|node| {
            let node_id = key_factory.create_key(&node.node_id);
            ConsensusNode::new(node_id, node.weight)
        })
        .collect()
}

pub fn to_wire_consensus_node_list<K: NodeKey>(
    nodes: &[ConsensusNode<K>],
) -> Vec<wire::ConsensusNode> {
    nodes
        .iter()
        .map(|node| wire::ConsensusNode {
            node_id: node.node_id.encode(),
            weight: node.weight,
        })
        .collect()
}

pub fn to_ledger_config<F: KeyFactory>(
    config: &wire::LedgerConfig,
    key_factory: &F,
) -> LedgerConfig<F::Key> {
    LedgerConfig {
        consensus_node_list: to_consensus_node_list(
            key_factory,
            &config.consensus_node_list,
        ),
        observer_node_list: to_consensus_node_list(
            key_factory,
            &config.observer_node_list,
        ),
        hash: to_hash(&config.hash),
        block_number: config.block_number,
        block_tx_count_limit: config.block_tx_count_limit,
        leader_switch_period: config.leader_switch_period,
        sealer_id: config.sealer_id,
    }
}

pub fn to_wire_ledger_config<K: NodeKey>(
    config: &LedgerConfig<K>,
) -> wire::LedgerConfig {
    wire::LedgerConfig {
        consensus_node_list: to_wire_consensus_node_list(
            &config.consensus_node_list,
        ),
        observer_node_list: to_wire_consensus_node_list(
            &config.observer_node_list,
        ),
        hash: config.hash.to_vec(),
        block_number: config.block_number,
        block_tx_count_limit: config.block_tx_count_limit,
        leader_switch_period: config.leader_switch_period,
        sealer_id: config.sealer_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{NodeType, ServiceType};
    use crate::ledger::{BytesKeyFactory, PublicKeyBytes, EMPTY_HASH};

    fn group0() -> GroupInfo {
        let mut group = GroupInfo::new("chain0", "group0");
        group.genesis_config = "[consensus]\nleader_period=1".into();

        let mut node0 = ChainNodeInfo::new("node0", NodeType::Consensus);
        node0.node_id = "a1b2".into();
        node0.micro_service = true;
        node0.append_service_info(ServiceType::Rpc, "127.0.0.1:20200");
        group.append_node_info(node0);

        let node1 = ChainNodeInfo::new("node1", NodeType::Observer);
        group.append_node_info(node1);

        group
    }

    #[test]
    fn test_group_info_round_trip() {
        let group = group0();
        let record = to_wire_group_info(Some(&group));

        assert_eq!(record.chain_id, "chain0");
        assert_eq!(record.node_list.len(), 2);
        assert_eq!(record.node_list[0].node_name, "node0");
        assert_eq!(record.node_list[0].service_info[&8], "127.0.0.1:20200");
        assert_eq!(record.node_list[1].node_type, 2);

        assert_eq!(to_group_info(&record), group);
    }

    #[test]
    fn test_unknown_node_and_service_types_survive() {
        let record = wire::ChainNodeInfo {
            node_name: "node7".into(),
            node_type: 77,
            service_info: [(1000, "x".to_string())].into(),
            ..Default::default()
        };

        let node = to_chain_node_info(&record);
        assert_eq!(node.node_type, NodeType::Other(77));
        assert_eq!(node.service_endpoint(ServiceType::Other(1000)), Some("x"));
        assert_eq!(to_wire_chain_node_info(Some(&node)), record);
    }

    #[test]
    fn test_missing_input_maps_to_default() {
        assert_eq!(
            to_wire_chain_node_info(None),
            wire::ChainNodeInfo::default()
        );
        assert_eq!(to_wire_group_info(None), wire::GroupInfo::default());
    }

    #[test]
    fn test_ledger_config_round_trip() {
        let config = LedgerConfig {
            consensus_node_list: vec![
                ConsensusNode::new(PublicKeyBytes(vec![1; 64]), 1),
                ConsensusNode::new(PublicKeyBytes(vec![2; 64]), 3),
            ],
            observer_node_list: vec![ConsensusNode::new(
                PublicKeyBytes(vec![3; 64]),
                0,
            )],
            hash: [9; 32],
            block_number: 10,
            block_tx_count_limit: 1000,
            leader_switch_period: 2,
            sealer_id: 1,
        };

        let record = to_wire_ledger_config(&config);
        assert_eq!(record.consensus_node_list[1].node_id, vec![2; 64]);
        assert_eq!(record.consensus_node_list[1].weight, 3);
        assert_eq!(to_ledger_config(&record, &BytesKeyFactory), config);
    }

    #[test]
    fn test_ledger_config_short_hash() {
        let record = wire::LedgerConfig {
            hash: vec![1; 8],
            ..Default::default()
        };
        let config = to_ledger_config(&record, &BytesKeyFactory);
        assert_eq!(config.hash, EMPTY_HASH);
        assert!(config.consensus_node_list.is_empty());
    }
}
