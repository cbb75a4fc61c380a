// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::fmt;

use super::*;

/// Identity key of a node.
pub trait NodeKey: Clone + fmt::Debug + PartialEq + Eq {
    /// Raw key bytes as carried on the wire.
    fn encode(&self) -> Vec<u8>;

    fn hex(&self) -> String {
        hex::encode(self.encode())
    }
}

/// Builds node keys out of their wire bytes.
pub trait KeyFactory {
    type Key: NodeKey;

    fn create_key(&self, data: &[u8]) -> Self::Key;
}

/// Opaque public key kept as raw bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicKeyBytes(pub Vec<u8>);

impl PublicKeyBytes {
    pub fn inner(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKeyBytes")
            .field(&hex::encode(&self.0))
            .finish()
    }
}

impl NodeKey for PublicKeyBytes {
    fn encode(&self) -> Vec<u8> {
        self.0.clone()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BytesKeyFactory;

impl KeyFactory for BytesKeyFactory {
    type Key = PublicKeyBytes;

    fn create_key(&self, data: &[u8]) -> PublicKeyBytes {
        PublicKeyBytes(data.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusNode<K> {
    pub node_id: K,
    pub weight: i64,
}

impl<K: NodeKey> ConsensusNode<K> {
    pub fn new(node_id: K, weight: i64) -> Self {
        Self { node_id, weight }
    }
}

/// Ledger configuration in effect from `block_number` on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig<K> {
    pub consensus_node_list: Vec<ConsensusNode<K>>,
    pub observer_node_list: Vec<ConsensusNode<K>>,
    pub hash: Hash,
    pub block_number: BlockNumber,
    pub block_tx_count_limit: i64,
    pub leader_switch_period: i64,
    pub sealer_id: i64,
}

impl<K> Default for LedgerConfig<K> {
    fn default() -> Self {
        Self {
            consensus_node_list: vec![],
            observer_node_list: vec![],
            hash: EMPTY_HASH,
            block_number: 0,
            block_tx_count_limit: 0,
            leader_switch_period: 0,
            sealer_id: 0,
        }
    }
}
