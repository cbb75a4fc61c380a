// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Schema records exchanged on the wire.
//!
//! Each record mirrors its domain counterpart field for field. Hashes and
//! identities are kept as raw bytes and arbitrary-precision integers as
//! decimal strings; the adapters in [`crate::ledger`] materialize the typed
//! values. Field order here is the schema order used by
//! [`crate::encoding`].

use std::collections::BTreeMap;

#[cfg(any(feature = "faker", test))]
use fake::Dummy;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct ParentInfo {
    pub block_number: i64,
    pub block_hash: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct Signature {
    pub sealer_index: i64,
    pub signature: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct BlockHeader {
    pub version: i32,
    pub parent_info: Vec<ParentInfo>,
    pub txs_root: Vec<u8>,
    pub receipt_root: Vec<u8>,
    pub state_root: Vec<u8>,
    pub block_number: i64,
    pub gas_used: String,
    pub timestamp: i64,
    pub sealer: i64,
    pub sealer_list: Vec<Vec<u8>>,
    pub extra_data: Vec<u8>,
    pub consensus_weights: Vec<i64>,

    // Non-hashable fields
    pub signature_list: Vec<Signature>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct TransactionData {
    pub version: i32,
    pub chain_id: String,
    pub group_id: String,
    pub block_limit: i64,
    pub nonce: String,
    pub to: String,
    pub input: Vec<u8>,
    pub abi: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct Transaction {
    pub data: TransactionData,
    pub data_hash: Vec<u8>,
    pub signature: Vec<u8>,
    pub import_time: i64,
    pub attribute: i32,
    pub source: String,
    pub sender: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct LogEntry {
    pub address: Vec<u8>,
    pub topic: Vec<Vec<u8>>,
    pub data: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct TransactionReceipt {
    pub version: i32,
    pub gas_used: String,
    pub contract_address: String,
    pub status: i32,
    pub output: Vec<u8>,
    pub log_entries: Vec<LogEntry>,
    pub block_number: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct TransactionMetaData {
    pub hash: Vec<u8>,
    pub to: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct Block {
    pub block_type: i32,
    pub block_header: BlockHeader,
    pub transactions: Vec<Transaction>,
    pub receipts: Vec<TransactionReceipt>,
    pub transactions_meta_data: Vec<TransactionMetaData>,
    pub nonce_list: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct TransactionSubmitResult {
    pub tx_hash: Vec<u8>,
    pub block_hash: Vec<u8>,
    pub status: i32,
    pub transaction_index: i64,
    pub nonce: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct ConsensusNode {
    pub node_id: Vec<u8>,
    pub weight: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct LedgerConfig {
    pub consensus_node_list: Vec<ConsensusNode>,
    pub observer_node_list: Vec<ConsensusNode>,
    pub hash: Vec<u8>,
    pub block_number: i64,
    pub block_tx_count_limit: i64,
    pub leader_switch_period: i64,
    pub sealer_id: i64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct ChainNodeInfo {
    pub node_name: String,
    pub node_type: i32,
    pub service_info: BTreeMap<i32, String>,
    pub node_id: String,
    pub ini_config: String,
    pub micro_service: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct GroupInfo {
    pub chain_id: String,
    pub group_id: String,
    pub genesis_config: String,
    pub ini_config: String,
    pub node_list: Vec<ChainNodeInfo>,
}

/// Error record carried by every service response. A zero code is success.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(any(feature = "faker", test), derive(Dummy))]
pub struct Error {
    pub error_code: i32,
    pub error_message: String,
}

impl Error {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn new(error_code: i32, error_message: impl Into<String>) -> Self {
        Self {
            error_code,
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}
