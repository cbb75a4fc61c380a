// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod block;
mod config;
mod header;
mod metadata;
mod receipt;
mod submit_result;
mod transaction;

pub use block::{Block, BlockType};
pub use config::{
    BytesKeyFactory, ConsensusNode, KeyFactory, LedgerConfig, NodeKey,
    PublicKeyBytes,
};
pub use header::BlockHeader;
pub use metadata::TransactionMetaData;
pub use receipt::TransactionReceipt;
pub use submit_result::{
    TransactionSubmitResult, TransactionSubmitResultFactory,
};
pub use transaction::Transaction;

use std::io;
use std::str::FromStr;

use num_bigint::BigUint;
use sha3::Digest;

use crate::{wire, ConversionError, ProtocolError};

pub type Hash = [u8; 32];
pub type BlockNumber = i64;
pub type Nonce = BigUint;

/// Hash returned for unset hash fields.
pub const EMPTY_HASH: Hash = [0u8; 32];

/// Reinterprets raw wire bytes as a [`Hash`].
///
/// Inputs shorter than a hash (including the unset, empty field) yield
/// [`EMPTY_HASH`]; longer inputs are truncated to the hash size.
pub fn to_hash(bytes: &[u8]) -> Hash {
    bytes
        .get(..EMPTY_HASH.len())
        .and_then(|b| b.try_into().ok())
        .unwrap_or(EMPTY_HASH)
}

/// Parses a decimal wire field. The empty string stands for zero.
pub(crate) fn parse_decimal(
    field: &'static str,
    value: &str,
) -> Result<BigUint, ConversionError> {
    if value.is_empty() {
        return Ok(BigUint::default());
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::InvalidDecimal {
            field,
            value: value.to_owned(),
        });
    }
    BigUint::from_str(value).map_err(|_| ConversionError::InvalidDecimal {
        field,
        value: value.to_owned(),
    })
}

/// Hash function applied to hash-only encodings.
pub trait Hasher {
    fn hash(&self, data: &[u8]) -> Hash;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha3Hasher;

impl Hasher for Sha3Hasher {
    fn hash(&self, data: &[u8]) -> Hash {
        sha3::Sha3_256::digest(data).into()
    }
}

/// Common surface of every encodable ledger object.
///
/// Objects declare which wire fields their hash-only encoding leaves out, and
/// expose their concrete type through explicit capability methods instead of
/// runtime downcasts.
pub trait ProtocolObject {
    /// Name of the concrete object kind, used in type mismatch errors.
    fn kind(&self) -> &'static str;

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError>;

    fn encode(&self) -> Result<Vec<u8>, ProtocolError>;

    /// Wire fields excluded from the hash-only encoding.
    fn hash_excluded_fields(&self) -> &'static [&'static str] {
        &[]
    }

    fn into_block_header(
        self: Box<Self>,
    ) -> Result<BlockHeader, ProtocolError> {
        Err(ProtocolError::TypeMismatch {
            expected: "BlockHeader",
            found: self.kind(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentInfo {
    pub block_number: BlockNumber,
    pub block_hash: Hash,
}

impl From<&wire::ParentInfo> for ParentInfo {
    fn from(value: &wire::ParentInfo) -> Self {
        Self {
            block_number: value.block_number,
            block_hash: to_hash(&value.block_hash),
        }
    }
}

impl From<&ParentInfo> for wire::ParentInfo {
    fn from(value: &ParentInfo) -> Self {
        Self {
            block_number: value.block_number,
            block_hash: value.block_hash.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub index: i64,
    pub signature: Vec<u8>,
}

impl From<&wire::Signature> for Signature {
    fn from(value: &wire::Signature) -> Self {
        Self {
            index: value.sealer_index,
            signature: value.signature.clone(),
        }
    }
}

impl From<&Signature> for wire::Signature {
    fn from(value: &Signature) -> Self {
        Self {
            sealer_index: value.index,
            signature: value.signature.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEntry {
    address: Vec<u8>,
    topics: Vec<Hash>,
    data: Vec<u8>,
}

impl LogEntry {
    pub fn new(address: Vec<u8>, topics: Vec<Hash>, data: Vec<u8>) -> Self {
        Self {
            address,
            topics,
            data,
        }
    }

    pub fn address(&self) -> &[u8] {
        &self.address
    }

    pub fn topics(&self) -> &[Hash] {
        &self.topics
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&wire::LogEntry> for LogEntry {
    type Error = ProtocolError;

    /// Fails on any topic that is not exactly a hash long.
    fn try_from(value: &wire::LogEntry) -> Result<Self, Self::Error> {
        let topics = value
            .topic
            .iter()
            .map(|topic| {
                Hash::try_from(topic.as_slice()).map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("log topic of {} bytes", topic.len()),
                    )
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            address: value.address.clone(),
            topics,
            data: value.data.clone(),
        })
    }
}

impl From<&LogEntry> for wire::LogEntry {
    fn from(value: &LogEntry) -> Self {
        Self {
            address: value.address.clone(),
            topic: value.topics.iter().map(|t| t.to_vec()).collect(),
            data: value.data.clone(),
        }
    }
}
