// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use num_bigint::BigUint;
use once_cell::unsync::OnceCell;

use super::*;
use crate::encoding;

/// Block header adapter over a [`wire::BlockHeader`] record.
///
/// Parent info and gas used are materialized on first access and cached until
/// the backing field changes. After a successful [`BlockHeader::decode`] the
/// input bytes are retained and served by full encodes until the next
/// mutation.
#[derive(Default, Clone)]
pub struct BlockHeader {
    inner: wire::BlockHeader,
    buffer: Option<Vec<u8>>,
    parent_info: OnceCell<Vec<ParentInfo>>,
    gas_used: OnceCell<BigUint>,
}

impl PartialEq for BlockHeader {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for BlockHeader {}

impl From<wire::BlockHeader> for BlockHeader {
    fn from(inner: wire::BlockHeader) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }
}

impl BlockHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &wire::BlockHeader {
        &self.inner
    }

    pub fn into_inner(self) -> wire::BlockHeader {
        self.inner
    }

    /// Replaces the header with the record encoded in `data`.
    ///
    /// On failure the header is left untouched.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        let inner = encoding::from_slice(data)?;
        *self = Self {
            inner,
            buffer: Some(data.to_vec()),
            ..Default::default()
        };
        Ok(())
    }

    /// Encodes the header.
    ///
    /// With `only_hash_fields_data` set, the signature list is written as an
    /// empty sequence. The header itself is never modified.
    pub fn encode(
        &self,
        only_hash_fields_data: bool,
    ) -> Result<Vec<u8>, ProtocolError> {
        if only_hash_fields_data {
            let mut buf = vec![];
            self.inner.marshal_hashable(&mut buf)?;
            return Ok(buf);
        }

        if let Some(buffer) = &self.buffer {
            return Ok(buffer.clone());
        }
        Ok(encoding::to_vec(&self.inner)?)
    }

    /// Hash over the hash-only encoding.
    pub fn hash(&self, hasher: &impl Hasher) -> Result<Hash, ProtocolError> {
        Ok(hasher.hash(&self.encode(true)?))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn touch(&mut self) {
        self.buffer = None;
    }

    pub fn version(&self) -> i32 {
        self.inner.version
    }

    pub fn set_version(&mut self, version: i32) {
        self.inner.version = version;
        self.touch();
    }

    pub fn parent_info(&self) -> &[ParentInfo] {
        self.parent_info.get_or_init(|| {
            self.inner.parent_info.iter().map(Into::into).collect()
        })
    }

    pub fn set_parent_info(&mut self, parent_info: Vec<ParentInfo>) {
        self.inner.parent_info = parent_info.iter().map(Into::into).collect();
        self.parent_info = OnceCell::with_value(parent_info);
        self.touch();
    }

    pub fn txs_root(&self) -> Hash {
        to_hash(&self.inner.txs_root)
    }

    pub fn set_txs_root(&mut self, root: Hash) {
        self.inner.txs_root = root.to_vec();
        self.touch();
    }

    pub fn receipts_root(&self) -> Hash {
        to_hash(&self.inner.receipt_root)
    }

    pub fn set_receipts_root(&mut self, root: Hash) {
        self.inner.receipt_root = root.to_vec();
        self.touch();
    }

    pub fn state_root(&self) -> Hash {
        to_hash(&self.inner.state_root)
    }

    pub fn set_state_root(&mut self, root: Hash) {
        self.inner.state_root = root.to_vec();
        self.touch();
    }

    pub fn number(&self) -> BlockNumber {
        self.inner.block_number
    }

    pub fn set_number(&mut self, number: BlockNumber) {
        self.inner.block_number = number;
        self.touch();
    }

    /// Gas used, parsed from its decimal wire form on first access.
    pub fn gas_used(&self) -> Result<&BigUint, ConversionError> {
        self.gas_used
            .get_or_try_init(|| parse_decimal("gasUsed", &self.inner.gas_used))
    }

    pub fn set_gas_used(&mut self, gas_used: BigUint) {
        self.inner.gas_used = gas_used.to_string();
        self.gas_used = OnceCell::with_value(gas_used);
        self.touch();
    }

    pub fn timestamp(&self) -> i64 {
        self.inner.timestamp
    }

    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.inner.timestamp = timestamp;
        self.touch();
    }

    pub fn sealer(&self) -> i64 {
        self.inner.sealer
    }

    pub fn set_sealer(&mut self, sealer: i64) {
        self.inner.sealer = sealer;
        self.touch();
    }

    pub fn sealer_list(&self) -> &[Vec<u8>] {
        &self.inner.sealer_list
    }

    pub fn set_sealer_list(&mut self, sealer_list: Vec<Vec<u8>>) {
        self.inner.sealer_list = sealer_list;
        self.touch();
    }

    pub fn extra_data(&self) -> &[u8] {
        &self.inner.extra_data
    }

    pub fn set_extra_data(&mut self, extra_data: Vec<u8>) {
        self.inner.extra_data = extra_data;
        self.touch();
    }

    pub fn consensus_weights(&self) -> &[i64] {
        &self.inner.consensus_weights
    }

    pub fn set_consensus_weights(&mut self, weights: Vec<i64>) {
        self.inner.consensus_weights = weights;
        self.touch();
    }

    pub fn signature_list(&self) -> Vec<Signature> {
        self.inner.signature_list.iter().map(Into::into).collect()
    }

    /// Replaces the whole signature list.
    pub fn set_signature_list(&mut self, signatures: &[Signature]) {
        self.inner.signature_list =
            signatures.iter().map(Into::into).collect();
        self.touch();
    }
}

impl ProtocolObject for BlockHeader {
    fn kind(&self) -> &'static str {
        "BlockHeader"
    }

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        BlockHeader::decode(self, data)
    }

    fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        BlockHeader::encode(self, false)
    }

    fn hash_excluded_fields(&self) -> &'static [&'static str] {
        &["signatureList"]
    }

    fn into_block_header(
        self: Box<Self>,
    ) -> Result<BlockHeader, ProtocolError> {
        Ok(*self)
    }
}

impl std::fmt::Debug for BlockHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockHeader")
            .field("version", &self.inner.version)
            .field("number", &self.inner.block_number)
            .field("timestamp", &self.inner.timestamp)
            .field("gas_used", &self.inner.gas_used)
            .field("sealer", &self.inner.sealer)
            .field("tx_root", &hex::encode(self.txs_root()))
            .field("receipt_root", &hex::encode(self.receipts_root()))
            .field("state_root", &hex::encode(self.state_root()))
            .field("signatures", &self.inner.signature_list.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};

    use super::*;

    fn signed_header() -> BlockHeader {
        let mut header = BlockHeader::from(Faker.fake::<wire::BlockHeader>());
        header.set_gas_used(BigUint::from(21_000u32));
        header.set_signature_list(&[
            Signature {
                index: 0,
                signature: vec![1; 65],
            },
            Signature {
                index: 2,
                signature: vec![2; 65],
            },
        ]);
        header
    }

    #[test]
    fn test_hash_only_encoding_drops_signatures() {
        let header = signed_header();

        let hashable = header.encode(true).unwrap();
        let mut decoded = BlockHeader::new();
        decoded.decode(&hashable).unwrap();

        assert!(decoded.signature_list().is_empty());
        assert_eq!(header.signature_list().len(), 2);
        assert_eq!(decoded.number(), header.number());
        assert_eq!(decoded.extra_data(), header.extra_data());
    }

    #[test]
    fn test_hash_ignores_signatures() {
        let mut header = signed_header();
        let before = header.hash(&Sha3Hasher).unwrap();

        header.set_signature_list(&[]);
        assert_eq!(header.hash(&Sha3Hasher).unwrap(), before);

        header.set_number(header.number().wrapping_add(1));
        assert_ne!(header.hash(&Sha3Hasher).unwrap(), before);
    }

    #[test]
    fn test_decode_retains_buffer_until_mutation() {
        let header = signed_header();
        let encoded = header.encode(false).unwrap();

        let mut decoded = BlockHeader::new();
        decoded.decode(&encoded).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.encode(false).unwrap(), encoded);

        decoded.set_timestamp(decoded.timestamp().wrapping_add(1));
        let changed = decoded.encode(false).unwrap();
        assert_ne!(changed, encoded);

        let mut reread = BlockHeader::new();
        reread.decode(&changed).unwrap();
        assert_eq!(reread.timestamp(), decoded.timestamp());
    }

    #[test]
    fn test_decode_failure_keeps_header() {
        let mut header = signed_header();
        let before = header.clone();

        let mut encoded = header.encode(false).unwrap();
        encoded.truncate(encoded.len() / 2);

        assert!(matches!(
            header.decode(&encoded),
            Err(ProtocolError::Decode(_))
        ));
        assert_eq!(header, before);
        assert_eq!(header.gas_used().unwrap(), &BigUint::from(21_000u32));
    }

    #[test]
    fn test_parent_info_cache_follows_setter() {
        let mut header = BlockHeader::new();
        assert!(header.parent_info().is_empty());

        let parents = vec![ParentInfo {
            block_number: 9,
            block_hash: [4; 32],
        }];
        header.set_parent_info(parents.clone());
        assert_eq!(header.parent_info(), parents.as_slice());
        assert_eq!(header.inner().parent_info[0].block_hash, vec![4; 32]);
    }

    #[test]
    fn test_roots_default_to_empty_hash() {
        let mut header = BlockHeader::new();
        assert_eq!(header.txs_root(), EMPTY_HASH);
        assert_eq!(header.state_root(), EMPTY_HASH);
        assert_eq!(header.receipts_root(), EMPTY_HASH);

        header.set_state_root([5; 32]);
        assert_eq!(header.state_root(), [5; 32]);
    }

    #[test]
    fn test_gas_used_is_strict() {
        let mut wire = wire::BlockHeader::default();
        assert_eq!(
            BlockHeader::from(wire.clone()).gas_used().unwrap(),
            &BigUint::default()
        );

        wire.gas_used = "12x".into();
        assert!(matches!(
            BlockHeader::from(wire).gas_used(),
            Err(ConversionError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut header = signed_header();
        header.clear();
        assert_eq!(header, BlockHeader::new());
        assert_eq!(
            header.encode(false).unwrap(),
            BlockHeader::new().encode(false).unwrap()
        );
    }

    #[test]
    fn test_into_block_header() {
        let header = signed_header();
        let object: Box<dyn ProtocolObject> = Box::new(header.clone());
        assert_eq!(object.hash_excluded_fields(), &["signatureList"]);
        assert_eq!(object.into_block_header().unwrap(), header);
    }
}
