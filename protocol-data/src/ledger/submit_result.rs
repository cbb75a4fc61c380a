// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use once_cell::unsync::OnceCell;

use super::*;
use crate::encoding;

/// Outcome of a transaction submission as reported to clients.
#[derive(Debug, Default, Clone)]
pub struct TransactionSubmitResult {
    inner: wire::TransactionSubmitResult,
    nonce: OnceCell<Nonce>,
}

impl PartialEq for TransactionSubmitResult {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for TransactionSubmitResult {}

impl From<wire::TransactionSubmitResult> for TransactionSubmitResult {
    fn from(inner: wire::TransactionSubmitResult) -> Self {
        Self {
            inner,
            nonce: OnceCell::new(),
        }
    }
}

impl TransactionSubmitResult {
    pub fn inner(&self) -> &wire::TransactionSubmitResult {
        &self.inner
    }

    pub fn into_inner(self) -> wire::TransactionSubmitResult {
        self.inner
    }

    pub fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        let inner: wire::TransactionSubmitResult = encoding::from_slice(data)?;
        *self = Self::from(inner);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(encoding::to_vec(&self.inner)?)
    }

    pub fn status(&self) -> i32 {
        self.inner.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.inner.status = status;
    }

    /// Read straight from the raw field on every call. A [`Hash`] is a
    /// `Copy` array, so there is nothing worth caching.
    pub fn tx_hash(&self) -> Hash {
        to_hash(&self.inner.tx_hash)
    }

    pub fn set_tx_hash(&mut self, hash: Hash) {
        self.inner.tx_hash = hash.to_vec();
    }

    /// Read straight from the raw field, like [`Self::tx_hash`].
    pub fn block_hash(&self) -> Hash {
        to_hash(&self.inner.block_hash)
    }

    pub fn set_block_hash(&mut self, hash: Hash) {
        self.inner.block_hash = hash.to_vec();
    }

    pub fn transaction_index(&self) -> i64 {
        self.inner.transaction_index
    }

    pub fn set_transaction_index(&mut self, index: i64) {
        self.inner.transaction_index = index;
    }

    pub fn nonce(&self) -> Result<&Nonce, ConversionError> {
        self.nonce
            .get_or_try_init(|| parse_decimal("nonce", &self.inner.nonce))
    }

    pub fn set_nonce(&mut self, nonce: Nonce) {
        self.inner.nonce = nonce.to_string();
        self.nonce = OnceCell::with_value(nonce);
    }
}

impl ProtocolObject for TransactionSubmitResult {
    fn kind(&self) -> &'static str {
        "TransactionSubmitResult"
    }

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        TransactionSubmitResult::decode(self, data)
    }

    fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        TransactionSubmitResult::encode(self)
    }
}

/// Builds submit results, hashing block headers with `H`.
#[derive(Debug, Default, Clone)]
pub struct TransactionSubmitResultFactory<H: Hasher> {
    hasher: H,
}

impl<H: Hasher> TransactionSubmitResultFactory<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Result for a transaction sealed in the block described by `header`.
    pub fn create_from_header(
        &self,
        header: &BlockHeader,
        tx_hash: Hash,
    ) -> Result<TransactionSubmitResult, ProtocolError> {
        let mut result = TransactionSubmitResult::default();
        result.set_tx_hash(tx_hash);
        result.set_block_hash(header.hash(&self.hasher)?);
        Ok(result)
    }

    pub fn create_with_status(
        &self,
        tx_hash: Hash,
        status: i32,
    ) -> TransactionSubmitResult {
        let mut result = TransactionSubmitResult::default();
        result.set_tx_hash(tx_hash);
        result.set_status(status);
        result
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn test_hashes_follow_raw_fields() {
        let mut result = TransactionSubmitResult::default();
        result.set_tx_hash([0; 32]);
        result.set_block_hash([5; 32]);
        assert_eq!(result.tx_hash(), [0; 32]);
        assert_eq!(result.inner().tx_hash, vec![0; 32]);
        assert_eq!(result.block_hash(), [5; 32]);

        result.set_block_hash([6; 32]);
        assert_eq!(result.block_hash(), [6; 32]);

        let record = wire::TransactionSubmitResult {
            block_hash: vec![1; 8],
            ..Default::default()
        };
        let short = TransactionSubmitResult::from(record);
        assert_eq!(short.block_hash(), EMPTY_HASH);
    }

    #[test]
    fn test_unset_hashes_are_empty() {
        let result = TransactionSubmitResult::default();
        assert_eq!(result.tx_hash(), EMPTY_HASH);
        assert_eq!(result.block_hash(), EMPTY_HASH);
        assert_eq!(result.nonce().unwrap(), &BigUint::default());
    }

    #[test]
    fn test_nonce_is_strict() {
        let mut result = TransactionSubmitResult::from(
            wire::TransactionSubmitResult {
                nonce: "abc".into(),
                ..Default::default()
            },
        );
        assert!(result.nonce().is_err());

        result.set_nonce(BigUint::from(99u32));
        assert_eq!(result.nonce().unwrap(), &BigUint::from(99u32));
        assert_eq!(result.inner().nonce, "99");
    }

    #[test]
    fn test_factory() {
        let factory = TransactionSubmitResultFactory::new(Sha3Hasher);

        let mut header = BlockHeader::new();
        header.set_number(12);
        let result = factory.create_from_header(&header, [3; 32]).unwrap();
        assert_eq!(result.tx_hash(), [3; 32]);
        assert_eq!(result.block_hash(), header.hash(&Sha3Hasher).unwrap());
        assert_eq!(result.status(), 0);

        let result = factory.create_with_status([4; 32], 18);
        assert_eq!(result.tx_hash(), [4; 32]);
        assert_eq!(result.block_hash(), EMPTY_HASH);
        assert_eq!(result.status(), 18);
    }

    #[test]
    fn test_decode() {
        let mut result = TransactionSubmitResult::default();
        result.set_transaction_index(5);
        result.set_nonce(BigUint::from(1u32) << 200);
        let encoded = result.encode().unwrap();

        let mut decoded = TransactionSubmitResult::default();
        decoded.decode(&encoded).unwrap();
        assert_eq!(decoded, result);
        assert_eq!(decoded.nonce().unwrap(), &(BigUint::from(1u32) << 200));
    }
}
