// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;

use once_cell::unsync::OnceCell;

use super::*;
use crate::encoding;

/// Transaction adapter, either owning its record or viewing one held by a
/// [`Block`].
#[derive(Debug, Clone)]
pub struct Transaction<'a> {
    inner: Cow<'a, wire::Transaction>,
    nonce: OnceCell<Nonce>,
}

impl Default for Transaction<'_> {
    fn default() -> Self {
        Self::from(wire::Transaction::default())
    }
}

impl PartialEq for Transaction<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Transaction<'_> {}

impl From<wire::Transaction> for Transaction<'_> {
    fn from(inner: wire::Transaction) -> Self {
        Self {
            inner: Cow::Owned(inner),
            nonce: OnceCell::new(),
        }
    }
}

impl<'a> Transaction<'a> {
    pub(crate) fn view(inner: &'a wire::Transaction) -> Self {
        Self {
            inner: Cow::Borrowed(inner),
            nonce: OnceCell::new(),
        }
    }

    pub fn inner(&self) -> &wire::Transaction {
        &self.inner
    }

    pub fn into_inner(self) -> wire::Transaction {
        self.inner.into_owned()
    }

    /// Detaches a view from its parent block.
    pub fn into_owned(self) -> Transaction<'static> {
        Transaction {
            inner: Cow::Owned(self.inner.into_owned()),
            nonce: self.nonce,
        }
    }

    /// Replaces the record with the one encoded in `data`.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        let inner: wire::Transaction = encoding::from_slice(data)?;
        self.inner = Cow::Owned(inner);
        self.nonce = OnceCell::new();
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(encoding::to_vec(self.inner.as_ref())?)
    }

    /// Hash over the transaction data, excluding signature and metadata.
    pub fn hash(&self, hasher: &impl Hasher) -> Result<Hash, ProtocolError> {
        let data = encoding::to_vec(&self.inner.data)?;
        Ok(hasher.hash(&data))
    }

    pub fn version(&self) -> i32 {
        self.inner.data.version
    }

    pub fn chain_id(&self) -> &str {
        &self.inner.data.chain_id
    }

    pub fn group_id(&self) -> &str {
        &self.inner.data.group_id
    }

    pub fn block_limit(&self) -> i64 {
        self.inner.data.block_limit
    }

    pub fn nonce(&self) -> Result<&Nonce, ConversionError> {
        self.nonce
            .get_or_try_init(|| parse_decimal("nonce", &self.inner.data.nonce))
    }

    pub fn set_nonce(&mut self, nonce: Nonce) {
        self.inner.to_mut().data.nonce = nonce.to_string();
        self.nonce = OnceCell::with_value(nonce);
    }

    pub fn to(&self) -> &str {
        &self.inner.data.to
    }

    pub fn input(&self) -> &[u8] {
        &self.inner.data.input
    }

    pub fn abi(&self) -> &str {
        &self.inner.data.abi
    }

    pub fn data_hash(&self) -> Hash {
        to_hash(&self.inner.data_hash)
    }

    pub fn set_data_hash(&mut self, hash: Hash) {
        self.inner.to_mut().data_hash = hash.to_vec();
    }

    pub fn signature(&self) -> &[u8] {
        &self.inner.signature
    }

    pub fn set_signature(&mut self, signature: Vec<u8>) {
        self.inner.to_mut().signature = signature;
    }

    pub fn import_time(&self) -> i64 {
        self.inner.import_time
    }

    pub fn set_import_time(&mut self, import_time: i64) {
        self.inner.to_mut().import_time = import_time;
    }

    pub fn attribute(&self) -> i32 {
        self.inner.attribute
    }

    pub fn set_attribute(&mut self, attribute: i32) {
        self.inner.to_mut().attribute = attribute;
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub fn sender(&self) -> &[u8] {
        &self.inner.sender
    }

    pub fn set_sender(&mut self, sender: Vec<u8>) {
        self.inner.to_mut().sender = sender;
    }
}

impl ProtocolObject for Transaction<'_> {
    fn kind(&self) -> &'static str {
        "Transaction"
    }

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        Transaction::decode(self, data)
    }

    fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Transaction::encode(self)
    }
}

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};
    use num_bigint::BigUint;

    use super::*;

    #[test]
    fn test_view_writes_are_copy_on_write() {
        let record: wire::Transaction = Faker.fake();

        let mut view = Transaction::view(&record);
        view.set_import_time(record.import_time.wrapping_add(1));

        assert_ne!(view.import_time(), record.import_time);
        assert_eq!(view.signature(), record.signature.as_slice());
    }

    #[test]
    fn test_nonce() {
        let mut tx = Transaction::default();
        assert_eq!(tx.nonce().unwrap(), &BigUint::default());

        let nonce = BigUint::from(u128::MAX) * 7u32;
        tx.set_nonce(nonce.clone());
        assert_eq!(tx.nonce().unwrap(), &nonce);
        assert_eq!(tx.inner().data.nonce, nonce.to_string());

        let mut record = wire::Transaction::default();
        record.data.nonce = "0x10".into();
        assert!(Transaction::from(record).nonce().is_err());
    }

    #[test]
    fn test_hash_covers_data_only() {
        let mut tx = Transaction::from(Faker.fake::<wire::Transaction>());
        let before = tx.hash(&Sha3Hasher).unwrap();

        tx.set_signature(vec![9; 65]);
        tx.set_import_time(tx.import_time().wrapping_add(1));
        assert_eq!(tx.hash(&Sha3Hasher).unwrap(), before);

        tx.set_nonce(BigUint::from(77u32));
        assert_ne!(tx.hash(&Sha3Hasher).unwrap(), before);
    }

    #[test]
    fn test_decode() {
        let tx = Transaction::from(Faker.fake::<wire::Transaction>());
        let encoded = tx.encode().unwrap();

        let mut decoded = Transaction::default();
        decoded.decode(&encoded).unwrap();
        assert_eq!(decoded, tx);

        assert!(decoded.decode(&encoded[1..]).is_err());
        assert_eq!(decoded, tx);
    }
}
