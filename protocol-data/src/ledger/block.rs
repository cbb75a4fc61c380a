// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::mem;

use once_cell::unsync::OnceCell;
use tracing::debug;

use super::*;
use crate::encoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    CompleteBlock,
    WithTransactionsHash,
    Other(i32),
}

impl From<i32> for BlockType {
    fn from(value: i32) -> Self {
        match value {
            1 => BlockType::CompleteBlock,
            2 => BlockType::WithTransactionsHash,
            other => BlockType::Other(other),
        }
    }
}

impl From<BlockType> for i32 {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::CompleteBlock => 1,
            BlockType::WithTransactionsHash => 2,
            BlockType::Other(other) => other,
        }
    }
}

/// Block adapter.
///
/// The header is held as its own adapter; the header slot of the backing
/// record stays empty and is filled in at encode time. Transactions, receipts
/// and metadata are exposed as views borrowing this block.
#[derive(Debug, Default, Clone)]
pub struct Block {
    inner: wire::Block,
    header: BlockHeader,
    nonce_list: OnceCell<Vec<Nonce>>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.header == other.header
    }
}

impl Eq for Block {}

impl From<wire::Block> for Block {
    fn from(mut inner: wire::Block) -> Self {
        let header = BlockHeader::from(mem::take(&mut inner.block_header));
        Self {
            inner,
            header,
            nonce_list: OnceCell::new(),
        }
    }
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> wire::Block {
        let mut inner = self.inner;
        inner.block_header = self.header.into_inner();
        inner
    }

    /// Replaces the block with the one encoded in `data`.
    ///
    /// Hash calculation and signature checks are left to the callers owning
    /// the crypto suite; both flags are accepted and ignored here.
    pub fn decode(
        &mut self,
        data: &[u8],
        calculate_hash: bool,
        check_sig: bool,
    ) -> Result<(), ProtocolError> {
        if calculate_hash || check_sig {
            debug!(event = "decode flags ignored", calculate_hash, check_sig);
        }

        let inner: wire::Block = encoding::from_slice(data)?;
        *self = Self::from(inner);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = vec![];
        self.inner.write_with_header(&mut buf, self.header.inner())?;
        Ok(buf)
    }

    pub fn version(&self) -> i32 {
        self.header.version()
    }

    pub fn set_version(&mut self, version: i32) {
        self.header.set_version(version);
    }

    pub fn block_type(&self) -> BlockType {
        self.inner.block_type.into()
    }

    pub fn set_block_type(&mut self, block_type: BlockType) {
        self.inner.block_type = block_type.into();
    }

    pub fn block_header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn block_header_mut(&mut self) -> &mut BlockHeader {
        &mut self.header
    }

    pub fn set_block_header(&mut self, header: BlockHeader) {
        self.header = header;
    }

    /// Sets the header from a type-erased protocol object.
    pub fn set_block_header_object(
        &mut self,
        header: Box<dyn ProtocolObject + '_>,
    ) -> Result<(), ProtocolError> {
        self.header = header.into_block_header()?;
        Ok(())
    }

    pub fn transaction(&self, index: usize) -> Option<Transaction<'_>> {
        self.inner.transactions.get(index).map(Transaction::view)
    }

    pub fn set_transaction(
        &mut self,
        index: usize,
        tx: Transaction<'_>,
    ) -> Result<(), ProtocolError> {
        let len = self.inner.transactions.len();
        let slot = self
            .inner
            .transactions
            .get_mut(index)
            .ok_or(ProtocolError::IndexOutOfRange { index, len })?;
        *slot = tx.into_inner();
        Ok(())
    }

    pub fn append_transaction(&mut self, tx: Transaction<'_>) {
        self.inner.transactions.push(tx.into_inner());
    }

    pub fn transactions_size(&self) -> usize {
        self.inner.transactions.len()
    }

    pub fn receipt(&self, index: usize) -> Option<TransactionReceipt<'_>> {
        self.inner.receipts.get(index).map(TransactionReceipt::view)
    }

    /// Stores `receipt` at `index`.
    ///
    /// Receipts are index-aligned with transactions: an index past the
    /// current receipts first grows them to the transaction count, gaps
    /// holding default receipts. An index past the transactions fails.
    pub fn set_receipt(
        &mut self,
        index: usize,
        receipt: TransactionReceipt<'_>,
    ) -> Result<(), ProtocolError> {
        let tx_len = self.inner.transactions.len();
        let receipts = &mut self.inner.receipts;
        if index >= receipts.len() && receipts.len() < tx_len {
            debug!(
                event = "receipts resized",
                from = receipts.len(),
                to = tx_len
            );
            receipts.resize_with(tx_len, Default::default);
        }

        let len = receipts.len();
        let slot = receipts
            .get_mut(index)
            .ok_or(ProtocolError::IndexOutOfRange { index, len })?;
        *slot = receipt.into_inner();
        Ok(())
    }

    pub fn append_receipt(&mut self, receipt: TransactionReceipt<'_>) {
        self.inner.receipts.push(receipt.into_inner());
    }

    pub fn receipts_size(&self) -> usize {
        self.inner.receipts.len()
    }

    pub fn transaction_meta_data(
        &self,
        index: usize,
    ) -> Option<TransactionMetaData<'_>> {
        self.inner
            .transactions_meta_data
            .get(index)
            .map(TransactionMetaData::view)
    }

    pub fn append_transaction_meta_data(
        &mut self,
        meta_data: TransactionMetaData<'_>,
    ) {
        self.inner.transactions_meta_data.push(meta_data.into_inner());
    }

    pub fn transactions_meta_data_size(&self) -> usize {
        self.inner.transactions_meta_data.len()
    }

    /// Nonces of the block, parsed on first access. Unset entries read as
    /// zero.
    pub fn nonce_list(&self) -> Result<&[Nonce], ConversionError> {
        self.nonce_list
            .get_or_try_init(|| {
                self.inner
                    .nonce_list
                    .iter()
                    .map(|nonce| parse_decimal("nonceList", nonce))
                    .collect()
            })
            .map(Vec::as_slice)
    }

    pub fn set_nonce_list(&mut self, nonces: &[Nonce]) {
        self.inner.nonce_list = nonces.iter().map(Nonce::to_string).collect();
        self.nonce_list = OnceCell::new();
    }
}

impl ProtocolObject for Block {
    fn kind(&self) -> &'static str {
        "Block"
    }

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        Block::decode(self, data, false, false)
    }

    fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Block::encode(self)
    }
}
