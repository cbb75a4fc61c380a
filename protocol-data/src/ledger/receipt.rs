// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;

use num_bigint::BigUint;
use once_cell::unsync::OnceCell;

use super::*;
use crate::encoding;

/// Transaction receipt adapter.
///
/// Log entries live on the domain side once materialized: encoding rebuilds
/// the wire log list from them, so [`TransactionReceipt::set_log_entries`]
/// only reaches the record at [`TransactionReceipt::encode`] or
/// [`TransactionReceipt::into_inner`]. Every log topic must be exactly a
/// [`Hash`] long; decode rejects anything else.
#[derive(Debug, Clone)]
pub struct TransactionReceipt<'a> {
    inner: Cow<'a, wire::TransactionReceipt>,
    gas_used: OnceCell<BigUint>,
    log_entries: OnceCell<Vec<LogEntry>>,
}

impl Default for TransactionReceipt<'_> {
    fn default() -> Self {
        Self::from(wire::TransactionReceipt::default())
    }
}

impl PartialEq for TransactionReceipt<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.version == other.inner.version
            && self.inner.gas_used == other.inner.gas_used
            && self.inner.contract_address == other.inner.contract_address
            && self.inner.status == other.inner.status
            && self.inner.output == other.inner.output
            && self.inner.block_number == other.inner.block_number
            && self.wire_log_entries() == other.wire_log_entries()
    }
}

impl Eq for TransactionReceipt<'_> {}

impl From<wire::TransactionReceipt> for TransactionReceipt<'_> {
    fn from(inner: wire::TransactionReceipt) -> Self {
        Self {
            inner: Cow::Owned(inner),
            gas_used: OnceCell::new(),
            log_entries: OnceCell::new(),
        }
    }
}

impl<'a> TransactionReceipt<'a> {
    pub(crate) fn view(inner: &'a wire::TransactionReceipt) -> Self {
        Self {
            inner: Cow::Borrowed(inner),
            gas_used: OnceCell::new(),
            log_entries: OnceCell::new(),
        }
    }

    /// Record with the domain-side log entries written back.
    pub fn into_inner(self) -> wire::TransactionReceipt {
        let mut inner = self.inner.into_owned();
        if let Some(logs) = self.log_entries.into_inner() {
            inner.log_entries = logs.iter().map(Into::into).collect();
        }
        inner
    }

    pub fn into_owned(self) -> TransactionReceipt<'static> {
        TransactionReceipt {
            inner: Cow::Owned(self.inner.into_owned()),
            gas_used: self.gas_used,
            log_entries: self.log_entries,
        }
    }

    /// Replaces the receipt with the one encoded in `data`, rebuilding the
    /// log entries.
    ///
    /// On failure, including a log topic of the wrong size, the receipt is
    /// left untouched.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        let inner: wire::TransactionReceipt = encoding::from_slice(data)?;
        let logs = inner
            .log_entries
            .iter()
            .map(LogEntry::try_from)
            .collect::<Result<_, _>>()?;

        self.inner = Cow::Owned(inner);
        self.gas_used = OnceCell::new();
        self.log_entries = OnceCell::with_value(logs);
        Ok(())
    }

    /// Encodes the receipt.
    ///
    /// Receipts carry no signature data, so the hash-only encoding is the
    /// full encoding.
    pub fn encode(
        &self,
        _only_hash_fields_data: bool,
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = vec![];
        self.inner
            .write_with_logs(&mut buf, &self.wire_log_entries())?;
        Ok(buf)
    }

    /// Wire form of the log entries as they would be encoded.
    fn wire_log_entries(&self) -> Cow<'_, [wire::LogEntry]> {
        match self.log_entries.get() {
            Some(logs) => Cow::Owned(logs.iter().map(Into::into).collect()),
            None => Cow::Borrowed(&self.inner.log_entries),
        }
    }

    pub fn hash(&self, hasher: &impl Hasher) -> Result<Hash, ProtocolError> {
        Ok(hasher.hash(&self.encode(true)?))
    }

    pub fn version(&self) -> i32 {
        self.inner.version
    }

    pub fn set_version(&mut self, version: i32) {
        self.inner.to_mut().version = version;
    }

    pub fn gas_used(&self) -> Result<&BigUint, ConversionError> {
        self.gas_used
            .get_or_try_init(|| parse_decimal("gasUsed", &self.inner.gas_used))
    }

    pub fn set_gas_used(&mut self, gas_used: BigUint) {
        self.inner.to_mut().gas_used = gas_used.to_string();
        self.gas_used = OnceCell::with_value(gas_used);
    }

    pub fn contract_address(&self) -> &str {
        &self.inner.contract_address
    }

    pub fn set_contract_address(&mut self, address: impl Into<String>) {
        self.inner.to_mut().contract_address = address.into();
    }

    pub fn status(&self) -> i32 {
        self.inner.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.inner.to_mut().status = status;
    }

    pub fn output(&self) -> &[u8] {
        &self.inner.output
    }

    pub fn set_output(&mut self, output: Vec<u8>) {
        self.inner.to_mut().output = output;
    }

    pub fn block_number(&self) -> BlockNumber {
        self.inner.block_number
    }

    pub fn set_block_number(&mut self, number: BlockNumber) {
        self.inner.to_mut().block_number = number;
    }

    /// Log entries, built from the wire list on first access.
    pub fn log_entries(&self) -> Result<&[LogEntry], ProtocolError> {
        self.log_entries
            .get_or_try_init(|| {
                self.inner.log_entries.iter().map(LogEntry::try_from).collect()
            })
            .map(Vec::as_slice)
    }

    pub fn set_log_entries(&mut self, log_entries: Vec<LogEntry>) {
        self.log_entries = OnceCell::with_value(log_entries);
    }
}

impl ProtocolObject for TransactionReceipt<'_> {
    fn kind(&self) -> &'static str {
        "TransactionReceipt"
    }

    fn decode(&mut self, data: &[u8]) -> Result<(), ProtocolError> {
        TransactionReceipt::decode(self, data)
    }

    fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        TransactionReceipt::encode(self, false)
    }
}
