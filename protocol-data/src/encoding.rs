// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use crate::wire::*;
use crate::Serializable;
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

/// Encodes a top-level record.
pub fn to_vec<S: Serializable>(obj: &S) -> io::Result<Vec<u8>> {
    let mut buf = vec![];
    obj.write(&mut buf)?;
    Ok(buf)
}

/// Decodes a top-level record, rejecting trailing bytes.
pub fn from_slice<S: Serializable>(data: &[u8]) -> io::Result<S> {
    let mut r = data;
    let obj = S::read(&mut r)?;
    if !r.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} trailing bytes", r.len()),
        ));
    }
    Ok(obj)
}

impl Serializable for ParentInfo {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_i64_field(w, 0, self.block_number)?;
        Self::write_bytes_field(w, 1, &self.block_hash)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        let block_number = Self::read_i64_field(r, 0)?;
        let block_hash = Self::read_bytes_field(r, 1)?;

        Ok(ParentInfo {
            block_number,
            block_hash,
        })
    }
}

impl Serializable for Signature {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_i64_field(w, 0, self.sealer_index)?;
        Self::write_bytes_field(w, 1, &self.signature)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        let sealer_index = Self::read_i64_field(r, 0)?;
        let signature = Self::read_bytes_field(r, 1)?;

        Ok(Signature {
            sealer_index,
            signature,
        })
    }
}

impl BlockHeader {
    /// Marshal hashable fields.
    ///
    /// The signature list is written as an empty sequence so the output is
    /// independent of the collected signatures. `self` is left untouched.
    pub(crate) fn marshal_hashable<W: Write>(
        &self,
        w: &mut W,
    ) -> io::Result<()> {
        self.write_with_signatures(w, &[])
    }

    fn write_with_signatures<W: Write>(
        &self,
        w: &mut W,
        signature_list: &[Signature],
    ) -> io::Result<()> {
        Self::write_i32_field(w, 0, self.version)?;
        Self::write_list_field(w, 1, &self.parent_info)?;
        Self::write_bytes_field(w, 2, &self.txs_root)?;
        Self::write_bytes_field(w, 3, &self.receipt_root)?;
        Self::write_bytes_field(w, 4, &self.state_root)?;
        Self::write_i64_field(w, 5, self.block_number)?;
        Self::write_string_field(w, 6, &self.gas_used)?;
        Self::write_i64_field(w, 7, self.timestamp)?;
        Self::write_i64_field(w, 8, self.sealer)?;
        Self::write_bytes_list_field(w, 9, &self.sealer_list)?;
        Self::write_bytes_field(w, 10, &self.extra_data)?;

        Self::write_len_field(w, 11, self.consensus_weights.len())?;
        for weight in &self.consensus_weights {
            w.write_all(&weight.to_le_bytes())?;
        }

        Self::write_list_field(w, 12, signature_list)?;

        Ok(())
    }
}

impl Serializable for BlockHeader {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_with_signatures(w, &self.signature_list)
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        let version = Self::read_i32_field(r, 0)?;
        let parent_info = Self::read_list_field(r, 1)?;
        let txs_root = Self::read_bytes_field(r, 2)?;
        let receipt_root = Self::read_bytes_field(r, 3)?;
        let state_root = Self::read_bytes_field(r, 4)?;
        let block_number = Self::read_i64_field(r, 5)?;
        let gas_used = Self::read_string_field(r, 6)?;
        let timestamp = Self::read_i64_field(r, 7)?;
        let sealer = Self::read_i64_field(r, 8)?;
        let sealer_list = Self::read_bytes_list_field(r, 9)?;
        let extra_data = Self::read_bytes_field(r, 10)?;

        let weights_len = Self::read_len_field(r, 11)?;
        let consensus_weights = (0..weights_len)
            .map(|_| Self::read_i64_le(r))
            .collect::<Result<Vec<_>, _>>()?;

        let signature_list = Self::read_list_field(r, 12)?;

        Ok(BlockHeader {
            version,
            parent_info,
            txs_root,
            receipt_root,
            state_root,
            block_number,
            gas_used,
            timestamp,
            sealer,
            sealer_list,
            extra_data,
            consensus_weights,
            signature_list,
        })
    }
}

impl Serializable for TransactionData {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_i32_field(w, 0, self.version)?;
        Self::write_string_field(w, 1, &self.chain_id)?;
        Self::write_string_field(w, 2, &self.group_id)?;
        Self::write_i64_field(w, 3, self.block_limit)?;
        Self::write_string_field(w, 4, &self.nonce)?;
        Self::write_string_field(w, 5, &self.to)?;
        Self::write_bytes_field(w, 6, &self.input)?;
        Self::write_string_field(w, 7, &self.abi)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(TransactionData {
            version: Self::read_i32_field(r, 0)?,
            chain_id: Self::read_string_field(r, 1)?,
            group_id: Self::read_string_field(r, 2)?,
            block_limit: Self::read_i64_field(r, 3)?,
            nonce: Self::read_string_field(r, 4)?,
            to: Self::read_string_field(r, 5)?,
            input: Self::read_bytes_field(r, 6)?,
            abi: Self::read_string_field(r, 7)?,
        })
    }
}

impl Serializable for Transaction {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_tag(w, 0)?;
        self.data.write(w)?;
        Self::write_bytes_field(w, 1, &self.data_hash)?;
        Self::write_bytes_field(w, 2, &self.signature)?;
        Self::write_i64_field(w, 3, self.import_time)?;
        Self::write_i32_field(w, 4, self.attribute)?;
        Self::write_string_field(w, 5, &self.source)?;
        Self::write_bytes_field(w, 6, &self.sender)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Self::read_tag(r, 0)?;
        let data = TransactionData::read(r)?;

        Ok(Transaction {
            data,
            data_hash: Self::read_bytes_field(r, 1)?,
            signature: Self::read_bytes_field(r, 2)?,
            import_time: Self::read_i64_field(r, 3)?,
            attribute: Self::read_i32_field(r, 4)?,
            source: Self::read_string_field(r, 5)?,
            sender: Self::read_bytes_field(r, 6)?,
        })
    }
}

impl Serializable for LogEntry {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_bytes_field(w, 0, &self.address)?;
        Self::write_bytes_list_field(w, 1, &self.topic)?;
        Self::write_bytes_field(w, 2, &self.data)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(LogEntry {
            address: Self::read_bytes_field(r, 0)?,
            topic: Self::read_bytes_list_field(r, 1)?,
            data: Self::read_bytes_field(r, 2)?,
        })
    }
}

impl TransactionReceipt {
    /// Writes the receipt with `log_entries` in place of the stored log list.
    pub(crate) fn write_with_logs<W: Write>(
        &self,
        w: &mut W,
        log_entries: &[LogEntry],
    ) -> io::Result<()> {
        Self::write_i32_field(w, 0, self.version)?;
        Self::write_string_field(w, 1, &self.gas_used)?;
        Self::write_string_field(w, 2, &self.contract_address)?;
        Self::write_i32_field(w, 3, self.status)?;
        Self::write_bytes_field(w, 4, &self.output)?;
        Self::write_list_field(w, 5, log_entries)?;
        Self::write_i64_field(w, 6, self.block_number)?;

        Ok(())
    }
}

impl Serializable for TransactionReceipt {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_with_logs(w, &self.log_entries)
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(TransactionReceipt {
            version: Self::read_i32_field(r, 0)?,
            gas_used: Self::read_string_field(r, 1)?,
            contract_address: Self::read_string_field(r, 2)?,
            status: Self::read_i32_field(r, 3)?,
            output: Self::read_bytes_field(r, 4)?,
            log_entries: Self::read_list_field(r, 5)?,
            block_number: Self::read_i64_field(r, 6)?,
        })
    }
}

impl Serializable for TransactionMetaData {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_bytes_field(w, 0, &self.hash)?;
        Self::write_string_field(w, 1, &self.to)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(TransactionMetaData {
            hash: Self::read_bytes_field(r, 0)?,
            to: Self::read_string_field(r, 1)?,
        })
    }
}

impl Block {
    /// Writes the block with `header` in place of the stored header.
    pub(crate) fn write_with_header<W: Write>(
        &self,
        w: &mut W,
        header: &BlockHeader,
    ) -> io::Result<()> {
        Self::write_i32_field(w, 0, self.block_type)?;
        Self::write_tag(w, 1)?;
        header.write(w)?;
        Self::write_list_field(w, 2, &self.transactions)?;
        Self::write_list_field(w, 3, &self.receipts)?;
        Self::write_list_field(w, 4, &self.transactions_meta_data)?;
        Self::write_string_list_field(w, 5, &self.nonce_list)?;

        Ok(())
    }
}

impl Serializable for Block {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.write_with_header(w, &self.block_header)
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        let block_type = Self::read_i32_field(r, 0)?;
        Self::read_tag(r, 1)?;
        let block_header = BlockHeader::read(r)?;

        Ok(Block {
            block_type,
            block_header,
            transactions: Self::read_list_field(r, 2)?,
            receipts: Self::read_list_field(r, 3)?,
            transactions_meta_data: Self::read_list_field(r, 4)?,
            nonce_list: Self::read_string_list_field(r, 5)?,
        })
    }
}

impl Serializable for TransactionSubmitResult {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_bytes_field(w, 0, &self.tx_hash)?;
        Self::write_bytes_field(w, 1, &self.block_hash)?;
        Self::write_i32_field(w, 2, self.status)?;
        Self::write_i64_field(w, 3, self.transaction_index)?;
        Self::write_string_field(w, 4, &self.nonce)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(TransactionSubmitResult {
            tx_hash: Self::read_bytes_field(r, 0)?,
            block_hash: Self::read_bytes_field(r, 1)?,
            status: Self::read_i32_field(r, 2)?,
            transaction_index: Self::read_i64_field(r, 3)?,
            nonce: Self::read_string_field(r, 4)?,
        })
    }
}

impl Serializable for ConsensusNode {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_bytes_field(w, 0, &self.node_id)?;
        Self::write_i64_field(w, 1, self.weight)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(ConsensusNode {
            node_id: Self::read_bytes_field(r, 0)?,
            weight: Self::read_i64_field(r, 1)?,
        })
    }
}

impl Serializable for LedgerConfig {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_list_field(w, 0, &self.consensus_node_list)?;
        Self::write_list_field(w, 1, &self.observer_node_list)?;
        Self::write_bytes_field(w, 2, &self.hash)?;
        Self::write_i64_field(w, 3, self.block_number)?;
        Self::write_i64_field(w, 4, self.block_tx_count_limit)?;
        Self::write_i64_field(w, 5, self.leader_switch_period)?;
        Self::write_i64_field(w, 6, self.sealer_id)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(LedgerConfig {
            consensus_node_list: Self::read_list_field(r, 0)?,
            observer_node_list: Self::read_list_field(r, 1)?,
            hash: Self::read_bytes_field(r, 2)?,
            block_number: Self::read_i64_field(r, 3)?,
            block_tx_count_limit: Self::read_i64_field(r, 4)?,
            leader_switch_period: Self::read_i64_field(r, 5)?,
            sealer_id: Self::read_i64_field(r, 6)?,
        })
    }
}

impl Serializable for ChainNodeInfo {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_string_field(w, 0, &self.node_name)?;
        Self::write_i32_field(w, 1, self.node_type)?;

        // BTreeMap iteration keeps the entries in ascending key order
        Self::write_len_field(w, 2, self.service_info.len())?;
        for (service_type, endpoint) in &self.service_info {
            w.write_all(&service_type.to_le_bytes())?;
            Self::write_var_le_bytes32(w, endpoint.as_bytes())?;
        }

        Self::write_string_field(w, 3, &self.node_id)?;
        Self::write_string_field(w, 4, &self.ini_config)?;
        Self::write_bool_field(w, 5, self.micro_service)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        let node_name = Self::read_string_field(r, 0)?;
        let node_type = Self::read_i32_field(r, 1)?;

        let len = Self::read_len_field(r, 2)?;
        let mut service_info = BTreeMap::new();
        for _ in 0..len {
            let service_type = Self::read_i32_le(r)?;
            let endpoint = String::from_utf8(Self::read_var_le_bytes32(r)?)
                .map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        "Invalid utf-8 string",
                    )
                })?;
            if service_info.insert(service_type, endpoint).is_some() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Duplicated service type",
                ));
            }
        }

        Ok(ChainNodeInfo {
            node_name,
            node_type,
            service_info,
            node_id: Self::read_string_field(r, 3)?,
            ini_config: Self::read_string_field(r, 4)?,
            micro_service: Self::read_bool_field(r, 5)?,
        })
    }
}

impl Serializable for GroupInfo {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_string_field(w, 0, &self.chain_id)?;
        Self::write_string_field(w, 1, &self.group_id)?;
        Self::write_string_field(w, 2, &self.genesis_config)?;
        Self::write_string_field(w, 3, &self.ini_config)?;
        Self::write_list_field(w, 4, &self.node_list)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(GroupInfo {
            chain_id: Self::read_string_field(r, 0)?,
            group_id: Self::read_string_field(r, 1)?,
            genesis_config: Self::read_string_field(r, 2)?,
            ini_config: Self::read_string_field(r, 3)?,
            node_list: Self::read_list_field(r, 4)?,
        })
    }
}

impl Serializable for Error {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        Self::write_i32_field(w, 0, self.error_code)?;
        Self::write_string_field(w, 1, &self.error_message)?;

        Ok(())
    }

    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized,
    {
        Ok(Error {
            error_code: Self::read_i32_field(r, 0)?,
            error_message: Self::read_string_field(r, 1)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Dummy, Fake, Faker};

    /// Asserts if encoding/decoding of a serializable type runs properly.
    fn assert_serializable<S: Dummy<Faker> + Eq + Serializable>() {
        let obj: S = Faker.fake();
        let buf = to_vec(&obj).expect("should be writable");

        assert!(obj.eq(&from_slice(&buf).expect("should be readable")));
    }

    #[test]
    fn test_encoding_header() {
        assert_serializable::<BlockHeader>();
    }

    #[test]
    fn test_encoding_block() {
        assert_serializable::<Block>();
    }

    #[test]
    fn test_encoding_receipt() {
        assert_serializable::<TransactionReceipt>();
    }

    #[test]
    fn test_encoding_group_info() {
        assert_serializable::<GroupInfo>();
    }

    #[test]
    fn test_encoding_ledger_config() {
        assert_serializable::<LedgerConfig>();
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let block: Block = Faker.fake();
        let copy = block.clone();

        assert_eq!(to_vec(&block).unwrap(), to_vec(&copy).unwrap());
    }

    #[test]
    fn test_hashable_header_skips_signatures() {
        let mut header: BlockHeader = Faker.fake();
        header.signature_list = vec![Signature {
            sealer_index: 3,
            signature: vec![7; 65],
        }];

        let mut hashable = vec![];
        header.marshal_hashable(&mut hashable).unwrap();

        let decoded: BlockHeader = from_slice(&hashable).unwrap();
        assert!(decoded.signature_list.is_empty());
        assert_eq!(header.signature_list.len(), 1);

        let mut unsigned = header.clone();
        unsigned.signature_list.clear();
        assert_eq!(hashable, to_vec(&unsigned).unwrap());
    }

    #[test]
    fn test_decode_rejects_wrong_tag() {
        let mut buf = to_vec(&TransactionMetaData {
            hash: vec![1; 32],
            to: "0xabc".into(),
        })
        .unwrap();
        buf[0] = 9;

        let err = from_slice::<TransactionMetaData>(&buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let buf = to_vec(&Error::new(-1, "boom")).unwrap();

        let err = from_slice::<Error>(&buf[..buf.len() - 1]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut buf = to_vec(&ConsensusNode {
            node_id: vec![1, 2, 3],
            weight: 1,
        })
        .unwrap();
        buf.push(0);

        assert!(from_slice::<ConsensusNode>(&buf).is_err());
    }

    #[test]
    fn test_decode_rejects_huge_length_prefix() {
        // tag 0 followed by a 4GiB length and no content
        let buf = [0u8, 0xff, 0xff, 0xff, 0xff];

        let err = from_slice::<TransactionMetaData>(&buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
