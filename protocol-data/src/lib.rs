// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

pub mod convert;
pub mod encoding;
pub mod error;
pub mod group;
pub mod ledger;
pub mod wire;

pub use error::{ConversionError, ProtocolError};

use std::io::{self, Read, Write};

/// Upper bound for speculative allocations driven by length prefixes.
const MAX_PREALLOC: usize = 1024;

pub trait Serializable {
    fn write<W: Write>(&self, w: &mut W) -> io::Result<()>;
    fn read<R: Read>(r: &mut R) -> io::Result<Self>
    where
        Self: Sized;

    fn read_bytes<R: Read, const N: usize>(r: &mut R) -> io::Result<[u8; N]> {
        let mut buffer = [0u8; N];
        r.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    fn read_u8<R: Read>(r: &mut R) -> io::Result<u8> {
        let mut num = [0u8; 1];
        r.read_exact(&mut num)?;
        Ok(num[0])
    }

    fn read_u32_le<R: Read>(r: &mut R) -> io::Result<u32> {
        let data = Self::read_bytes(r)?;
        Ok(u32::from_le_bytes(data))
    }

    fn read_i32_le<R: Read>(r: &mut R) -> io::Result<i32> {
        let data = Self::read_bytes(r)?;
        Ok(i32::from_le_bytes(data))
    }

    fn read_i64_le<R: Read>(r: &mut R) -> io::Result<i64> {
        let data = Self::read_bytes(r)?;
        Ok(i64::from_le_bytes(data))
    }

    /// Writes length-prefixed fields
    fn write_var_le_bytes32<W: Write>(w: &mut W, buf: &[u8]) -> io::Result<()> {
        let len = u32::try_from(buf.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "field too large")
        })?;
        w.write_all(&len.to_le_bytes())?;
        w.write_all(buf)?;
        Ok(())
    }

    /// Reads length-prefixed fields
    fn read_var_le_bytes32<R: Read>(r: &mut R) -> io::Result<Vec<u8>> {
        let len = Self::read_u32_le(r)? as usize;

        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        r.by_ref().take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }

        Ok(buf)
    }

    /// Writes the schema tag of the next field
    fn write_tag<W: Write>(w: &mut W, tag: u8) -> io::Result<()> {
        w.write_all(&[tag])
    }

    /// Reads a field tag and checks it against the schema position
    fn read_tag<R: Read>(r: &mut R, expected: u8) -> io::Result<()> {
        let tag = Self::read_u8(r)?;
        if tag != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unexpected field tag {tag}, expected {expected}"),
            ));
        }
        Ok(())
    }

    fn write_i32_field<W: Write>(w: &mut W, tag: u8, v: i32) -> io::Result<()> {
        Self::write_tag(w, tag)?;
        w.write_all(&v.to_le_bytes())
    }

    fn read_i32_field<R: Read>(r: &mut R, tag: u8) -> io::Result<i32> {
        Self::read_tag(r, tag)?;
        Self::read_i32_le(r)
    }

    fn write_i64_field<W: Write>(w: &mut W, tag: u8, v: i64) -> io::Result<()> {
        Self::write_tag(w, tag)?;
        w.write_all(&v.to_le_bytes())
    }

    fn read_i64_field<R: Read>(r: &mut R, tag: u8) -> io::Result<i64> {
        Self::read_tag(r, tag)?;
        Self::read_i64_le(r)
    }

    fn write_bool_field<W: Write>(
        w: &mut W,
        tag: u8,
        v: bool,
    ) -> io::Result<()> {
        Self::write_tag(w, tag)?;
        w.write_all(&[v as u8])
    }

    fn read_bool_field<R: Read>(r: &mut R, tag: u8) -> io::Result<bool> {
        Self::read_tag(r, tag)?;
        match Self::read_u8(r)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid bool",
            )),
        }
    }

    fn write_bytes_field<W: Write>(
        w: &mut W,
        tag: u8,
        buf: &[u8],
    ) -> io::Result<()> {
        Self::write_tag(w, tag)?;
        Self::write_var_le_bytes32(w, buf)
    }

    fn read_bytes_field<R: Read>(r: &mut R, tag: u8) -> io::Result<Vec<u8>> {
        Self::read_tag(r, tag)?;
        Self::read_var_le_bytes32(r)
    }

    fn write_string_field<W: Write>(
        w: &mut W,
        tag: u8,
        s: &str,
    ) -> io::Result<()> {
        Self::write_bytes_field(w, tag, s.as_bytes())
    }

    fn read_string_field<R: Read>(r: &mut R, tag: u8) -> io::Result<String> {
        let buf = Self::read_bytes_field(r, tag)?;
        String::from_utf8(buf).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "Invalid utf-8 string")
        })
    }

    /// Writes the element count of a sequence field
    fn write_len_field<W: Write>(
        w: &mut W,
        tag: u8,
        len: usize,
    ) -> io::Result<()> {
        let len = u32::try_from(len).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "sequence too long")
        })?;
        Self::write_tag(w, tag)?;
        w.write_all(&len.to_le_bytes())
    }

    fn read_len_field<R: Read>(r: &mut R, tag: u8) -> io::Result<usize> {
        Self::read_tag(r, tag)?;
        Ok(Self::read_u32_le(r)? as usize)
    }

    fn write_list_field<W: Write, T: Serializable>(
        w: &mut W,
        tag: u8,
        items: &[T],
    ) -> io::Result<()> {
        Self::write_len_field(w, tag, items.len())?;
        for item in items {
            item.write(w)?;
        }
        Ok(())
    }

    fn read_list_field<R: Read, T: Serializable>(
        r: &mut R,
        tag: u8,
    ) -> io::Result<Vec<T>> {
        let len = Self::read_len_field(r, tag)?;
        let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            items.push(T::read(r)?);
        }
        Ok(items)
    }

    fn write_bytes_list_field<W: Write>(
        w: &mut W,
        tag: u8,
        items: &[Vec<u8>],
    ) -> io::Result<()> {
        Self::write_len_field(w, tag, items.len())?;
        for item in items {
            Self::write_var_le_bytes32(w, item)?;
        }
        Ok(())
    }

    fn read_bytes_list_field<R: Read>(
        r: &mut R,
        tag: u8,
    ) -> io::Result<Vec<Vec<u8>>> {
        let len = Self::read_len_field(r, tag)?;
        let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            items.push(Self::read_var_le_bytes32(r)?);
        }
        Ok(items)
    }

    fn write_string_list_field<W: Write>(
        w: &mut W,
        tag: u8,
        items: &[String],
    ) -> io::Result<()> {
        Self::write_len_field(w, tag, items.len())?;
        for item in items {
            Self::write_var_le_bytes32(w, item.as_bytes())?;
        }
        Ok(())
    }

    fn read_string_list_field<R: Read>(
        r: &mut R,
        tag: u8,
    ) -> io::Result<Vec<String>> {
        Self::read_bytes_list_field(r, tag)?
            .into_iter()
            .map(|b| {
                String::from_utf8(b).map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        "Invalid utf-8 string",
                    )
                })
            })
            .collect()
    }
}
