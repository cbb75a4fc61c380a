// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::io;

use thiserror::Error;

/// Failure to materialize a typed value out of a wire field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("field {field} holds a non-decimal value {value:?}")]
    InvalidDecimal { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Decode error {0}")]
    Decode(#[from] io::Error),
    #[error("Conversion error {0}")]
    Conversion(#[from] ConversionError),
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
