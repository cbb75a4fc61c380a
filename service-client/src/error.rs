// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use protocol_data::wire;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Codes raised by the clients themselves, as opposed to codes reported by
/// the remote service or by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    ServiceUnavailable = -10001,
    Timeout = -10002,
    MalformedResponse = -10003,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code.code()
    }

    pub(crate) fn service_unavailable(module: &str, method: &str) -> Self {
        Self::new(
            ErrorCode::ServiceUnavailable.code(),
            format!("{module} calls {method} failed for empty connection"),
        )
    }

    pub(crate) fn timeout(method: &str) -> Self {
        Self::new(ErrorCode::Timeout.code(), format!("{method} timed out"))
    }

    pub(crate) fn malformed_response(method: &str, reason: &str) -> Self {
        Self::new(
            ErrorCode::MalformedResponse.code(),
            format!("{method} returned a malformed response: {reason}"),
        )
    }
}

/// Translates the error record of a response. Success maps to `None`.
pub fn to_error(status: &wire::Error) -> Option<Error> {
    if status.is_success() {
        return None;
    }
    Some(Error::new(status.error_code, status.error_message.clone()))
}

/// Translates a transport failure code.
pub fn from_transport(code: i32) -> Error {
    Error::new(code, format!("transport error {code}"))
}
