// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;

use once_cell::unsync::OnceCell;

use super::*;

#[derive(Debug, Clone)]
pub struct TransactionMetaData<'a> {
    inner: Cow<'a, wire::TransactionMetaData>,
    hash: OnceCell<Hash>,
}

impl Default for TransactionMetaData<'_> {
    fn default() -> Self {
        Self::from(wire::TransactionMetaData::default())
    }
}

impl PartialEq for TransactionMetaData<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for TransactionMetaData<'_> {}

impl From<wire::TransactionMetaData> for TransactionMetaData<'_> {
    fn from(inner: wire::TransactionMetaData) -> Self {
        Self {
            inner: Cow::Owned(inner),
            hash: OnceCell::new(),
        }
    }
}

impl<'a> TransactionMetaData<'a> {
    pub fn new(hash: Hash, to: impl Into<String>) -> Self {
        Self {
            inner: Cow::Owned(wire::TransactionMetaData {
                hash: hash.to_vec(),
                to: to.into(),
            }),
            hash: OnceCell::with_value(hash),
        }
    }

    pub(crate) fn view(inner: &'a wire::TransactionMetaData) -> Self {
        Self {
            inner: Cow::Borrowed(inner),
            hash: OnceCell::new(),
        }
    }

    pub fn into_inner(self) -> wire::TransactionMetaData {
        self.inner.into_owned()
    }

    pub fn hash(&self) -> &Hash {
        self.hash.get_or_init(|| to_hash(&self.inner.hash))
    }

    pub fn set_hash(&mut self, hash: Hash) {
        self.inner.to_mut().hash = hash.to_vec();
        self.hash = OnceCell::with_value(hash);
    }

    pub fn to(&self) -> &str {
        &self.inner.to
    }

    pub fn set_to(&mut self, to: impl Into<String>) {
        self.inner.to_mut().to = to.into();
    }
}
