// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used)]


use super::*;

pub(crate) fn passphrase(bytes: &[u8]) -> KeyMaterial {
    KeyMaterial::from_bytes(bytes).unwrap()
}

pub(crate) fn derive_bytes<Algo>(
    algo: &Algo,
    key: &KeyMaterial,
    len: usize,
) -> Result<Vec<u8>, CryptoError>
where
    Algo: DeriveOp<Key = KeyMaterial, DerivedKey = KeyMaterial>,
{
    let derived = algo.derive(key, len)?;
    derived.to_vec()
}
