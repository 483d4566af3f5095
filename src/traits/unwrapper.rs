// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key unwrapping operation wrapper.

use super::*;
use zeroize::Zeroizing;

/// Key unwrapping operation wrapper.
///
/// Provides a unified entry point for key unwrapping over any [`UnwrapOp`]
/// implementation.
pub struct KeyUnwrapper;

impl KeyUnwrapper {
    /// Unwraps wrapped key material into the caller's buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] for corrupt wrapped
    /// material or [`CryptoError::OutputLengthError`] if the buffer is too
    /// small. No key bytes are committed on failure.
    pub fn unwrap<Algo: UnwrapOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        wrapped: &[u8],
        key_blob: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.unwrap_key(key, wrapped, key_blob)
    }

    /// Unwraps wrapped key material and returns it as key material.
    ///
    /// The recovered bytes live in zeroized storage for their entire
    /// lifetime.
    ///
    /// # Errors
    ///
    /// Returns the underlying unwrap error.
    pub fn unwrap_vec<Algo: UnwrapOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        wrapped: &[u8],
    ) -> Result<KeyMaterial, CryptoError> {
        let blob_len = Self::unwrap(algo, key, wrapped, None)?;
        let mut key_blob = Zeroizing::new(vec![0u8; blob_len]);
        let written = Self::unwrap(algo, key, wrapped, Some(&mut key_blob))?;
        KeyMaterial::from_bytes(&key_blob[..written])
    }
}
