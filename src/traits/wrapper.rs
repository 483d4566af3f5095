// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key wrapping operation wrapper.

use super::*;

/// Key wrapping operation wrapper.
///
/// Provides a unified entry point for key wrapping over any [`WrapOp`]
/// implementation.
pub struct KeyWrapper;

impl KeyWrapper {
    /// Wraps a raw key blob under the wrapping key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the buffer is too
    /// small, or the underlying wrap error otherwise.
    pub fn wrap<Algo: WrapOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        key_blob: &[u8],
        wrapped: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.wrap_key(key, key_blob, wrapped)
    }

    /// Wraps a raw key blob and returns the wrapped material as a vector.
    ///
    /// # Errors
    ///
    /// Returns the underlying wrap error.
    pub fn wrap_vec<Algo: WrapOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        key_blob: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let wrapped_len = Self::wrap(algo, key, key_blob, None)?;
        let mut wrapped = vec![0u8; wrapped_len];
        let written = Self::wrap(algo, key, key_blob, Some(&mut wrapped))?;
        wrapped.truncate(written);
        Ok(wrapped)
    }
}
