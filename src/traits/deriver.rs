// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key derivation operation wrapper.

use super::*;

/// Key derivation operation wrapper.
///
/// Provides a unified entry point for key derivation over any [`DeriveOp`]
/// implementation.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derives `derived_len` bytes of key material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if the derivation
    /// arguments violate policy (zero length, zero iteration count, or a
    /// length the algorithm variant cannot produce).
    pub fn derive<Algo: DeriveOp>(
        algo: &Algo,
        key: &Algo::Key,
        derived_len: usize,
    ) -> Result<Algo::DerivedKey, CryptoError> {
        algo.derive(key, derived_len)
    }
}
