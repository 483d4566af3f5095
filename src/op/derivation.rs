// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key derivation operation trait.
//!
//! This module defines the [`DeriveOp`] trait, the generic interface for the
//! crate's key derivation functions. Derivation turns source key material
//! (for the password-based schemes, the passphrase itself) plus the
//! algorithm's configured salt and iteration count into a fixed number of
//! output bytes.

use super::*;

/// Trait for key derivation operations.
///
/// Implementations configure the algorithm parameters (salt, iteration
/// count, digest) in the implementing type; `derive` then maps source key
/// material to exactly `derived_len` bytes of output.
///
/// # Contract
///
/// A derivation either returns exactly the requested number of bytes or
/// fails with [`CryptoError::InvalidParameter`]; it never writes partial
/// output and performs no hashing when the configured parameters are
/// rejected.
pub trait DeriveOp {
    /// The source key material type.
    type Key: DerivationKey;

    /// The derived key type.
    type DerivedKey: SecretKey;

    /// Performs the key derivation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if `derived_len` is zero,
    /// the configured iteration count is zero, or the requested length is
    /// unsupported by the algorithm variant.
    fn derive(&self, key: &Self::Key, derived_len: usize) -> Result<Self::DerivedKey, CryptoError>;
}
