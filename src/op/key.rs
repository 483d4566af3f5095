// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Traits for the cryptographic key type system.
//!
//! This module provides the marker trait hierarchy that gives compile-time
//! type safety to key usage: a wrapping operation only accepts keys marked as
//! wrapping keys, a derivation only accepts derivation keys, and so on. It
//! also defines the import/export and generation contracts shared by all key
//! types.
//!
//! # Trait Categories
//!
//! - **Base**: [`Key`] as the root trait for all key types
//! - **Type markers**: [`SymmetricKey`], [`SecretKey`], [`DerivationKey`]
//! - **Operation markers**: [`EncryptionKey`], [`DecryptionKey`],
//!   [`WrappingKey`], [`UnwrappingKey`]
//! - **Transfer**: [`ExportableKey`], [`ImportableKey`]
//! - **Generation**: [`KeyGenerationOp`]
//! - **External capability**: [`CompletePartialKeyOp`]

use super::*;

/// Base trait for all cryptographic keys.
///
/// Establishes that a type carries key material with a measurable length.
pub trait Key {
    /// Returns the length of the key in bytes.
    fn size(&self) -> usize;

    /// Returns the length of the key in bits.
    fn bits(&self) -> usize;
}

/// Marker trait for symmetric (secret) keys.
///
/// Identifies key types where the same material is used for both directions
/// of an operation.
pub trait SymmetricKey: Key {}

/// Marker trait for secret key material.
///
/// Secret keys must never appear in logs or debug output and must be
/// zeroized from memory when no longer needed.
pub trait SecretKey: Key {}

/// Marker trait for keys usable as source material in key derivation.
pub trait DerivationKey: Key {}

/// Marker trait for keys used in encryption operations.
pub trait EncryptionKey: Key {}

/// Marker trait for keys used in decryption operations.
pub trait DecryptionKey: Key {}

/// Marker trait for keys used to wrap (encrypt) other keys.
///
/// Wrapping keys must be at least as strong as the keys they protect and
/// should carry restricted usage permissions.
pub trait WrappingKey: Key {}

/// Marker trait for keys used to unwrap (decrypt) other keys.
pub trait UnwrappingKey: Key {}

/// Marker trait for keys that can be exported to bytes.
pub trait ExportableKey: Key {
    /// Exports the key to byte representation.
    ///
    /// Follows the two-phase pattern: call with `None` to query the required
    /// buffer size, then with `Some(buffer)` to copy the key material out.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the provided buffer is
    /// too small.
    ///
    /// # Security
    ///
    /// Clear exported key material when no longer needed; consider wrapping
    /// the key instead of exporting it in the clear.
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Exports the key to a newly allocated vector.
    ///
    /// Convenience wrapper over [`to_bytes`](Self::to_bytes).
    fn to_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let size = self.to_bytes(None)?;
        let mut buffer = vec![0u8; size];
        self.to_bytes(Some(&mut buffer))?;
        Ok(buffer)
    }
}

/// Marker trait for keys that can be imported from bytes.
pub trait ImportableKey: Key {
    /// Imports a key from its raw byte representation.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the material is malformed for
    /// the key type.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>
    where
        Self: Sized;
}

/// Trait for cryptographic key generation.
///
/// Generation always draws from an explicitly supplied [`SharedRandom`]
/// handle; there is no ambient global random source.
pub trait KeyGenerationOp {
    /// The type of key this operation generates.
    type Key: Key;

    /// Generates a new key of `size` bytes from the given random source.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the random source fails, or
    /// [`CryptoError::InvalidParameter`] if the size is invalid for the
    /// key type.
    fn generate(size: usize, rng: &SharedRandom) -> Result<Self::Key, CryptoError>;
}

/// External capability for completing a partial key with a parameter key.
///
/// The completion algorithm lives outside this crate; components that need it
/// accept any implementation of this contract.
pub trait CompletePartialKeyOp {
    /// The key type this capability completes.
    type Key: Key;

    /// Completes `key` using the supplied parameter key.
    fn complete_partial_key(
        &mut self,
        key: &Self::Key,
        param_key: &Self::Key,
    ) -> Result<Self::Key, CryptoError>;
}
