// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Traits for key wrapping and unwrapping operations.
//!
//! Key wrapping encrypts one key's raw blob under another key (the KEK) so
//! the material can be stored or transported outside the provider. Unlike
//! general-purpose encryption, wrap formats carry enough structure for the
//! unwrapper to verify integrity and recover the exact original blob.
//!
//! # Security Considerations
//!
//! - Unwrap must verify structure before returning key material and fail
//!   without leaking partial plaintext
//! - Wrapping keys should carry restricted usage permissions
//! - Unwrapped material must be zeroized when no longer needed

use super::*;

/// Trait for key wrapping operations.
pub trait WrapOp {
    /// The wrapping key (KEK) type.
    type Key: WrappingKey;

    /// Wraps the raw key blob under the wrapping key.
    ///
    /// Follows the two-phase pattern: `None` output queries the required
    /// buffer size, `Some(buffer)` performs the wrap.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the buffer is too
    /// small, or the underlying cipher error if encryption fails.
    fn wrap_key(
        &mut self,
        key: &Self::Key,
        key_blob: &[u8],
        wrapped: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Trait for key unwrapping operations.
pub trait UnwrapOp {
    /// The unwrapping key (KEK) type.
    type Key: UnwrappingKey;

    /// Unwraps wrapped key material, recovering the original raw key blob.
    ///
    /// Follows the two-phase pattern: `None` output queries the recovered
    /// blob size, `Some(buffer)` writes it.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] for corrupt or
    /// tampered wrapped material (including bad or oversized internal
    /// length fields), or [`CryptoError::OutputLengthError`] if the buffer
    /// is too small. No key bytes are committed on failure.
    fn unwrap_key(
        &mut self,
        key: &Self::Key,
        wrapped: &[u8],
        key_blob: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}
