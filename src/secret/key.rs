// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generic secret key implementation.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::*;

/// Raw secret key material.
///
/// Holds an owned byte sequence plus its bit length and implements the key
/// marker traits used by the cipher, derivation, and wrap operations. The
/// material is exclusively owned by the holding context and is overwritten
/// with zero before being freed or replaced.
///
/// The `Debug` implementation deliberately redacts the key bytes and
/// `Display` is not implemented; key bytes never reach logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    key_data: Vec<u8>,
}

impl fmt::Debug for KeyMaterial {
    /// Redacts the key bytes; only the length is shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_data", &"<redacted>")
            .finish()
    }
}

impl KeyMaterial {
    /// Returns the raw key bytes.
    ///
    /// Used by operations that feed the material into a PRF or primitive;
    /// callers must not copy the bytes into unmanaged storage.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key_data
    }
}

impl Key for KeyMaterial {
    fn size(&self) -> usize {
        self.key_data.len()
    }

    fn bits(&self) -> usize {
        self.key_data.len() * 8
    }
}

impl SymmetricKey for KeyMaterial {}

impl SecretKey for KeyMaterial {}

impl DerivationKey for KeyMaterial {}

impl EncryptionKey for KeyMaterial {}

impl DecryptionKey for KeyMaterial {}

impl WrappingKey for KeyMaterial {}

impl UnwrappingKey for KeyMaterial {}

impl ImportableKey for KeyMaterial {
    /// Imports key material from raw bytes.
    ///
    /// No length validation is performed here; primitives reject unusable
    /// sizes with [`CryptoError::InvalidKey`] at use time.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            key_data: bytes.to_vec(),
        })
    }
}

impl ExportableKey for KeyMaterial {
    /// Exports the key material.
    ///
    /// Two-phase: `None` queries the size, `Some(buffer)` copies the bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the buffer is too
    /// small.
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let key_len = self.key_data.len();
        if let Some(bytes) = bytes {
            if bytes.len() < key_len {
                return Err(CryptoError::OutputLengthError);
            }
            bytes[..key_len].copy_from_slice(&self.key_data);
        }
        Ok(key_len)
    }
}

impl KeyGenerationOp for KeyMaterial {
    type Key = Self;

    /// Generates fresh key material of `size` bytes from the shared random
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the random source fails.
    fn generate(size: usize, rng: &SharedRandom) -> Result<Self::Key, CryptoError> {
        let mut key_data = vec![0u8; size];
        rng.fill(&mut key_data)?;
        Ok(Self { key_data })
    }
}
