// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Digest and HMAC selection for the derivation engine.
//!
//! The key derivation schemes take the digest as a runtime parameter, so
//! this module provides a small selector enum over the digests the legacy
//! derivation formats require (MD5, SHA-1, SHA-256) with one-shot digest and
//! HMAC helpers. MD5 and SHA-1 are kept for compatibility with the legacy
//! derivation formats only; new derivations should select SHA-256.

use digest::Digest;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::Sha256;

use super::*;

/// Computes an HMAC over multiple input parts with a concrete digest type.
macro_rules! hmac_with {
    ($digest:ty, $key:expr, $parts:expr) => {{
        let mut mac =
            Hmac::<$digest>::new_from_slice($key).map_err(|_| CryptoError::InvalidKey)?;
        for part in $parts {
            mac.update(part);
        }
        Ok(mac.finalize().into_bytes().to_vec())
    }};
}

/// Digest algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgo {
    /// MD5 (16-byte output). Legacy derivation compatibility only.
    Md5,
    /// SHA-1 (20-byte output). Legacy derivation compatibility only.
    Sha1,
    /// SHA-256 (32-byte output).
    Sha256,
}

impl HashAlgo {
    /// Digest output size in bytes.
    pub fn size(&self) -> usize {
        match self {
            HashAlgo::Md5 => 16,
            HashAlgo::Sha1 => 20,
            HashAlgo::Sha256 => 32,
        }
    }

    /// Digest input block size in bytes.
    ///
    /// All supported digests process 64-byte input blocks; the PKCS#12
    /// diversifier scheme builds its buffers in multiples of this size.
    pub fn block_size(&self) -> usize {
        64
    }

    /// Computes the digest of the concatenation of `parts`.
    pub fn digest(&self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgo::Md5 => digest_parts::<Md5>(parts),
            HashAlgo::Sha1 => digest_parts::<Sha1>(parts),
            HashAlgo::Sha256 => digest_parts::<Sha256>(parts),
        }
    }

    /// Computes the HMAC of the concatenation of `parts` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] if the MAC cannot be keyed with
    /// the given material.
    pub fn hmac(&self, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>, CryptoError> {
        match self {
            HashAlgo::Md5 => hmac_with!(Md5, key, parts),
            HashAlgo::Sha1 => hmac_with!(Sha1, key, parts),
            HashAlgo::Sha256 => hmac_with!(Sha256, key, parts),
        }
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}
