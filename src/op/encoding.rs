// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The key-blob codec collaborator contract.
//!
//! Structured key blob encoding (PKCS#7/PKCS#8/raw and their ASN.1/DER
//! internals) lives outside this crate. The wrap protocols only need the
//! ability to turn raw bytes into a structured blob of a given kind and
//! back; this module defines that seam.

use super::*;

/// Structural kind of an encoded key blob.
///
/// The set is closed; the codec reports the kind it decoded so callers can
/// route the raw material appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBlobKind {
    /// Raw key bytes with no structural framing.
    Raw,
    /// PKCS#7 framed blob.
    Pkcs7,
    /// PKCS#8 framed blob.
    Pkcs8,
}

/// Codec for structured key blobs.
///
/// Implementations are supplied by the surrounding provider; the engine
/// treats blobs as opaque byte strings between `encode` and `decode`.
pub trait KeyBlobCodec {
    /// Encodes raw key bytes into a structured blob of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidParameter`] if the material cannot be
    /// framed as the requested kind.
    fn encode(&self, kind: KeyBlobKind, raw: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Decodes a structured blob into its kind and raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] if the blob cannot be
    /// parsed.
    fn decode(&self, blob: &[u8]) -> Result<(KeyBlobKind, Vec<u8>), CryptoError>;
}
