// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Operation engine for a software cryptographic service provider.
//!
//! This crate turns a family of heterogeneous block-cipher primitives into one
//! uniform, incrementally callable encrypt/decrypt interface and builds the
//! provider's key-management protocols on top of it. It includes:
//!
//! - **Cipher**: a generic streaming engine that manages chaining-mode state
//!   (ECB/CBC), PKCS#7 padding, and partial-block buffering across repeated
//!   `update` calls terminated by a `finish` call
//! - **KDF**: password-based key derivation (PBKDF2-HMAC, the legacy iterated
//!   hash scheme, and the PKCS#12 diversifier scheme)
//! - **Wrap**: key wrapping and unwrapping, including a custom
//!   double-encryption-with-reversal wrap format
//! - **RNG**: a shared, internally serialized random source handle
//!
//! # Architecture
//!
//! Concrete cipher mathematics is never implemented here. Callers inject a
//! [`BlockCipherOp`] primitive (one block in, one block out) and the engine
//! supplies everything around it: buffering, chaining, padding, and sizing.
//! Key blobs are encoded and decoded through the injected [`KeyBlobCodec`]
//! collaborator; the wrap protocols only move bytes between the cipher engine
//! and the codec.
//!
//! # Thread Safety
//!
//! All operation contexts are single-owner and synchronous. The only shared
//! resource is [`SharedRandom`], which serializes access internally.

mod cipher;
mod hash;
mod kdf;
mod rand;
mod secret;
mod wrap;

mod op;
mod traits;

pub use cipher::*;
pub use hash::*;
pub use kdf::*;
pub use op::*;
pub use self::rand::*;
pub use secret::*;
use thiserror::Error;
pub use traits::*;
pub use wrap::*;

/// Error type for all engine operations.
///
/// Every component fails fast with one of these kinds and commits no partial
/// output on error. Callers are responsible for securely erasing any partially
/// produced plaintext or key bytes they own.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
    /// Cipher configuration is inconsistent (chaining mode, padding, or IV).
    #[error("cipher configuration is inconsistent")]
    ConfigError,

    /// Input to a final call is short or misaligned.
    #[error("final input is short or misaligned")]
    InputLengthError,

    /// Caller-provided output buffer is too small.
    #[error("output buffer too small")]
    OutputLengthError,

    /// Ciphertext is malformed: bad padding on decrypt, or a bad or oversized
    /// length field inside a wrap blob.
    #[error("malformed ciphertext")]
    MalformedCiphertext,

    /// Key has the wrong length or format for the operation.
    #[error("invalid key")]
    InvalidKey,

    /// Derivation or protocol argument violates policy.
    #[error("invalid parameter")]
    InvalidParameter,

    /// Random number generation failed.
    #[error("random number generation failed")]
    RngError,

    /// The underlying cipher primitive failed internally.
    #[error("cipher primitive internal error")]
    InternalError,
}
