// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The block-cipher primitive contract.
//!
//! The streaming engine is written against this trait and never against a
//! concrete cipher. A primitive transforms exactly one block per call; the
//! engine supplies buffering, chaining, and padding around it. Fixed-block
//! symmetric ciphers report equal plaintext and ciphertext block sizes;
//! block-like asymmetric ciphers may report different ones.

use super::*;

/// One-block-at-a-time cipher primitive.
///
/// # Block Sizes
///
/// [`plain_block_size`](Self::plain_block_size) and
/// [`cipher_block_size`](Self::cipher_block_size) are fixed for the lifetime
/// of the primitive. `encrypt_block` consumes one plaintext block and
/// produces one ciphertext block; `decrypt_block` is the inverse.
///
/// # Internal Chaining
///
/// A primitive that performs its own chaining (for example a block-like
/// asymmetric mode that folds feedback into its internal state) returns
/// `true` from [`chains_internally`](Self::chains_internally). The engine
/// then passes blocks through untouched instead of applying its own
/// XOR/chain-buffer logic.
pub trait BlockCipherOp {
    /// The key type this primitive operates with.
    type Key: Key;

    /// Plaintext block size in bytes.
    fn plain_block_size(&self) -> usize;

    /// Ciphertext block size in bytes.
    fn cipher_block_size(&self) -> usize;

    /// Whether the primitive performs its own chaining.
    fn chains_internally(&self) -> bool {
        false
    }

    /// Encrypts one block.
    ///
    /// `input` holds one plaintext block; primitives that accept a trailing
    /// short block (final-data ciphers that pad internally) may be called
    /// with fewer bytes. `output` is exactly one ciphertext block.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] for unusable key material or
    /// [`CryptoError::InternalError`] for primitive failures.
    fn encrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError>;

    /// Decrypts one block.
    ///
    /// `input` holds one ciphertext block; `output` receives one plaintext
    /// block.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKey`] for unusable key material or
    /// [`CryptoError::InternalError`] for primitive failures.
    fn decrypt_block(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError>;
}
