// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Traits for streaming encryption and decryption operations.
//!
//! Data is processed in chunks through a context: initialize with an `_init`
//! method, feed chunks with `update`, and complete with `finish`. For block
//! ciphers the output of an `update` may be smaller than its input while the
//! remainder sits in the context's internal buffer; `finish` drains it.
//!
//! # Lifecycle
//!
//! 1. Initialize: [`EncryptStreamingOp::encrypt_init`] /
//!    [`DecryptStreamingOp::decrypt_init`] consume the algorithm
//!    configuration and the key and return a context
//! 2. Update: call [`update`](EncryptOpContext::update) repeatedly
//! 3. Finalize: call [`finish`](EncryptOpContext::finish) once
//!
//! Contexts are not thread-safe; each context is exclusively owned by its
//! creator for the operation's lifetime.

use super::*;

/// Trait for one-shot encryption operations.
///
/// Encrypts a complete message in a single call. Suitable when the whole
/// input is in memory; the streaming traits below cover everything else.
pub trait EncryptOp {
    /// The key type used for this encryption operation.
    type Key: EncryptionKey;

    /// Encrypts `input` in a single operation.
    ///
    /// With `output` of `None` this is a size query that never
    /// under-predicts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the provided buffer is
    /// smaller than the bytes about to be produced, or the underlying
    /// cipher error.
    fn encrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Trait for one-shot decryption operations.
pub trait DecryptOp {
    /// The key type used for this decryption operation.
    type Key: DecryptionKey;

    /// Decrypts `input` in a single operation.
    ///
    /// With `output` of `None` this is a size query that never
    /// under-predicts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] on invalid padding (no
    /// plaintext is committed), [`CryptoError::InputLengthError`] on
    /// misaligned input, or [`CryptoError::OutputLengthError`] if the
    /// buffer is too small.
    fn decrypt(
        &mut self,
        key: &Self::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError>;
}

/// Trait for streaming encryption operations.
pub trait EncryptStreamingOp {
    /// The key type used for this encryption operation.
    type Key: EncryptionKey;

    /// The context type for streaming encryption.
    type Context: EncryptOpContext<Algo = Self>;

    /// Initializes a streaming encryption context.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid for this operation or the
    /// configured parameters (IV, block sizes) are inconsistent.
    fn encrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError>;
}

/// Context for streaming encryption operations.
pub trait EncryptOpContext: Sized {
    /// The algorithm type that produced this context.
    type Algo: EncryptStreamingOp;

    /// Processes a chunk of plaintext.
    ///
    /// Consumes all of `input`; incomplete blocks are buffered internally.
    /// With `output` of `None` this is a pure size query: it returns the
    /// exact number of bytes the same call would produce, without consuming
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the provided buffer is
    /// smaller than the bytes about to be produced.
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Finalizes the operation, draining buffered data and applying padding.
    ///
    /// With `output` of `None` this is a size query that never
    /// under-predicts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InputLengthError`] if buffered data cannot
    /// form a valid final block, or [`CryptoError::OutputLengthError`] if
    /// the buffer is too small.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Finalizes the operation and returns the output as a vector.
    fn finish_vec(&mut self) -> Result<Vec<u8>, CryptoError> {
        let required_size = self.finish(None)?;
        let mut output = vec![0u8; required_size];
        let written_size = self.finish(Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Returns a reference to the underlying algorithm.
    fn algo(&self) -> &Self::Algo;

    /// Returns a mutable reference to the underlying algorithm.
    fn algo_mut(&mut self) -> &mut Self::Algo;

    /// Consumes the context and returns the underlying algorithm.
    fn into_algo(self) -> Self::Algo;
}

/// Trait for streaming decryption operations.
pub trait DecryptStreamingOp {
    /// The key type used for this decryption operation.
    type Key: DecryptionKey;

    /// The context type for streaming decryption.
    type Context: DecryptOpContext<Algo = Self>;

    /// Initializes a streaming decryption context.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid for this operation or the
    /// configured parameters (IV, block sizes) are inconsistent.
    fn decrypt_init(self, key: Self::Key) -> Result<Self::Context, CryptoError>;
}

/// Context for streaming decryption operations.
pub trait DecryptOpContext: Sized {
    /// The algorithm type that produced this context.
    type Algo: DecryptStreamingOp;

    /// Processes a chunk of ciphertext.
    ///
    /// Consumes all of `input`; incomplete blocks are buffered internally.
    /// With `output` of `None` this is a pure size query.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the provided buffer is
    /// smaller than the bytes about to be produced.
    fn update(&mut self, input: &[u8], output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Finalizes the operation, draining buffered data and validating
    /// padding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedCiphertext`] on invalid padding (no
    /// plaintext is committed), [`CryptoError::InputLengthError`] on short
    /// or misaligned buffered input, or [`CryptoError::OutputLengthError`]
    /// if the buffer is too small.
    fn finish(&mut self, output: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Finalizes the operation and returns the output as a vector.
    fn finish_vec(&mut self) -> Result<Vec<u8>, CryptoError> {
        let required_size = self.finish(None)?;
        let mut output = vec![0u8; required_size];
        let written_size = self.finish(Some(&mut output))?;
        output.truncate(written_size);
        Ok(output)
    }

    /// Returns a reference to the underlying algorithm.
    fn algo(&self) -> &Self::Algo;

    /// Returns a mutable reference to the underlying algorithm.
    fn algo_mut(&mut self) -> &mut Self::Algo;

    /// Consumes the context and returns the underlying algorithm.
    fn into_algo(self) -> Self::Algo;
}
