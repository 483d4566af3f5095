// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Encryption operation wrapper.

use super::*;

/// Encryption operation wrapper.
///
/// Provides a unified entry point for streaming encryption over any
/// [`EncryptStreamingOp`] implementation.
pub struct Encrypter;

impl Encrypter {
    /// Performs single-operation encryption.
    ///
    /// Follows the two-phase pattern: `None` output queries the required
    /// buffer size, `Some(buffer)` encrypts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::OutputLengthError`] if the buffer is too
    /// small, or the underlying cipher error.
    pub fn encrypt<Algo: EncryptOp>(
        algo: &mut Algo,
        key: &Algo::Key,
        input: &[u8],
        output: Option<&mut [u8]>,
    ) -> Result<usize, CryptoError> {
        algo.encrypt(key, input, output)
    }

    /// Initializes a streaming encryption context.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid for this operation or the
    /// algorithm configuration is inconsistent.
    pub fn encrypt_init<Algo: EncryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
    ) -> Result<Algo::Context, CryptoError> {
        algo.encrypt_init(key)
    }

    /// Encrypts a complete message and returns the ciphertext as a vector.
    ///
    /// Convenience method that drives a streaming context over the whole
    /// input: size query, one `update`, one `finish`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as the underlying context operations.
    pub fn encrypt_vec<Algo: EncryptStreamingOp>(
        algo: Algo,
        key: Algo::Key,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let mut context = algo.encrypt_init(key)?;
        let update_size = context.update(input, None)?;
        let mut output = vec![0u8; update_size];
        let written = context.update(input, Some(&mut output))?;
        let finish_size = context.finish(None)?;
        output.resize(written + finish_size, 0);
        let finished = context.finish(Some(&mut output[written..]))?;
        output.truncate(written + finished);
        Ok(output)
    }
}
